//! Core types shared by every module: errors and logging

pub mod error;
pub mod logging;

pub use error::{Error, Result};
