//! Namespaced biome identifiers (`namespace:path`).

use std::fmt;
use std::str::FromStr;

use crate::core::Error;

/// Namespace assumed when an identifier omits one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Identifier of a biome, e.g. `minecraft:plains`.
///
/// Equality is exact on both namespace and path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BiomeId {
    namespace: String,
    path: String,
}

impl BiomeId {
    /// Create an identifier, validating both parts.
    pub fn new(namespace: &str, path: &str) -> Result<Self, Error> {
        if is_valid_namespace(namespace) && is_valid_path(path) {
            Ok(Self {
                namespace: namespace.to_string(),
                path: path.to_string(),
            })
        } else {
            Err(Error::InvalidBiomeId(format!("{}:{}", namespace, path)))
        }
    }

    /// Identifier in the default namespace. `path` is trusted.
    pub fn vanilla(path: &str) -> Self {
        debug_assert!(is_valid_path(path), "invalid vanilla biome path {:?}", path);
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            path: path.to_string(),
        }
    }

    /// Parse `namespace:path` or a bare `path`.
    ///
    /// Returns `None` for anything malformed: illegal characters, an empty
    /// path, or more than one separator. A leading `:` keeps the default
    /// namespace.
    pub fn parse(s: &str) -> Option<Self> {
        let (namespace, path) = match s.split_once(':') {
            Some(("", path)) => (DEFAULT_NAMESPACE, path),
            Some((namespace, path)) => (namespace, path),
            None => (DEFAULT_NAMESPACE, s),
        };
        Self::new(namespace, path).ok()
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// True if this identifier lives in the default namespace.
    pub fn is_vanilla(&self) -> bool {
        self.namespace == DEFAULT_NAMESPACE
    }
}

impl fmt::Display for BiomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for BiomeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::InvalidBiomeId(s.to_string()))
    }
}

fn is_valid_namespace(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.'))
}

fn is_valid_path(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.' | b'/'))
}
