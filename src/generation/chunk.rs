//! Host seam for chunk block access, plus a dense in-memory chunk.

/// Blocks per chunk side.
pub const CHUNK_WIDTH: usize = 16;

/// Horizontal chunk position in chunk units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk containing block (x, z).
    pub fn from_block(block_x: i32, block_z: i32) -> Self {
        Self::new(block_x >> 4, block_z >> 4)
    }

    pub fn min_block_x(&self) -> i32 {
        self.x << 4
    }

    pub fn min_block_z(&self) -> i32 {
        self.z << 4
    }
}

/// Mutable block access to a chunk being generated.
///
/// Local coordinates: `x` and `z` in `0..16`, `y` absolute within
/// `min_build_height()..max_build_height()`.
pub trait ChunkAccess {
    type Block: Clone;

    fn pos(&self) -> ChunkPos;

    /// Lowest buildable Y (inclusive).
    fn min_build_height(&self) -> i32;

    /// Top of the chunk (exclusive).
    fn max_build_height(&self) -> i32;

    fn block(&self, x: usize, y: i32, z: usize) -> Option<Self::Block>;

    /// Write a block. Out-of-range coordinates are ignored.
    fn set_block(&mut self, x: usize, y: i32, z: usize, block: Self::Block);
}

/// Dense chunk storage: one block per position, Y-major within each column.
#[derive(Clone, Debug)]
pub struct ProtoChunk<B> {
    pos: ChunkPos,
    min_y: i32,
    height: usize,
    blocks: Vec<B>,
}

impl<B: Clone> ProtoChunk<B> {
    /// Create a chunk spanning `min_y..max_y` filled with `fill`.
    pub fn new(pos: ChunkPos, min_y: i32, max_y: i32, fill: B) -> Self {
        let height = (max_y - min_y).max(0) as usize;
        Self {
            pos,
            min_y,
            height,
            blocks: vec![fill; CHUNK_WIDTH * CHUNK_WIDTH * height],
        }
    }

    fn index(&self, x: usize, y: i32, z: usize) -> Option<usize> {
        if x >= CHUNK_WIDTH || z >= CHUNK_WIDTH || y < self.min_y {
            return None;
        }
        let ry = (y - self.min_y) as usize;
        if ry >= self.height {
            return None;
        }
        Some((z * CHUNK_WIDTH + x) * self.height + ry)
    }

    /// Blocks of column (x, z), bottom to top.
    pub fn column(&self, x: usize, z: usize) -> &[B] {
        if x >= CHUNK_WIDTH || z >= CHUNK_WIDTH {
            return &[];
        }
        let start = (z * CHUNK_WIDTH + x) * self.height;
        &self.blocks[start..start + self.height]
    }

    /// Fill column (x, z) from `from_y` (inclusive) to `to_y` (exclusive).
    pub fn fill_column(&mut self, x: usize, z: usize, from_y: i32, to_y: i32, block: B) {
        for y in from_y.max(self.min_y)..to_y.min(self.min_y + self.height as i32) {
            self.set_block(x, y, z, block.clone());
        }
    }
}

impl<B: Clone> ChunkAccess for ProtoChunk<B> {
    type Block = B;

    fn pos(&self) -> ChunkPos {
        self.pos
    }

    fn min_build_height(&self) -> i32 {
        self.min_y
    }

    fn max_build_height(&self) -> i32 {
        self.min_y + self.height as i32
    }

    fn block(&self, x: usize, y: i32, z: usize) -> Option<B> {
        self.index(x, y, z).map(|i| self.blocks[i].clone())
    }

    fn set_block(&mut self, x: usize, y: i32, z: usize, block: B) {
        if let Some(i) = self.index(x, y, z) {
            self.blocks[i] = block;
        }
    }
}
