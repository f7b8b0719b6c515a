//! Chunk offset atom for file sizes below the 32bit limit (`stco`).
//!
//! Location: `moov/trak[multiple]/mdia/minf/stbl/stco`
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/chunk_offset_atom>

use binrw::BinRead;

/// Chunk offset atom for file sizes below the 32bit limit (`stco`).
#[derive(Debug, Default, BinRead, Clone)]
#[br(big)]
pub struct Stco {
    pub(crate) version: u8,
    pub(crate) flags: [u8; 3],
    pub(crate) no_of_entries: u32,
    /// Chunk offset table consisting of an array of offset values.
    #[br(count = no_of_entries)]
    pub(crate) offsets: Vec<u32>
}

impl Stco {
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// Returns chunk offset with specified 0-based index.
    pub fn get(&self, chunk_index: usize) -> Option<&u32> {
        self.offsets.get(chunk_index)
    }
}
