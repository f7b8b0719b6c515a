//! Sync sample atom (`stss`). Lists keyframes.
//!
//! Location: `moov/trak[multiple]/mdia/minf/stbl/stss`
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/sync_sample_atom>

use binrw::BinRead;

/// Sync sample atom (`stss`).
#[derive(Debug, Default, Clone, BinRead)]
#[br(big)]
pub struct Stss {
    _version: u8,
    _flags: [u8; 3],
    number_of_entries: u32,
    /// Ascending, 1-based sample numbers.
    #[br(count = number_of_entries)]
    pub(crate) sync_sample_table: Vec<u32>
}

impl Stss {
    pub fn len(&self) -> usize {
        self.sync_sample_table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sync_sample_table.is_empty()
    }

    /// 1-based sample numbers for keyframes.
    pub fn sync_sample_table(&self) -> &[u32] {
        &self.sync_sample_table
    }

    pub fn into_table(self) -> Vec<u32> {
        self.sync_sample_table
    }
}
