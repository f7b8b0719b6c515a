//! Composition offset atom (`ctts`).
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/composition_offset_atom>

use binrw::BinRead;

/// Composition offset atom (`ctts`).
///
/// Version 0 declares unsigned offsets, version 1 signed ones.
/// Both are read as `i32`, since encoders commonly write
/// negative offsets into version 0 atoms as well.
#[derive(Debug, Default, Clone, BinRead)]
#[br(big)]
pub struct Ctts {
    _version: u8,
    _flags: [u8; 3],
    _entry_count: u32,
    #[br(count = _entry_count)]
    offset_table: Vec<OffsetTableEntry>
}

impl Ctts {
    pub fn offset_table(&self) -> &[OffsetTableEntry] {
        &self.offset_table
    }

    /// Number of samples covered by the table.
    pub fn len(&self) -> usize {
        self.offset_table.iter()
            .map(|e| e.sample_count as usize)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expands the run-length encoded table into one composition
    /// offset per sample, indexable by 0-based sample number.
    pub fn expand(&self) -> Vec<i32> {
        self.expand_to(usize::MAX)
    }

    /// As [`Ctts::expand`], but stops after `limit` offsets.
    pub fn expand_to(&self, limit: usize) -> Vec<i32> {
        self.offset_table.iter()
            .flat_map(|e| std::iter::repeat(e.composition_offset).take(e.sample_count as usize))
            .take(limit)
            .collect()
    }
}

/// Composition offset table entry.
#[derive(Debug, Clone, Copy, BinRead)]
#[br(big)]
pub struct OffsetTableEntry {
    pub sample_count: u32,
    pub composition_offset: i32
}
