//! Chunk offset atom for file sizes above the 32bit limit (`co64`).
//! The 64-bit equivalent of the `stco` atom.
//!
//! Path: `moov/trak[multiple]/mdia/minf/stbl/co64`

use binrw::BinRead;

use crate::Stco;

/// Chunk offset atom for file sizes above the 32bit limit (`co64`).
/// The 64-bit equivalent of the `stco` atom.
///
/// Path: `moov/trak/mdia/minf/stbl/co64`
#[derive(Debug, Default, BinRead, Clone)]
#[br(big)]
pub struct Co64 {
    _version: u8,
    _flags: [u8; 3],
    _no_of_entries: u32,
    #[br(count = _no_of_entries)]
    offsets: Vec<u64>
}

impl Co64 {
    /// Returns number of chunks.
    /// (each chunk corresponds to one or more samples).
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Returns chunk byte offsets.
    /// (each chunk corresponds to one or more samples).
    pub fn offsets(&self) -> &[u64] {
        &self.offsets
    }

    /// Consumes `Co64` and returns chunk byte offsets.
    pub fn into_offsets(self) -> Vec<u64> {
        self.offsets
    }
}

/// Widens 32-bit offsets so that `stco` and `co64`
/// can be treated the same way.
impl From<Stco> for Co64 {
    fn from(value: Stco) -> Self {
        Self {
            _version: value.version,
            _flags: value.flags,
            _no_of_entries: value.no_of_entries,
            offsets: value.offsets
                .iter()
                .map(|n| *n as u64)
                .collect()
        }
    }
}
