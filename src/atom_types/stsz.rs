//! Sample size atom (`stsz`).
//!
//! Location: `moov/trak[multiple]/mdia/minf/stbl/stsz`
//!
//! Note that `stsz` lists sample size not chunk size.
//! `stco` or `co64` list chunk offsets, not offsets to individual samples.
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/sample_size_atom>

use binrw::BinRead;

/// Sample size atom (`stsz`).
///
/// A uniform sample size is kept as is. Use `Stsz::expand_to()`
/// for one value per sample.
#[derive(Debug, Default, Clone, BinRead)]
#[br(big)]
pub struct Stsz {
    _version: u8,
    _flags: [u8; 3],
    /// Sample size.
    /// If 0 `no_of_entries` contains
    /// the number of u32 values that should be read,
    /// else all sample sizes should have this value.
    pub(crate) sample_size: u32,
    no_of_entries: u32,
    #[br(if(sample_size == 0))]
    #[br(count = no_of_entries)]
    pub(crate) sizes: Vec<u32>
}

impl Stsz {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.no_of_entries as usize
    }

    pub fn is_empty(&self) -> bool {
        self.no_of_entries == 0
    }

    /// Uniform sample size, or `0` if
    /// sizes are listed per sample.
    pub fn sample_size(&self) -> u32 {
        self.sample_size
    }

    /// Per-sample sizes as listed in the atom.
    /// Empty if the sample size is uniform.
    pub fn sizes(&self) -> &[u32] {
        &self.sizes
    }

    /// Returns one size in bytes per sample,
    /// stopping after `limit` values.
    pub fn expand_to(self, limit: usize) -> Vec<u32> {
        match self.sample_size {
            0 => {
                let mut sizes = self.sizes;
                sizes.truncate(limit);
                sizes
            },
            size => vec![size; self.len().min(limit)],
        }
    }
}
