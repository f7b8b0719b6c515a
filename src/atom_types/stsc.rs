//! Sample to chunk atom (`stsc`)
//!
//! Location: `moov/trak[multiple]/mdia/minf/stbl/stsc`
//!
//! See:
//! - Sample to chunk atom: <https://developer.apple.com/documentation/quicktime-file-format/sample-to-chunk_atom>
//! - <https://github.com/essential61/mp4analyser/wiki/Understanding-The-Sample-Tables:-An-Example>

use binrw::BinRead;

/// Sample to chunk atom (`stsc`)
#[derive(Debug, Default, Clone, BinRead)]
#[br(big)]
pub struct Stsc {
    _version: u8,
    _flags: [u8; 3],
    _no_of_entries: u32,
    #[br(count = _no_of_entries)]
    sample_to_chunk_table: Vec<SampleToChunk>,
}

impl Stsc {
    pub fn len(&self) -> usize {
        self.sample_to_chunk_table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sample_to_chunk_table.is_empty()
    }

    /// Returns the sample to chunk table as tuples,
    /// `(FIRST_CHUNK, SAMPLES_PER_CHUNK)`.
    /// `FIRST_CHUNK` is a 1-based index.
    pub fn table(&self) -> Vec<(u32, u32)> {
        self.sample_to_chunk_table.iter()
            .map(|s| (s.first_chunk, s.samples_per_chunk))
            .collect()
    }
}

#[derive(Debug, Clone, BinRead)]
#[br(big)]
pub struct SampleToChunk {
    /// 1-based index of first chunk
    /// that contains the number of
    /// samples specified in `samples_per_chunk`.
    /// The following chunks will all contain the
    /// same number of samples until the next
    /// sample to chunk entry.
    pub(crate) first_chunk: u32,
    /// Number of samples for chunk number
    /// specified by `first_chunk` and on,
    /// until the next sample to chunk entry.
    pub(crate) samples_per_chunk: u32,
    /// Not needed to locate samples.
    _sample_description_id: u32,
}
