//! Sample tables for a single track, gathered from its `stbl` atom.

use tracing::trace;

use crate::{Atom, Co64, FourCC, Mp4Error};

/// The tables needed to rebuild a track's sample index,
/// decoded and with run-length and 32-bit variants normalised.
///
/// Atom order within `stbl` varies between devices,
/// so each table is looked up by FourCC.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleTables {
    /// `stts` runs as `(SAMPLE_COUNT, SAMPLE_DURATION)`.
    pub time_to_sample: Vec<(u32, u32)>,
    /// `stsc` runs as `(FIRST_CHUNK, SAMPLES_PER_CHUNK)`,
    /// `FIRST_CHUNK` is 1-based.
    pub sample_to_chunk: Vec<(u32, u32)>,
    /// Absolute chunk offsets from `stco` (widened) or `co64`.
    pub chunk_offsets: Vec<u64>,
    /// `stsz` sample sizes, one per sample,
    /// up to the number of samples in `stts`.
    pub sizes: Vec<u32>,
    /// `stss` 1-based sync sample numbers, ascending.
    /// `None` if the track has no `stss` atom.
    pub sync_samples: Option<Vec<u32>>,
    /// `ctts` composition offsets, one per sample,
    /// up to the number of samples in both `stts` and `stsz`.
    pub composition_offsets: Vec<i32>,
}

impl SampleTables {
    /// Decodes the sample tables in `stbl`.
    /// Absent tables are left empty. Chunk offsets are read from
    /// `stco` and only if that is absent from `co64`.
    pub fn from_stbl(stbl: &Atom) -> Result<Self, Mp4Error> {
        let mut tables = Self::default();

        if let Some(atom) = stbl.find(&FourCC::Stts) {
            tables.time_to_sample = atom.stts()?.table();
        }

        if let Some(atom) = stbl.find(&FourCC::Stsc) {
            tables.sample_to_chunk = atom.stsc()?.table();
        }

        tables.chunk_offsets = match (stbl.find(&FourCC::Stco), stbl.find(&FourCC::Co64)) {
            (Some(stco), _) => Co64::from(stco.stco()?).into_offsets(),
            (None, Some(co64)) => co64.co64()?.into_offsets(),
            (None, None) => Vec::new(),
        };

        if let Some(atom) = stbl.find(&FourCC::Stsz) {
            tables.sizes = atom.stsz()?.expand_to(tables.sample_count());
        }

        if let Some(atom) = stbl.find(&FourCC::Stss) {
            tables.sync_samples = Some(atom.stss()?.into_table());
        }

        if let Some(atom) = stbl.find(&FourCC::Ctts) {
            let limit = tables.sample_count().min(tables.sizes.len());
            tables.composition_offsets = atom.ctts()?.expand_to(limit);
        }

        trace!(
            samples = tables.sample_count(),
            chunks = tables.chunk_offsets.len(),
            sizes = tables.sizes.len(),
            "gathered sample tables"
        );

        Ok(tables)
    }

    /// Number of samples declared by the time to sample table.
    pub fn sample_count(&self) -> usize {
        self.time_to_sample.iter()
            .fold(0_usize, |total, (count, _)| total.saturating_add(*count as usize))
    }
}
