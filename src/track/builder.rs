//! Rebuilds a flat, per-sample index from a track's sample tables.
//!
//! The tables describe samples in compressed form:
//! - `stts`: run-length encoded sample durations
//! - `stsc`: run-length encoded samples per chunk, keyed on first chunk
//! - `stco`/`co64`: absolute offset for each chunk
//! - `stsz`: size for each sample
//! - `stss`: sync samples (keyframes)
//! - `ctts`: composition offsets
//!
//! Samples in a chunk are stored back to back, so a sample's offset is its
//! chunk's offset plus the sizes of the preceding samples in that chunk.
//!
//! See: <https://github.com/essential61/mp4analyser/wiki/Understanding-The-Sample-Tables:-An-Example>

use tracing::{debug, trace};

use crate::Mp4Error;

use super::{AudioSample, Sample, SampleTables, VideoSample};

/// Walks the sample tables of one track in a single pass,
/// advancing one cursor per table.
#[derive(Debug)]
pub struct SampleTableBuilder<'a> {
    tables: &'a SampleTables,
    time_scale: u32,
    video: bool,
    /// Mark all video samples as keyframes
    /// if there is no `stss` atom.
    missing_sync_all_keyframes: bool,
}

impl<'a> SampleTableBuilder<'a> {
    pub fn new(tables: &'a SampleTables, time_scale: u32, video: bool) -> Self {
        Self {
            tables,
            time_scale,
            video,
            missing_sync_all_keyframes: false,
        }
    }

    /// By default a video track without an `stss` atom
    /// has no keyframes. Set to `true` to instead treat every
    /// sample as a keyframe.
    pub fn with_missing_sync_all_keyframes(self, all_keyframes: bool) -> Self {
        Self {
            missing_sync_all_keyframes: all_keyframes,
            ..self
        }
    }

    /// Returns one entry per sample with a non-zero size, in table order.
    pub fn build(&self) -> Result<Vec<Sample>, Mp4Error> {
        let t = self.tables;
        let total = t.sample_count();

        let mut samples: Vec<Sample> = Vec::with_capacity(total.min(t.sizes.len()));

        let mut timestamp: u64 = 0;
        let mut index: usize = 0;
        let mut chunk: usize = 0;
        let mut chunk_bytes: u64 = 0;
        let mut chunk_samples: u32 = 0;
        // 0 means one sample per chunk
        let mut samples_per_chunk: u32 = t.sample_to_chunk.first()
            .map(|(_, n)| *n)
            .unwrap_or(0);
        // next stsc run to apply
        let mut chunk_run: usize = 1;
        let mut sync_cursor: usize = 0;
        let mut dropped: usize = 0;

        for &(count, duration) in t.time_to_sample.iter() {
            for _ in 0 .. count {
                let size = *t.sizes.get(index)
                    .ok_or(Mp4Error::SampleCountMismatch{
                        table: "stsz",
                        len: t.sizes.len(),
                        index
                    })?;

                let chunk_offset = match t.chunk_offsets.get(chunk) {
                    Some(offset) => *offset,
                    None if t.chunk_offsets.is_empty() => {
                        return Err(Mp4Error::MissingChunkOffsets{samples: total})
                    },
                    None => return Err(Mp4Error::SampleCountMismatch{
                        table: "stco",
                        len: t.chunk_offsets.len(),
                        index: chunk
                    }),
                };
                let offset = chunk_offset.saturating_add(chunk_bytes);

                let keyframe = match &t.sync_samples {
                    Some(sync) => {
                        let is_sync = sync.get(sync_cursor)
                            .is_some_and(|n| *n as u64 == index as u64 + 1);
                        if is_sync {
                            sync_cursor += 1;
                        }
                        is_sync
                    },
                    None => self.missing_sync_all_keyframes,
                };

                if size > 0 {
                    let sample = match self.video {
                        true => Sample::Video(VideoSample {
                            timestamp,
                            time_scale: self.time_scale,
                            size,
                            offset,
                            composition_offset: t.composition_offsets.get(index)
                                .copied()
                                .unwrap_or(0),
                            keyframe,
                        }),
                        false => Sample::Audio(AudioSample {
                            timestamp,
                            time_scale: self.time_scale,
                            size,
                            offset,
                        }),
                    };
                    samples.push(sample);
                } else {
                    trace!(index, offset, "dropping zero-size sample");
                    dropped += 1;
                }

                chunk_samples += 1;
                if chunk_samples < samples_per_chunk {
                    chunk_bytes += size as u64;
                } else {
                    chunk_samples = 0;
                    chunk_bytes = 0;
                    chunk += 1;
                    if let Some((first_chunk, n)) = t.sample_to_chunk.get(chunk_run) {
                        // first_chunk is 1-based
                        if chunk as u64 + 1 >= *first_chunk as u64 {
                            samples_per_chunk = *n;
                            chunk_run += 1;
                        }
                    }
                }

                timestamp = timestamp.saturating_add(duration as u64);
                index += 1;
            }
        }

        debug!(
            samples = samples.len(),
            dropped,
            chunks = chunk,
            video = self.video,
            "built sample index"
        );

        Ok(samples)
    }
}
