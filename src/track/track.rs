//! An MP4 audio or video track, with codec information
//! and a complete sample index.

use time::Duration;

use crate::consts::scaled_duration;

use super::Sample;

/// Audio track codec information,
/// from the first audio sample description (`stsd`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioInfo {
    /// Sample description data format, e.g. `mp4a`.
    pub codec: String,
    pub channels: u16,
    /// Samples per second.
    pub sample_rate: u32,
    /// Bits per sample.
    pub sample_size: u16,
    /// Codec configuration as raw bytes,
    /// i.e. the extension atoms following the
    /// sound description (e.g. `esds`).
    pub extra_data: Vec<u8>,
}

/// Video track codec information,
/// from the first video sample description (`stsd`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoInfo {
    /// Sample description data format, e.g. `avc1`.
    pub codec: String,
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
    /// Codec configuration as raw bytes,
    /// i.e. the extension atoms following the
    /// video description (e.g. `avcC`).
    pub extra_data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrackKind {
    Audio(AudioInfo),
    Video(VideoInfo),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Track ID. `tkhd.track_id`
    pub(crate) id: u32,
    pub(crate) kind: TrackKind,
    /// Track time scale. `mdhd.time_scale`
    pub(crate) time_scale: u32,
    /// Unscaled duration. `mdhd.duration`
    pub(crate) duration: u64,
    /// ISO-639-2/T language code. `mdhd.language`
    pub(crate) language: String,
    pub(crate) samples: Vec<Sample>,
}

impl Track {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn kind(&self) -> &TrackKind {
        &self.kind
    }

    pub fn is_audio(&self) -> bool {
        matches!(self.kind, TrackKind::Audio(_))
    }

    pub fn is_video(&self) -> bool {
        matches!(self.kind, TrackKind::Video(_))
    }

    pub fn audio_info(&self) -> Option<&AudioInfo> {
        match &self.kind {
            TrackKind::Audio(info) => Some(info),
            TrackKind::Video(_) => None,
        }
    }

    pub fn video_info(&self) -> Option<&VideoInfo> {
        match &self.kind {
            TrackKind::Audio(_) => None,
            TrackKind::Video(info) => Some(info),
        }
    }

    /// Codec FourCC, e.g. `avc1` or `mp4a`.
    pub fn codec(&self) -> &str {
        match &self.kind {
            TrackKind::Audio(info) => &info.codec,
            TrackKind::Video(info) => &info.codec,
        }
    }

    pub fn time_scale(&self) -> u32 {
        self.time_scale
    }

    pub fn duration_unscaled(&self) -> u64 {
        self.duration
    }

    /// Track duration. Zero if the time scale is not set.
    pub fn duration(&self) -> Duration {
        scaled_duration(self.duration, self.time_scale)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Sample index, in decode order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Keyframes. Always empty for audio tracks.
    pub fn keyframes(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter().filter(|s| s.is_keyframe())
    }

    /// Number of samples in track.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Summed sample size in bytes.
    pub fn size(&self) -> u64 {
        self.samples.iter()
            .map(|s| s.size() as u64)
            .sum()
    }
}
