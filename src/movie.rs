//! Parsed movie: global timing from `mvhd` and all audio and video tracks.

use time::{Duration, PrimitiveDateTime};

use crate::{consts::scaled_duration, Track};

#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    /// Movie time scale. `mvhd.time_scale`
    pub(crate) time_scale: u32,
    /// Unscaled duration of the longest track. `mvhd.duration`
    pub(crate) duration: u64,
    pub(crate) creation_time: PrimitiveDateTime,
    pub(crate) modification_time: PrimitiveDateTime,
    /// Audio and video tracks in file order.
    pub(crate) tracks: Vec<Track>,
}

impl Movie {
    pub fn time_scale(&self) -> u32 {
        self.time_scale
    }

    pub fn duration_unscaled(&self) -> u64 {
        self.duration
    }

    /// Duration of the longest track.
    /// Zero if the movie time scale is not set.
    pub fn duration(&self) -> Duration {
        scaled_duration(self.duration, self.time_scale)
    }

    /// Creation time. MP4 time zero (1904-01-01)
    /// if not set or if there is no `mvhd` atom.
    pub fn creation_time(&self) -> PrimitiveDateTime {
        self.creation_time
    }

    pub fn modification_time(&self) -> PrimitiveDateTime {
        self.modification_time
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }

    /// Returns track with specified track ID.
    pub fn track(&self, id: u32) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id() == id)
    }

    pub fn audio_tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter().filter(|t| t.is_audio())
    }

    pub fn video_tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter().filter(|t| t.is_video())
    }
}
