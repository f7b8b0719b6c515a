//! Sample index entries. Each entry locates one sample in the MP4
//! (absolute byte offset and size) and places it in time.

use time::Duration;

use crate::consts::scaled_duration;

/// Audio sample location and timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSample {
    /// Decode timestamp in track time scale units.
    pub timestamp: u64,
    /// Track time scale, units per second.
    pub time_scale: u32,
    /// Size in bytes.
    pub size: u32,
    /// Absolute byte offset in the MP4.
    pub offset: u64,
}

impl AudioSample {
    /// Decode time since start of track.
    pub fn relative(&self) -> Duration {
        scaled_duration(self.timestamp, self.time_scale)
    }
}

/// Video sample location and timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoSample {
    /// Decode timestamp in track time scale units.
    pub timestamp: u64,
    /// Track time scale, units per second.
    pub time_scale: u32,
    /// Size in bytes.
    pub size: u32,
    /// Absolute byte offset in the MP4.
    pub offset: u64,
    /// Presentation time minus decode time,
    /// in track time scale units.
    pub composition_offset: i32,
    /// Sync sample, i.e. decodable on its own.
    pub keyframe: bool,
}

impl VideoSample {
    /// Decode time since start of track.
    pub fn relative(&self) -> Duration {
        scaled_duration(self.timestamp, self.time_scale)
    }

    /// Presentation timestamp in track time scale units.
    /// May be negative for leading B-frames.
    pub fn presentation_timestamp(&self) -> i64 {
        i64::try_from(self.timestamp)
            .unwrap_or(i64::MAX)
            .saturating_add(self.composition_offset as i64)
    }

    /// Presentation time since start of track.
    pub fn presentation_time(&self) -> Duration {
        let pts = self.presentation_timestamp();
        let duration = scaled_duration(pts.unsigned_abs(), self.time_scale);
        if pts < 0 { -duration } else { duration }
    }
}

/// A single entry in a track's sample index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    Audio(AudioSample),
    Video(VideoSample),
}

impl Sample {
    pub fn timestamp(&self) -> u64 {
        match self {
            Self::Audio(s) => s.timestamp,
            Self::Video(s) => s.timestamp,
        }
    }

    pub fn time_scale(&self) -> u32 {
        match self {
            Self::Audio(s) => s.time_scale,
            Self::Video(s) => s.time_scale,
        }
    }

    pub fn size(&self) -> u32 {
        match self {
            Self::Audio(s) => s.size,
            Self::Video(s) => s.size,
        }
    }

    pub fn offset(&self) -> u64 {
        match self {
            Self::Audio(s) => s.offset,
            Self::Video(s) => s.offset,
        }
    }

    /// Decode time since start of track.
    pub fn relative(&self) -> Duration {
        scaled_duration(self.timestamp(), self.time_scale())
    }

    /// Presentation timestamp in track time scale units.
    /// Equals the decode timestamp for audio.
    pub fn presentation_timestamp(&self) -> i64 {
        match self {
            Self::Audio(s) => i64::try_from(s.timestamp).unwrap_or(i64::MAX),
            Self::Video(s) => s.presentation_timestamp(),
        }
    }

    /// Always `false` for audio.
    pub fn is_keyframe(&self) -> bool {
        match self {
            Self::Audio(_) => false,
            Self::Video(s) => s.keyframe,
        }
    }

    pub fn audio(&self) -> Option<&AudioSample> {
        match self {
            Self::Audio(s) => Some(s),
            Self::Video(_) => None,
        }
    }

    pub fn video(&self) -> Option<&VideoSample> {
        match self {
            Self::Audio(_) => None,
            Self::Video(s) => Some(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presentation() {
        let sample = VideoSample {
            timestamp: 1000,
            time_scale: 1000,
            size: 10,
            offset: 0,
            composition_offset: -2000,
            keyframe: false,
        };
        assert_eq!(sample.relative(), Duration::seconds(1));
        assert_eq!(sample.presentation_timestamp(), -1000);
        assert_eq!(sample.presentation_time(), Duration::seconds(-1));
        assert_eq!(Sample::Video(sample).presentation_timestamp(), -1000);
    }
}
