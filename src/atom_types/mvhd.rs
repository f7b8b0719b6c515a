//! Movie header atom (`mvhd`).
//!
//! Location: `moov/mvhd`
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/movie_header_atom>

use binrw::BinRead;
use time::{Duration, PrimitiveDateTime};

use crate::{consts::{mp4_datetime, scaled_duration}, support::versioned_u64};

/// Movie header atom (`mvhd`).
///
/// Location: `moov/mvhd`
///
/// Fields following `next_track_id` are not read.
#[derive(Debug, Default, Clone, BinRead)]
#[br(big)]
pub struct Mvhd {
    version: u8,
    _flags: [u8; 3],
    /// Seconds since midnight, 1904-01-01 UTC
    #[br(parse_with = versioned_u64, args(version))]
    pub creation_time: u64,
    /// Seconds since midnight, 1904-01-01 UTC
    #[br(parse_with = versioned_u64, args(version))]
    pub modification_time: u64,
    /// Number of time units that pass in one second
    pub time_scale: u32,
    /// Unscaled duration. I.e. "time units"
    /// that require dividing by time scale
    /// to derive a value in seconds.
    ///
    /// Corresponds to the longest track.
    #[br(parse_with = versioned_u64, args(version))]
    pub duration: u64,
    /// Fixed point number (16.16)
    /// representing preferred play rate
    /// (1.0 = normal playback).
    pub preferred_rate: u32,
    /// Fixed point number (8.8)
    /// representing preferred volume
    /// (1.0 = full volume).
    pub preferred_volume: u16,
    // reserved (10), matrix (36), preview/poster/selection/current time (24)
    #[br(pad_before = 70)]
    pub next_track_id: u32,
}

impl Mvhd {
    /// `0` for 32-bit times and duration, `1` for 64-bit.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Creation time as UTC datetime.
    /// May default to MP4 default time
    /// `1904-01-01 00:00:00` depending on device and settings.
    pub fn creation_time(&self) -> Option<PrimitiveDateTime> {
        mp4_datetime(self.creation_time)
    }

    /// Modification time as UTC datetime.
    pub fn modification_time(&self) -> Option<PrimitiveDateTime> {
        mp4_datetime(self.modification_time)
    }

    /// Duration of the longest track.
    pub fn duration(&self) -> Duration {
        scaled_duration(self.duration, self.time_scale)
    }

    /// Preferred play rate, 1.0 is normal speed.
    pub fn preferred_rate(&self) -> f64 {
        self.preferred_rate as f64 / 2_u32.pow(16) as f64
    }
}
