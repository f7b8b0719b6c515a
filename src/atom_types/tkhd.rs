//! Track header atom (`tkhd`).
//!
//! Location: `moov/trak[multiple]/tkhd`
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/track_header_atom>

use binrw::BinRead;
use time::PrimitiveDateTime;

use crate::{consts::mp4_datetime, support::versioned_u64};

/// Track header atom (`tkhd`).
///
/// Only the leading fields up to and including
/// the track duration are read.
#[derive(Debug, Default, Clone, BinRead)]
#[br(big)]
pub struct Tkhd {
    version: u8,
    _flags: [u8; 3],
    #[br(parse_with = versioned_u64, args(version))]
    pub(crate) creation_time: u64,
    #[br(parse_with = versioned_u64, args(version))]
    pub(crate) modification_time: u64,
    /// Uniquely identifies the track.
    /// Value 0 cannot be used.
    pub(crate) track_id: u32,
    /// Reserved. Should be set to 0.
    _reserved: u32,
    /// Track duration in the movie's time scale.
    #[br(parse_with = versioned_u64, args(version))]
    pub(crate) duration: u64,
}

impl Tkhd {
    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn track_id(&self) -> u32 {
        self.track_id
    }

    pub fn creation_time(&self) -> Option<PrimitiveDateTime> {
        mp4_datetime(self.creation_time)
    }

    pub fn modification_time(&self) -> Option<PrimitiveDateTime> {
        mp4_datetime(self.modification_time)
    }

    /// This track's duration in movie time scale units.
    pub fn duration(&self) -> u64 {
        self.duration
    }
}
