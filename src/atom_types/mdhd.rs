//! Media header atom (`mdhd`).
//!
//! Similar to `mvhd`,
//! but only describes a single track (`trak`).
//! Specifies the characteristics of a media (`mdia`),
//! including time scale and duration.
//!
//! Location: `moov/trak/mdia/mdhd`
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/media_header_atom>

use binrw::BinRead;
use time::{Duration, PrimitiveDateTime};

use crate::{consts::{mp4_datetime, scaled_duration}, support::versioned_u64};

/// Media header atom ('mdhd'). One per track (`trak`).
///
/// Path: `moov/trak/mdia/mdhd`
#[derive(Debug, Default, Clone, BinRead)]
#[br(big)]
pub struct Mdhd {
    version: u8,
    _flags: [u8; 3],
    /// Seconds since midnight, 1904-01-01 UTC
    #[br(parse_with = versioned_u64, args(version))]
    pub(crate) creation_time: u64,
    /// Seconds since midnight, 1904-01-01 UTC
    #[br(parse_with = versioned_u64, args(version))]
    pub(crate) modification_time: u64,
    /// Number of time units that pass in one second.
    pub(crate) time_scale: u32,
    /// Unscaled duration. I.e. "ticks"
    /// that require dividing by time scale
    /// to derive a value in seconds.
    #[br(parse_with = versioned_u64, args(version))]
    pub(crate) duration: u64,
    /// 1 bit pad 0 then [u5; 3]
    #[br(map = |data: u16| derive_language_code(data))]
    pub(crate) language: String,
    pub(crate) quality: u16,
}

impl Mdhd {
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Creation time as UTC datetime.
    pub fn creation_time(&self) -> Option<PrimitiveDateTime> {
        mp4_datetime(self.creation_time)
    }

    /// Modification time as UTC datetime.
    pub fn modification_time(&self) -> Option<PrimitiveDateTime> {
        mp4_datetime(self.modification_time)
    }

    pub fn time_scale(&self) -> u32 {
        self.time_scale
    }

    pub fn duration_unscaled(&self) -> u64 {
        self.duration
    }

    /// ISO-639-2/T language code
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Playback quality. Should be 0.
    pub fn quality(&self) -> u16 {
        self.quality
    }

    /// Duration of the track.
    /// Zero if time scale is not set.
    pub fn duration(&self) -> Duration {
        scaled_duration(self.duration, self.time_scale)
    }
}

/// Derive three letter ISO639-2/T language code.
///
/// Packed in 16 bits `X u5 u5 u5`:
/// - most significant bit is padding (BE so left most)
/// - 1 `u5` + `0x60`
/// - 1 `u5` + `0x60`
/// - 1 `u5` + `0x60`
fn derive_language_code(data: u16) -> String {
    [
        // value between 0-31 + 96 = ascii range so casting to u8 is ok
        (((0b0111_1100_0000_0000 & data) >> 10) as u8 + 0x60) as char,
        (((0b0000_0011_1110_0000 & data) >> 5) as u8 + 0x60) as char,
        ((0b0000_0000_0001_1111 & data) as u8 + 0x60) as char
    ]
    .iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::derive_language_code;

    #[test]
    fn language() {
        // 'und'
        assert_eq!(derive_language_code(0x55C4), "und");
        // 'eng'
        assert_eq!(derive_language_code(0x15C7), "eng");
    }
}
