use time::{self, Duration, PrimitiveDateTime, Month};

use crate::FourCC;

/// FourCC:s for known "container" atoms.
/// These are nested and contain more atoms,
/// within their specified, total size.
/// Any atom not listed here is kept as raw bytes.
///
/// - `moov`: offset tables, timing, metadata
/// - `trak`: moov.trak (multiple)
/// - `edts`: moov.trak.edts
/// - `mdia`: moov.trak.mdia
/// - `minf`: moov.trak.mdia.minf
/// - `dinf`: moov.trak.mdia.minf.dinf
/// - `stbl`: moov.trak.mdia.minf.stbl, contains timing (stts), offsets (stco)
///
/// `udta` is deliberately absent, since some devices pad it
/// with data that is not laid out as atoms.
pub const CONTAINER: [FourCC; 7] = [
    FourCC::Moov,
    FourCC::Trak,
    FourCC::Edts,
    FourCC::Mdia,
    FourCC::Minf,
    FourCC::Dinf,
    FourCC::Stbl,
];

/// Handler type for video tracks (`hdlr` atom).
pub const HANDLER_VIDEO: [u8; 4] = *b"vide";
/// Handler type for audio tracks (`hdlr` atom).
pub const HANDLER_AUDIO: [u8; 4] = *b"soun";

/// Time zero for MP4 containers. Midnight January 1, 1904.
pub fn mp4_time_zero() -> PrimitiveDateTime {
    // 1904-01-01 is within range for `time::Date`
    // so construction can not fail.
    PrimitiveDateTime::new(
        time::Date::from_calendar_date(1904, Month::January, 1)
            .unwrap_or(time::Date::MIN),
        time::Time::MIDNIGHT,
    )
}

/// Datetime from seconds since MP4 time zero.
/// `None` if the result is out of range.
pub fn mp4_datetime(seconds: u64) -> Option<PrimitiveDateTime> {
    let seconds = i64::try_from(seconds).ok()?;
    mp4_time_zero().checked_add(Duration::seconds(seconds))
}

/// Converts `units` in `time_scale` units per second to `Duration`.
/// Zero if time scale is not set. Saturates at `Duration::MAX`.
pub fn scaled_duration(units: u64, time_scale: u32) -> Duration {
    if time_scale == 0 {
        return Duration::ZERO
    }
    let ts = time_scale as u64;
    let Ok(seconds) = i64::try_from(units / ts) else {
        return Duration::MAX
    };
    // remainder < time scale, so nanos < 1_000_000_000
    let nanos = ((units % ts) as u128 * 1_000_000_000 / ts as u128) as i32;
    Duration::new(seconds, nanos)
}
