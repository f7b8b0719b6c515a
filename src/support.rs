use binrw::{BinRead, BinResult};

/// Single-byte chars from `[u8; 4]`.
/// Maps 0-255 to `char`, exceeding ascii.
pub(crate) fn chars_from_bytes(bytes: [u8; 4]) -> [char; 4] {
    [
        bytes[0] as char,
        bytes[1] as char,
        bytes[2] as char,
        bytes[3] as char,
    ]
}

/// Counted string (first byte is the byte count).
/// Null bytes are dropped if `ignore_null` is set.
/// A count exceeding the buffer is clamped.
pub(crate) fn counted_string(bytes: &[u8], ignore_null: bool) -> String {
    let Some(count) = bytes.first() else {
        return String::new()
    };
    let end = (*count as usize + 1).min(bytes.len());
    bytes[1 .. end].iter()
        .filter(|b| !(ignore_null && **b == 0))
        .map(|b| *b as char)
        .collect()
}

/// Reads a time or duration field that is 32 bits wide
/// for version 0 atoms, and 64 bits wide for version 1
/// (e.g. `mvhd`, `tkhd`, `mdhd`).
#[binrw::parser(reader, endian)]
pub(crate) fn versioned_u64(version: u8) -> BinResult<u64> {
    match version {
        1 => u64::read_options(reader, endian, ()),
        _ => Ok(u32::read_options(reader, endian, ())? as u64),
    }
}
