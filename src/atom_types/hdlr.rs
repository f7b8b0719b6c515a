//! Handler reference atom (`hdlr`).
//!
//! > Note: Distinguish from 'Metadata handler atom' with the same FourCC.
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/handler_reference_atom>

use binrw::{helpers::until_eof, BinRead};

use crate::{consts::{HANDLER_AUDIO, HANDLER_VIDEO}, support::chars_from_bytes};

/// Handler reference atom (`hdlr`)
#[derive(Debug, Default, Clone, BinRead)]
#[br(big)]
pub struct Hdlr {
    _version: u8,
    _flags: [u8; 3],
    /// Possible values:
    /// - `mhlr`: media handler
    /// - `dhlr`: data handler
    /// - `[0, 0, 0, 0]` (MP4, DJI Osmo)
    pub(crate) component_type: [u8; 4],
    /// Four CC for the type of media or data handler,
    /// e.g. `vide`, `soun`.
    pub(crate) component_sub_type: [u8; 4],
    /// Reserved, should be set to 0.
    _reserved: [u32; 3],
    /// May be a counted string (first byte specifies size),
    /// null terminated string, or neither.
    #[br(parse_with = until_eof)]
    pub(crate) component_name: Vec<u8>,
}

impl Hdlr {
    /// Returns component type as `String`.
    pub fn component_type(&self) -> String {
        chars_from_bytes(self.component_type).iter().collect()
    }

    /// Returns component sub type (handler type) as `String`,
    /// e.g. `vide` for video.
    pub fn component_sub_type(&self) -> String {
        chars_from_bytes(self.component_sub_type).iter().collect()
    }

    /// Media kind as declared by the handler type.
    pub fn handler_type(&self) -> HandlerType {
        HandlerType::from(self.component_sub_type)
    }

    /// Handler name. Null bytes are dropped, and a leading
    /// byte count is skipped if it matches the remaining length
    /// (QuickTime counted string).
    pub fn component_name(&self) -> String {
        let name = match self.component_name.split_first() {
            Some((count, rest)) if *count as usize <= rest.len()
                && !count.is_ascii_graphic() => &rest[.. *count as usize],
            _ => self.component_name.as_slice(),
        };
        name.iter()
            .filter(|b| **b != 0)
            .map(|b| *b as char)
            .collect::<String>()
            .trim()
            .to_owned()
    }
}

/// Media kind as declared by the `hdlr` atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandlerType {
    /// `vide`
    Video,
    /// `soun`
    Sound,
    /// Any other handler, e.g. `tmcd`, `meta`, `text`.
    #[default]
    Other
}

impl From<[u8; 4]> for HandlerType {
    fn from(value: [u8; 4]) -> Self {
        match value {
            HANDLER_VIDEO => Self::Video,
            HANDLER_AUDIO => Self::Sound,
            _ => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use binrw::BinReaderExt;

    use super::*;

    fn hdlr_bytes(sub_type: &[u8; 4], name: &[u8]) -> Vec<u8> {
        let mut data = vec![0_u8; 8];
        data.extend_from_slice(sub_type);
        data.extend_from_slice(&[0_u8; 12]);
        data.extend_from_slice(name);
        data
    }

    #[test]
    fn handler() {
        let hdlr: Hdlr = Cursor::new(hdlr_bytes(b"vide", b"VideoHandler\0"))
            .read_be()
            .unwrap();
        assert_eq!(hdlr.handler_type(), HandlerType::Video);
        assert_eq!(hdlr.component_sub_type(), "vide");
        assert_eq!(hdlr.component_name(), "VideoHandler");
    }

    #[test]
    fn counted_name() {
        let hdlr: Hdlr = Cursor::new(hdlr_bytes(b"meta", b"\x0bGoPro MET  "))
            .read_be()
            .unwrap();
        assert_eq!(hdlr.handler_type(), HandlerType::Other);
        assert_eq!(hdlr.component_name(), "GoPro MET");
    }
}
