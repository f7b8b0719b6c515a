//! MP4 atom FourCC.
//! See <https://developer.apple.com/documentation/quicktime-file-format/atoms>.
//! Only the atoms needed to locate and rebuild sample tables are named,
//! anything else is kept as `FourCC::Custom`.

use std::fmt::Display;

/// MP4 atom Four CC.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FourCC {
    /// Chunk offset, 64-bit values
    Co64,
    /// Composition offset atom
    Ctts,
    /// Data information
    Dinf,
    /// Edit atom
    Edts,
    /// Handler reference
    Hdlr,
    /// Media data, interleaved samples
    Mdat,
    /// Media header
    Mdhd,
    Mdia,
    Minf,
    /// Movie Atom
    Moov,
    /// Movie Header Atom
    Mvhd,
    /// Sample table
    Stbl,
    /// Chunk offset, 32-bit values
    Stco,
    /// Sample to chunk
    Stsc,
    /// Sample description
    Stsd,
    /// Sync sample (keyframes)
    Stss,
    /// Sample size
    Stsz,
    /// Time to sample
    Stts,
    /// Track header
    Tkhd,
    /// Track description
    Trak,

    Custom(String)
}

impl Display for FourCC {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FourCC {
    pub fn from_slice(fourcc: &[u8]) -> Self {
        match fourcc {
            b"co64" => Self::Co64,
            b"ctts" => Self::Ctts,
            b"dinf" => Self::Dinf,
            b"edts" => Self::Edts,
            b"hdlr" => Self::Hdlr,
            b"mdat" => Self::Mdat,
            b"mdhd" => Self::Mdhd,
            b"mdia" => Self::Mdia,
            b"minf" => Self::Minf,
            b"moov" => Self::Moov,
            b"mvhd" => Self::Mvhd,
            b"stbl" => Self::Stbl,
            b"stco" => Self::Stco,
            b"stsc" => Self::Stsc,
            b"stsd" => Self::Stsd,
            b"stss" => Self::Stss,
            b"stsz" => Self::Stsz,
            b"stts" => Self::Stts,
            b"tkhd" => Self::Tkhd,
            b"trak" => Self::Trak,
            // UTF-8 does not work for single-byte char above 127
            // but ISO8859-1 mapping works for range 128-255
            _ => Self::Custom(
                fourcc.iter()
                    .map(|n| *n as char)
                    .collect()
            ),
        }
    }

    pub fn from_u32(value: u32) -> Self {
        Self::from_slice(&value.to_be_bytes())
    }

    pub fn from_str(fourcc: &str) -> Self {
        // Custom codes are stored as ISO8859-1 chars,
        // so map back to single bytes before matching.
        let bytes: Vec<u8> = fourcc.chars()
            .map(|c| c as u32 as u8)
            .collect();
        Self::from_slice(&bytes)
    }

    pub fn to_str(&self) -> &str {
        match self {
            Self::Co64 => "co64",
            Self::Ctts => "ctts",
            Self::Dinf => "dinf",
            Self::Edts => "edts",
            Self::Hdlr => "hdlr",
            Self::Mdat => "mdat",
            Self::Mdhd => "mdhd",
            Self::Mdia => "mdia",
            Self::Minf => "minf",
            Self::Moov => "moov",
            Self::Mvhd => "mvhd",
            Self::Stbl => "stbl",
            Self::Stco => "stco",
            Self::Stsc => "stsc",
            Self::Stsd => "stsd",
            Self::Stss => "stss",
            Self::Stsz => "stsz",
            Self::Stts => "stts",
            Self::Tkhd => "tkhd",
            Self::Trak => "trak",
            Self::Custom(s) => s.as_str()
        }
    }
}

impl Default for FourCC {
    fn default() -> Self {
        Self::Custom("None".to_owned())
    }
}
