use std::fmt::Display;

use crate::support::chars_from_bytes;

/// Sample description data format,
/// i.e. the FourCC that opens each description in `stsd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Audio(AudioFormat),
    Video(VideoFormat),
    /// Format not recognised as either audio or video,
    /// e.g. `tmcd` or a codec missing from the lists below.
    Other([u8; 4]),
}

impl Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataFormat::Audio(fmt) => write!(f, "{}", fmt.to_str()),
            DataFormat::Video(fmt) => write!(f, "{}", fmt.to_str()),
            DataFormat::Other(fourcc) => write!(f, "{}", chars_from_bytes(*fourcc).iter().collect::<String>()),
        }
    }
}

impl DataFormat {
    pub(crate) fn new(fourcc: [u8; 4]) -> Self {
        if let Some(fmt) = VideoFormat::from_fourcc(&fourcc) {
            return Self::Video(fmt)
        }
        if let Some(fmt) = AudioFormat::from_fourcc(&fourcc) {
            return Self::Audio(fmt)
        }
        Self::Other(fourcc)
    }

    pub fn is_audio(&self) -> bool {
        matches!(self, Self::Audio(_))
    }

    pub fn is_video(&self) -> bool {
        matches!(self, Self::Video(_))
    }

    pub fn is_other(&self) -> bool {
        matches!(self, Self::Other(_))
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum VideoFormat {
    /// `avc1` H.264 video
    Avc1,
    /// `avc3` H.264 video, parameter sets in band
    Avc3,
    /// `hvc1` H.265 video
    Hvc1,
    /// `hev1` H.265 video, parameter sets in band
    Hev1,
    /// `av01` AV1 video
    Av01,
    /// `vp08` VP8 video
    Vp08,
    /// `vp09` VP9 video
    Vp09,
    /// `mp4v` MPEG-4 video
    Mp4v,
    /// `h263` H.263 video
    H263,
    /// `s263` H.263 video (3GPP)
    S263,
    /// `jpeg` JPEG
    Jpeg,
    /// `mjpa` Motion-JPEG (format A)
    Mjpa,
    /// `mjpb` Motion-JPEG (format B)
    Mjpb,
    /// `apcn` Apple ProRes 422
    Apcn,
    /// `apch` Apple ProRes 422 HQ
    Apch,
    /// `ap4h` Apple ProRes 4444
    Ap4h,
    /// `dvc ` NTSC DV-25 video
    Dvc,
    /// `dvcp` PAL DV-25 video
    Dvcp,
    /// `png ` Portable Network Graphics
    Png,
    /// `raw ` Uncompressed RGB
    Raw,
    /// `2vuy` Uncompressed Y´CbCr, 8-bit-per-component 4:2:2
    TwoVuy,
    /// `yuv2` Uncompressed Y´CbCr, 8-bit-per-component 4:2:2
    Yuv2,
}

impl VideoFormat {
    fn from_fourcc(fourcc: &[u8; 4]) -> Option<Self> {
        let fmt = match fourcc {
            b"avc1" => Self::Avc1,
            b"avc3" => Self::Avc3,
            b"hvc1" => Self::Hvc1,
            b"hev1" => Self::Hev1,
            b"av01" => Self::Av01,
            b"vp08" => Self::Vp08,
            b"vp09" => Self::Vp09,
            b"mp4v" => Self::Mp4v,
            b"h263" => Self::H263,
            b"s263" => Self::S263,
            b"jpeg" => Self::Jpeg,
            b"mjpa" => Self::Mjpa,
            b"mjpb" => Self::Mjpb,
            b"apcn" => Self::Apcn,
            b"apch" => Self::Apch,
            b"ap4h" => Self::Ap4h,
            b"dvc " => Self::Dvc,
            b"dvcp" => Self::Dvcp,
            b"png " => Self::Png,
            b"raw " => Self::Raw,
            b"2vuy" => Self::TwoVuy,
            b"yuv2" => Self::Yuv2,
            _ => return None,
        };
        Some(fmt)
    }

    /// Returns `&str` in the same form
    /// the format is stored, e.g. with added
    /// space if only three characters.
    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Avc1 => "avc1",
            Self::Avc3 => "avc3",
            Self::Hvc1 => "hvc1",
            Self::Hev1 => "hev1",
            Self::Av01 => "av01",
            Self::Vp08 => "vp08",
            Self::Vp09 => "vp09",
            Self::Mp4v => "mp4v",
            Self::H263 => "h263",
            Self::S263 => "s263",
            Self::Jpeg => "jpeg",
            Self::Mjpa => "mjpa",
            Self::Mjpb => "mjpb",
            Self::Apcn => "apcn",
            Self::Apch => "apch",
            Self::Ap4h => "ap4h",
            Self::Dvc => "dvc ",
            Self::Dvcp => "dvcp",
            Self::Png => "png ",
            Self::Raw => "raw ",
            Self::TwoVuy => "2vuy",
            Self::Yuv2 => "yuv2",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AudioFormat {
    /// `mp4a` MPEG-4 audio, e.g. AAC
    Mp4a,
    /// `ac-3` Dolby Digital
    Ac3,
    /// `ec-3` Dolby Digital Plus
    Ec3,
    /// `Opus`
    Opus,
    /// `fLaC`
    Flac,
    /// `alac` Apple Lossless
    Alac,
    /// `.mp3` MPEG-1 layer 3
    Mp3,
    /// `samr` AMR narrowband
    Samr,
    /// `sawb` AMR wideband
    Sawb,
    /// `twos` 16-bit big-endian PCM
    Twos,
    /// `sowt` 16-bit little-endian PCM
    Sowt,
    /// `lpcm` linear PCM
    Lpcm,
    /// `in24` 24-bit integer PCM
    In24,
    /// `in32` 32-bit integer PCM
    In32,
    /// `fl32` 32-bit floating point PCM
    Fl32,
    /// `fl64` 64-bit floating point PCM
    Fl64,
    /// `ulaw` uLaw 2:1
    Ulaw,
    /// `alaw` aLaw 2:1
    Alaw,
    /// `ima4` IMA 4:1
    Ima4,
}

impl AudioFormat {
    fn from_fourcc(fourcc: &[u8; 4]) -> Option<Self> {
        let fmt = match fourcc {
            b"mp4a" => Self::Mp4a,
            b"ac-3" => Self::Ac3,
            b"ec-3" => Self::Ec3,
            b"Opus" => Self::Opus,
            b"fLaC" => Self::Flac,
            b"alac" => Self::Alac,
            b".mp3" => Self::Mp3,
            b"samr" => Self::Samr,
            b"sawb" => Self::Sawb,
            b"twos" => Self::Twos,
            b"sowt" => Self::Sowt,
            b"lpcm" => Self::Lpcm,
            b"in24" => Self::In24,
            b"in32" => Self::In32,
            b"fl32" => Self::Fl32,
            b"fl64" => Self::Fl64,
            b"ulaw" => Self::Ulaw,
            b"alaw" => Self::Alaw,
            b"ima4" => Self::Ima4,
            _ => return None,
        };
        Some(fmt)
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Mp4a => "mp4a",
            Self::Ac3 => "ac-3",
            Self::Ec3 => "ec-3",
            Self::Opus => "Opus",
            Self::Flac => "fLaC",
            Self::Alac => "alac",
            Self::Mp3 => ".mp3",
            Self::Samr => "samr",
            Self::Sawb => "sawb",
            Self::Twos => "twos",
            Self::Sowt => "sowt",
            Self::Lpcm => "lpcm",
            Self::In24 => "in24",
            Self::In32 => "in32",
            Self::Fl32 => "fl32",
            Self::Fl64 => "fl64",
            Self::Ulaw => "ulaw",
            Self::Alaw => "alaw",
            Self::Ima4 => "ima4",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify() {
        assert_eq!(DataFormat::new(*b"avc1"), DataFormat::Video(VideoFormat::Avc1));
        assert_eq!(DataFormat::new(*b"mp4a"), DataFormat::Audio(AudioFormat::Mp4a));
        assert_eq!(DataFormat::new(*b"tmcd"), DataFormat::Other(*b"tmcd"));
        assert_eq!(DataFormat::new(*b"dvc ").to_string(), "dvc ");
        assert_eq!(DataFormat::new(*b"tmcd").to_string(), "tmcd");
    }
}
