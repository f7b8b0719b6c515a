//! Core MP4 struct and the assembly of a `Movie` from the `moov` atom.
//!
//! ```rs
//! use mp4index::Mp4;
//! use std::path::Path;
//!
//! fn main() -> Result<(), mp4index::Mp4Error> {
//!     let mut mp4 = Mp4::new(Path::new("VIDEO.MP4"))?;
//!     let movie = mp4.parse()?;
//!
//!     for track in movie.video_tracks() {
//!         let keyframes = track.keyframes().count();
//!         println!("{} {} samples, {keyframes} keyframes", track.codec(), track.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

use std::{io::Cursor, path::Path};

use rayon::prelude::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
use tracing::debug;

use crate::{
    atom_types::HandlerType,
    consts::mp4_time_zero,
    reader::{locate_moov, ByteSource, FileSource},
    track::{AudioInfo, SampleTableBuilder, SampleTables, TrackKind, VideoInfo},
    Atom, FourCC, Movie, Mp4Error, Track,
};

/// Parse options.
#[derive(Debug, Clone, Default)]
pub struct Mp4Options {
    /// `BufReader` capacity when opening a file.
    /// Defaults to 8KiB if `None`.
    pub buffer_capacity: Option<usize>,
    /// Build tracks in parallel.
    pub parallel: bool,
    /// Mark all video samples as keyframes for tracks
    /// without a sync sample atom (`stss`).
    /// If `false` such tracks have no keyframes.
    pub missing_sync_table_all_keyframes: bool,
}

impl Mp4Options {
    pub fn with_buffer_capacity(self, capacity: usize) -> Self {
        Self {
            buffer_capacity: Some(capacity),
            ..self
        }
    }

    pub fn with_parallel(self, parallel: bool) -> Self {
        Self {
            parallel,
            ..self
        }
    }

    pub fn with_missing_sync_table_all_keyframes(self, all_keyframes: bool) -> Self {
        Self {
            missing_sync_table_all_keyframes: all_keyframes,
            ..self
        }
    }
}

/// MP4 backed by a random access byte source,
/// a file by default.
#[derive(Debug)]
pub struct Mp4<S: ByteSource = FileSource> {
    source: S,
    options: Mp4Options,
}

impl Mp4<FileSource> {
    /// Opens MP4 file at `path` with default options.
    pub fn new(path: &Path) -> Result<Self, Mp4Error> {
        Self::open(path, Mp4Options::default())
    }

    /// Opens MP4 file at `path`, using `options.buffer_capacity`
    /// for the file reader.
    pub fn open(path: &Path, options: Mp4Options) -> Result<Self, Mp4Error> {
        let file = std::fs::File::open(path)?;
        let source = FileSource::with_capacity(file, options.buffer_capacity)?;
        Ok(Self{source, options})
    }
}

impl Mp4<Cursor<Vec<u8>>> {
    /// In-memory MP4.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::from_source(Cursor::new(bytes))
    }
}

impl<S: ByteSource> Mp4<S> {
    pub fn from_source(source: S) -> Self {
        Self {
            source,
            options: Mp4Options::default(),
        }
    }

    /// Sets parse options. `buffer_capacity` only takes
    /// effect via `Mp4::open()`.
    pub fn with_options(self, options: Mp4Options) -> Self {
        Self {
            options,
            ..self
        }
    }

    pub fn options(&self) -> &Mp4Options {
        &self.options
    }

    /// Size of the MP4 in bytes.
    pub fn len(&self) -> u64 {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Locates and parses the `moov` atom,
    /// including all nested container atoms.
    pub fn moov(&mut self) -> Result<Atom, Mp4Error> {
        locate_moov(&mut self.source)?
            .ok_or(Mp4Error::MoovReadError)
    }

    /// Parses the MP4 into a `Movie`,
    /// with a complete sample index for each audio and video track.
    pub fn parse(&mut self) -> Result<Movie, Mp4Error> {
        let moov = self.moov()?;
        movie(&moov, &self.options)
    }
}

/// Parses `source` into a `Movie` with default options.
pub fn parse<S: ByteSource>(source: &mut S) -> Result<Movie, Mp4Error> {
    let moov = locate_moov(source)?
        .ok_or(Mp4Error::MoovReadError)?;
    movie(&moov, &Mp4Options::default())
}

/// Assembles a `Movie` from a parsed `moov` atom.
pub fn movie(moov: &Atom, options: &Mp4Options) -> Result<Movie, Mp4Error> {
    let mvhd = moov.find(&FourCC::Mvhd)
        .map(|atom| atom.mvhd())
        .transpose()?;

    let traks = moov.find_all(&FourCC::Trak);

    let tracks: Vec<Option<Track>> = match options.parallel {
        true => traks.par_iter()
            .enumerate()
            .map(|(i, trak)| track(trak, i + 1, options))
            .collect::<Result<_, Mp4Error>>()?,
        false => traks.iter()
            .enumerate()
            .map(|(i, trak)| track(trak, i + 1, options))
            .collect::<Result<_, Mp4Error>>()?,
    };

    let tracks: Vec<Track> = tracks.into_iter().flatten().collect();

    debug!(traks = traks.len(), tracks = tracks.len(), parallel = options.parallel, "assembled movie");

    let movie = match mvhd {
        Some(mvhd) => Movie {
            time_scale: mvhd.time_scale,
            duration: mvhd.duration,
            creation_time: mvhd.creation_time().unwrap_or_else(mp4_time_zero),
            modification_time: mvhd.modification_time().unwrap_or_else(mp4_time_zero),
            tracks,
        },
        None => Movie {
            time_scale: 0,
            duration: 0,
            creation_time: mp4_time_zero(),
            modification_time: mp4_time_zero(),
            tracks,
        },
    };

    Ok(movie)
}

/// Builds an audio or video track from a `trak` atom.
/// `number` is the 1-based position among all `trak` atoms,
/// used as track ID if there is no `tkhd` atom.
///
/// Returns `None` for other kinds of tracks,
/// and for tracks missing required atoms.
fn track(trak: &Atom, number: usize, options: &Mp4Options) -> Result<Option<Track>, Mp4Error> {
    let Some(mdia) = trak.find(&FourCC::Mdia) else {
        debug!(track = number, "no 'mdia', skipping track");
        return Ok(None)
    };

    let (Some(hdlr), Some(mdhd), Some(stbl)) = (
        mdia.find(&FourCC::Hdlr),
        mdia.find(&FourCC::Mdhd),
        mdia.find_path(&[FourCC::Minf, FourCC::Stbl]),
    ) else {
        debug!(track = number, "incomplete 'mdia', skipping track");
        return Ok(None)
    };

    let hdlr = hdlr.hdlr()?;
    let video = match hdlr.handler_type() {
        HandlerType::Video => true,
        HandlerType::Sound => false,
        HandlerType::Other => {
            debug!(track = number, handler = %hdlr.component_sub_type(), "unsupported handler, skipping track");
            return Ok(None)
        }
    };

    let Some(stsd) = stbl.find(&FourCC::Stsd) else {
        debug!(track = number, "no 'stsd', skipping track");
        return Ok(None)
    };
    let stsd = stsd.stsd()?;

    let description = match video {
        true => stsd.video(),
        false => stsd.audio(),
    };
    let Some(description) = description else {
        debug!(track = number, video, "no matching sample description, skipping track");
        return Ok(None)
    };

    let codec = description.data_format().to_string();
    let kind = match video {
        true => {
            let v = description.video()?;
            TrackKind::Video(VideoInfo {
                codec,
                width: v.width(),
                height: v.height(),
                extra_data: v.into_extensions(),
            })
        },
        false => {
            let a = description.audio()?;
            TrackKind::Audio(AudioInfo {
                codec,
                channels: a.channels(),
                sample_rate: a.sample_rate(),
                sample_size: a.sample_size(),
                extra_data: a.into_extensions(),
            })
        },
    };

    let mdhd = mdhd.mdhd()?;

    let id = match trak.find(&FourCC::Tkhd) {
        Some(tkhd) => tkhd.tkhd()?.track_id(),
        None => u32::try_from(number)?,
    };

    let tables = SampleTables::from_stbl(stbl)?;
    let samples = SampleTableBuilder::new(&tables, mdhd.time_scale(), video)
        .with_missing_sync_all_keyframes(options.missing_sync_table_all_keyframes)
        .build()?;

    debug!(track = id, video, samples = samples.len(), "built track");

    Ok(Some(Track {
        id,
        kind,
        time_scale: mdhd.time_scale(),
        duration: mdhd.duration_unscaled(),
        language: mdhd.language().to_owned(),
        samples,
    }))
}
