use std::io::Cursor;

use binrw::BinReaderExt;
use time::Duration;

use crate::{
    locate_moov, mp4_time_zero, parse, AtomBody, ByteSource, Ctts, FourCC, Mp4, Mp4Error,
    Mp4Options, Sample, SampleTableBuilder, SampleTables, Stsz, Tkhd, TrackKind,
};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Big-endian byte writer for building MP4 fixtures.
#[derive(Default)]
struct Be(Vec<u8>);

impl Be {
    fn u16(mut self, value: u16) -> Self {
        self.0.extend_from_slice(&value.to_be_bytes());
        self
    }

    fn u32(mut self, value: u32) -> Self {
        self.0.extend_from_slice(&value.to_be_bytes());
        self
    }

    fn u64(mut self, value: u64) -> Self {
        self.0.extend_from_slice(&value.to_be_bytes());
        self
    }

    fn i32(mut self, value: i32) -> Self {
        self.0.extend_from_slice(&value.to_be_bytes());
        self
    }

    fn bytes(mut self, value: &[u8]) -> Self {
        self.0.extend_from_slice(value);
        self
    }

    fn zeros(mut self, n: usize) -> Self {
        self.0.resize(self.0.len() + n, 0);
        self
    }
}

fn atom(name: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    Be::default()
        .u32(8 + payload.len() as u32)
        .bytes(name)
        .bytes(payload)
        .0
}

/// Atom with 64-bit size field.
fn atom64(name: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    Be::default()
        .u32(1)
        .bytes(name)
        .u64(16 + payload.len() as u64)
        .bytes(payload)
        .0
}

fn container(name: &[u8; 4], children: &[Vec<u8>]) -> Vec<u8> {
    atom(name, &children.concat())
}

/// Version 0, no flags.
fn full() -> Be {
    Be::default().u32(0)
}

fn ftyp() -> Vec<u8> {
    atom(b"ftyp", b"isom\0\0\x02\0isomiso2")
}

fn mvhd(time_scale: u32, duration: u32) -> Vec<u8> {
    let payload = full()
        .u32(3600) // creation time
        .u32(7200) // modification time
        .u32(time_scale)
        .u32(duration)
        .u32(0x0001_0000)
        .u16(0x0100)
        .zeros(70)
        .u32(3)
        .0;
    atom(b"mvhd", &payload)
}

fn tkhd(id: u32) -> Vec<u8> {
    let payload = full()
        .u32(0)
        .u32(0)
        .u32(id)
        .u32(0)
        .u32(5000)
        .zeros(60)
        .0;
    atom(b"tkhd", &payload)
}

fn mdhd(time_scale: u32, duration: u32) -> Vec<u8> {
    let payload = full()
        .u32(0)
        .u32(0)
        .u32(time_scale)
        .u32(duration)
        .u16(0x15C7) // eng
        .u16(0)
        .0;
    atom(b"mdhd", &payload)
}

fn hdlr(sub_type: &[u8; 4], name: &[u8]) -> Vec<u8> {
    let payload = full()
        .u32(0)
        .bytes(sub_type)
        .zeros(12)
        .bytes(name)
        .0;
    atom(b"hdlr", &payload)
}

fn stsd_video(format: &[u8; 4], width: u16, height: u16, extensions: &[u8]) -> Vec<u8> {
    let mut compressor = [0_u8; 32];
    compressor[0] = 4;
    compressor[1 .. 5].copy_from_slice(b"h264");

    let description = Be::default()
        .u32(16 + 70 + extensions.len() as u32)
        .bytes(format)
        .zeros(6)
        .u16(1)
        .u16(0) // version
        .u16(0) // revision
        .u32(0) // vendor
        .u32(0) // temporal quality
        .u32(0) // spatial quality
        .u16(width)
        .u16(height)
        .u32(72 << 16)
        .u32(72 << 16)
        .u32(0) // data size
        .u16(1) // frame count
        .bytes(&compressor)
        .u16(24) // depth
        .u16(0xFFFF) // color table id -1
        .bytes(extensions)
        .0;
    atom(b"stsd", &full().u32(1).bytes(&description).0)
}

fn stsd_audio(format: &[u8; 4], channels: u16, sample_size: u16, sample_rate: u32, extensions: &[u8]) -> Vec<u8> {
    let description = Be::default()
        .u32(16 + 20 + extensions.len() as u32)
        .bytes(format)
        .zeros(6)
        .u16(1)
        .u16(0) // version
        .u16(0) // revision
        .u32(0) // vendor
        .u16(channels)
        .u16(sample_size)
        .u16(0) // compression id
        .u16(0) // packet size
        .u32(sample_rate << 16)
        .bytes(extensions)
        .0;
    atom(b"stsd", &full().u32(1).bytes(&description).0)
}

fn stts(runs: &[(u32, u32)]) -> Vec<u8> {
    let payload = runs.iter()
        .fold(full().u32(runs.len() as u32), |be, (n, d)| be.u32(*n).u32(*d));
    atom(b"stts", &payload.0)
}

fn stsc(runs: &[(u32, u32)]) -> Vec<u8> {
    let payload = runs.iter()
        .fold(full().u32(runs.len() as u32), |be, (first, n)| be.u32(*first).u32(*n).u32(1));
    atom(b"stsc", &payload.0)
}

fn stsz(sizes: &[u32]) -> Vec<u8> {
    let payload = sizes.iter()
        .fold(full().u32(0).u32(sizes.len() as u32), |be, s| be.u32(*s));
    atom(b"stsz", &payload.0)
}

fn stsz_uniform(size: u32, count: u32) -> Vec<u8> {
    atom(b"stsz", &full().u32(size).u32(count).0)
}

fn stco(offsets: &[u32]) -> Vec<u8> {
    let payload = offsets.iter()
        .fold(full().u32(offsets.len() as u32), |be, o| be.u32(*o));
    atom(b"stco", &payload.0)
}

fn co64(offsets: &[u64]) -> Vec<u8> {
    let payload = offsets.iter()
        .fold(full().u32(offsets.len() as u32), |be, o| be.u64(*o));
    atom(b"co64", &payload.0)
}

fn stss(numbers: &[u32]) -> Vec<u8> {
    let payload = numbers.iter()
        .fold(full().u32(numbers.len() as u32), |be, n| be.u32(*n));
    atom(b"stss", &payload.0)
}

fn ctts(runs: &[(u32, i32)]) -> Vec<u8> {
    let payload = runs.iter()
        .fold(full().u32(runs.len() as u32), |be, (n, o)| be.u32(*n).i32(*o));
    atom(b"ctts", &payload.0)
}

fn avcc() -> Vec<u8> {
    atom(b"avcC", &[1, 100, 0, 31])
}

fn esds() -> Vec<u8> {
    atom(b"esds", &[0, 0, 0, 0, 3, 25])
}

/// H.264 track, 5 samples in 3 chunks (2, 2, 1),
/// keyframes at sample 1 and 4 (1-based).
fn video_trak() -> Vec<u8> {
    container(b"trak", &[
        tkhd(7),
        container(b"mdia", &[
            mdhd(30_000, 5_000),
            hdlr(b"vide", b"VideoHandler\0"),
            container(b"minf", &[
                atom(b"vmhd", &[0; 12]),
                container(b"dinf", &[atom(b"dref", &full().u32(0).0)]),
                container(b"stbl", &[
                    stsd_video(b"avc1", 1920, 1080, &avcc()),
                    stts(&[(5, 1000)]),
                    ctts(&[(1, 1000), (1, 2000), (3, 0)]),
                    stss(&[1, 4]),
                    stsc(&[(1, 2), (3, 1)]),
                    stsz(&[10, 20, 30, 40, 50]),
                    stco(&[1000, 2000, 3000]),
                ]),
            ]),
        ]),
    ])
}

/// AAC track without `tkhd`, 4 samples of 200 bytes
/// in a single chunk above the 32-bit limit.
fn audio_trak() -> Vec<u8> {
    container(b"trak", &[
        container(b"mdia", &[
            mdhd(48_000, 4096),
            hdlr(b"soun", b"SoundHandler\0"),
            container(b"minf", &[
                atom(b"smhd", &[0; 8]),
                container(b"stbl", &[
                    stsd_audio(b"mp4a", 2, 16, 48_000, &esds()),
                    stts(&[(4, 1024)]),
                    stsc(&[(1, 4)]),
                    stsz_uniform(200, 4),
                    co64(&[0x1_0000_0000]),
                ]),
            ]),
        ]),
    ])
}

/// Timecode track. Not audio or video.
fn tmcd_trak() -> Vec<u8> {
    container(b"trak", &[
        tkhd(9),
        container(b"mdia", &[
            mdhd(30_000, 5_000),
            hdlr(b"tmcd", b"TimeCodeHandler\0"),
            container(b"minf", &[
                container(b"stbl", &[
                    stts(&[(1, 5000)]),
                    stsz(&[4]),
                    stco(&[4000]),
                ]),
            ]),
        ]),
    ])
}

fn moov() -> Vec<u8> {
    container(b"moov", &[
        mvhd(1000, 5000),
        video_trak(),
        audio_trak(),
        tmcd_trak(),
        // not laid out as atoms, kept as leaf
        atom(b"udta", b"\0\0\0\0vendor data"),
    ])
}

fn mp4_file() -> Vec<u8> {
    [ftyp(), atom(b"mdat", &[0_u8; 64]), moov()].concat()
}

fn tables(
    time_to_sample: &[(u32, u32)],
    sample_to_chunk: &[(u32, u32)],
    chunk_offsets: &[u64],
    sizes: &[u32],
) -> SampleTables {
    SampleTables {
        time_to_sample: time_to_sample.to_vec(),
        sample_to_chunk: sample_to_chunk.to_vec(),
        chunk_offsets: chunk_offsets.to_vec(),
        sizes: sizes.to_vec(),
        ..SampleTables::default()
    }
}

/// Records every read, to check which bytes are touched.
struct RecordingSource {
    inner: Cursor<Vec<u8>>,
    reads: Vec<(u64, usize)>,
}

impl ByteSource for RecordingSource {
    fn len(&self) -> u64 {
        ByteSource::len(&self.inner)
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Mp4Error> {
        let n = self.inner.read_at(offset, buf)?;
        self.reads.push((offset, n));
        Ok(n)
    }
}

#[test]
fn zero_size_sample_dropped() {
    let t = tables(&[(3, 1000)], &[(1, 3)], &[500], &[10, 0, 20]);
    let samples = SampleTableBuilder::new(&t, 1000, false).build().unwrap();

    assert_eq!(samples.len(), 2);
    assert_eq!((samples[0].timestamp(), samples[0].size(), samples[0].offset()), (0, 10, 500));
    assert_eq!((samples[1].timestamp(), samples[1].size(), samples[1].offset()), (2000, 20, 510));
    assert_eq!(samples[1].relative(), Duration::seconds(2));
}

#[test]
fn chunk_rollover() {
    let sizes = [1_u32; 12];
    let t = tables(&[(12, 1)], &[(1, 5)], &[100, 200, 300], &sizes);
    let samples = SampleTableBuilder::new(&t, 1, false).build().unwrap();

    let offsets: Vec<u64> = samples.iter().map(|s| s.offset()).collect();
    assert_eq!(offsets, vec![
        100, 101, 102, 103, 104,
        200, 201, 202, 203, 204,
        300, 301,
    ]);
}

#[test]
fn chunk_runs() {
    let t = tables(&[(5, 1)], &[(1, 2), (3, 1)], &[100, 200, 300, 400], &[1, 2, 3, 4, 5]);
    let samples = SampleTableBuilder::new(&t, 1, false).build().unwrap();

    let offsets: Vec<u64> = samples.iter().map(|s| s.offset()).collect();
    assert_eq!(offsets, vec![100, 101, 200, 203, 300]);
}

#[test]
fn one_sample_per_chunk_without_stsc() {
    let t = tables(&[(3, 1)], &[], &[10, 20, 30], &[4, 4, 4]);
    let samples = SampleTableBuilder::new(&t, 1, false).build().unwrap();

    let offsets: Vec<u64> = samples.iter().map(|s| s.offset()).collect();
    assert_eq!(offsets, vec![10, 20, 30]);
}

#[test]
fn keyframes_from_sync_table() {
    let mut t = tables(&[(5, 1)], &[(1, 5)], &[0], &[1; 5]);
    t.sync_samples = Some(vec![1, 4]);
    let samples = SampleTableBuilder::new(&t, 1, true).build().unwrap();

    let keyframes: Vec<bool> = samples.iter().map(|s| s.is_keyframe()).collect();
    assert_eq!(keyframes, vec![true, false, false, true, false]);
}

#[test]
fn missing_sync_table() {
    let t = tables(&[(3, 1)], &[(1, 3)], &[0], &[1; 3]);

    let samples = SampleTableBuilder::new(&t, 1, true).build().unwrap();
    assert!(samples.iter().all(|s| !s.is_keyframe()));

    let samples = SampleTableBuilder::new(&t, 1, true)
        .with_missing_sync_all_keyframes(true)
        .build()
        .unwrap();
    assert!(samples.iter().all(|s| s.is_keyframe()));
}

#[test]
fn composition_offsets() {
    let mut t = tables(&[(3, 10)], &[(1, 3)], &[0], &[1; 3]);
    // shorter than the sample count
    t.composition_offsets = vec![20, -10];
    let samples = SampleTableBuilder::new(&t, 1, true).build().unwrap();

    let offsets: Vec<i32> = samples.iter()
        .filter_map(|s| s.video())
        .map(|v| v.composition_offset)
        .collect();
    assert_eq!(offsets, vec![20, -10, 0]);
    assert_eq!(samples[1].presentation_timestamp(), 0);
}

#[test]
fn empty_time_to_sample() {
    let t = tables(&[], &[], &[], &[10, 20]);
    let samples = SampleTableBuilder::new(&t, 1000, true).build().unwrap();
    assert!(samples.is_empty());
}

#[test]
fn missing_chunk_offsets() {
    let t = tables(&[(2, 1)], &[(1, 2)], &[], &[10, 20]);
    let result = SampleTableBuilder::new(&t, 1000, false).build();
    assert!(matches!(result, Err(Mp4Error::MissingChunkOffsets{samples: 2})));
}

#[test]
fn too_few_sizes() {
    let t = tables(&[(3, 1)], &[(1, 3)], &[0], &[10, 20]);
    let result = SampleTableBuilder::new(&t, 1000, false).build();
    assert!(matches!(result, Err(Mp4Error::SampleCountMismatch{table: "stsz", len: 2, index: 2})));
}

#[test]
fn too_few_chunks() {
    let t = tables(&[(3, 1)], &[(1, 1)], &[0, 10], &[1, 1, 1]);
    let result = SampleTableBuilder::new(&t, 1000, false).build();
    assert!(matches!(result, Err(Mp4Error::SampleCountMismatch{table: "stco", len: 2, index: 2})));
}

#[test]
fn timestamps_and_sizes() {
    let runs = [(2, 100), (3, 50)];
    let sizes = [5, 0, 7, 0, 9];
    let t = tables(&runs, &[(1, 1)], &[0, 10, 20, 30, 40], &sizes);
    let samples = SampleTableBuilder::new(&t, 1000, false).build().unwrap();

    // prefix sum of durations, skipping dropped samples
    let mut expected = Vec::new();
    let mut ts = 0;
    let durations = runs.iter().flat_map(|(n, d)| std::iter::repeat(*d as u64).take(*n as usize));
    for (size, duration) in sizes.iter().zip(durations) {
        if *size > 0 {
            expected.push(ts);
        }
        ts += duration;
    }

    let timestamps: Vec<u64> = samples.iter().map(|s| s.timestamp()).collect();
    assert_eq!(timestamps, expected);
    assert_eq!(timestamps, vec![0, 200, 300]);
    assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));

    let emitted: u64 = samples.iter().map(|s| s.size() as u64).sum();
    let total: u64 = sizes.iter().map(|s| *s as u64).sum();
    assert_eq!(emitted, total);
}

#[test]
fn parse_movie() {
    init_logging();
    let movie = parse(&mut Cursor::new(mp4_file())).unwrap();

    assert_eq!(movie.time_scale(), 1000);
    assert_eq!(movie.duration(), Duration::seconds(5));
    assert_eq!(movie.creation_time(), mp4_time_zero() + Duration::hours(1));
    assert_eq!(movie.modification_time(), mp4_time_zero() + Duration::hours(2));
    // tmcd track skipped
    assert_eq!(movie.tracks().len(), 2);
    assert_eq!(movie.video_tracks().count(), 1);
    assert_eq!(movie.audio_tracks().count(), 1);

    let video = movie.track(7).unwrap();
    assert!(video.is_video());
    assert_eq!(video.codec(), "avc1");
    assert_eq!(video.time_scale(), 30_000);
    assert_eq!(video.duration_unscaled(), 5000);
    assert_eq!(video.language(), "eng");
    match video.kind() {
        TrackKind::Video(info) => {
            assert_eq!((info.width, info.height), (1920, 1080));
            assert_eq!(info.extra_data, avcc());
        },
        kind => panic!("expected video, got {kind:?}"),
    }

    let offsets: Vec<u64> = video.samples().iter().map(|s| s.offset()).collect();
    assert_eq!(offsets, vec![1000, 1010, 2000, 2030, 3000]);
    let timestamps: Vec<u64> = video.samples().iter().map(|s| s.timestamp()).collect();
    assert_eq!(timestamps, vec![0, 1000, 2000, 3000, 4000]);
    let keyframes: Vec<u64> = video.keyframes().map(|s| s.timestamp()).collect();
    assert_eq!(keyframes, vec![0, 3000]);
    let cts: Vec<i32> = video.samples().iter()
        .filter_map(|s| s.video())
        .map(|v| v.composition_offset)
        .collect();
    assert_eq!(cts, vec![1000, 2000, 0, 0, 0]);
    assert_eq!(video.size(), 150);

    // no tkhd, id from trak position
    let audio = movie.track(2).unwrap();
    assert!(audio.is_audio());
    assert_eq!(audio.codec(), "mp4a");
    let info = audio.audio_info().unwrap();
    assert_eq!((info.channels, info.sample_rate, info.sample_size), (2, 48_000, 16));
    assert_eq!(info.extra_data, esds());
    assert_eq!(audio.duration_unscaled(), 4096);

    let offsets: Vec<u64> = audio.samples().iter().map(|s| s.offset()).collect();
    assert_eq!(offsets, vec![0x1_0000_0000, 0x1_0000_00C8, 0x1_0000_0190, 0x1_0000_0258]);
    assert!(audio.samples().iter().all(|s| matches!(s, Sample::Audio(_))));
    assert_eq!(audio.keyframes().count(), 0);
}

#[test]
fn mp4_from_bytes() {
    let mut mp4 = Mp4::from_bytes(mp4_file());
    assert_eq!(mp4.len(), mp4_file().len() as u64);
    let movie = mp4.parse().unwrap();
    assert_eq!(movie, parse(&mut Cursor::new(mp4_file())).unwrap());
}

#[test]
fn mp4_from_file() {
    let path = std::env::temp_dir().join(format!("mp4index-{}.mp4", std::process::id()));
    std::fs::write(&path, mp4_file()).unwrap();

    let options = Mp4Options::default().with_buffer_capacity(64);
    let result = Mp4::open(&path, options).and_then(|mut mp4| mp4.parse());
    std::fs::remove_file(&path).unwrap();

    assert_eq!(result.unwrap(), parse(&mut Cursor::new(mp4_file())).unwrap());
}

#[test]
fn parallel_matches_sequential() {
    init_logging();
    let sequential = Mp4::from_bytes(mp4_file()).parse().unwrap();
    let parallel = Mp4::from_bytes(mp4_file())
        .with_options(Mp4Options::default().with_parallel(true))
        .parse()
        .unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn all_keyframes_option() {
    let file = [
        ftyp(),
        container(b"moov", &[
            container(b"trak", &[
                container(b"mdia", &[
                    mdhd(25, 2),
                    hdlr(b"vide", b"\0"),
                    container(b"minf", &[
                        container(b"stbl", &[
                            stsd_video(b"mp4v", 320, 240, &[]),
                            stts(&[(2, 1)]),
                            stsc(&[(1, 2)]),
                            stsz(&[3, 3]),
                            stco(&[64]),
                        ]),
                    ]),
                ]),
            ]),
        ]),
    ].concat();

    let movie = Mp4::from_bytes(file.clone()).parse().unwrap();
    assert_eq!(movie.video_tracks().next().unwrap().keyframes().count(), 0);
    // no mvhd
    assert_eq!(movie.time_scale(), 0);
    assert_eq!(movie.creation_time(), mp4_time_zero());

    let movie = Mp4::from_bytes(file)
        .with_options(Mp4Options::default().with_missing_sync_table_all_keyframes(true))
        .parse()
        .unwrap();
    assert_eq!(movie.video_tracks().next().unwrap().keyframes().count(), 2);
}

#[test]
fn locate_moov_twice() {
    let mut source = Cursor::new(mp4_file());
    let first = locate_moov(&mut source).unwrap().unwrap();
    let second = locate_moov(&mut source).unwrap().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.header().offset(), (ftyp().len() + 72) as u64);
}

#[test]
fn mdat_not_read() {
    let file = mp4_file();
    let mdat_data = (ftyp().len() + 8) as u64 .. (ftyp().len() + 72) as u64;
    let mut source = RecordingSource {
        inner: Cursor::new(file),
        reads: Vec::new(),
    };

    assert!(locate_moov(&mut source).unwrap().is_some());
    assert!(source.reads.iter()
        .all(|(offset, n)| offset + *n as u64 <= mdat_data.start || *offset >= mdat_data.end));
}

#[test]
fn missing_moov() {
    let file = [ftyp(), atom(b"mdat", &[0_u8; 64])].concat();
    assert!(matches!(parse(&mut Cursor::new(file)), Err(Mp4Error::MoovReadError)));
    assert!(matches!(parse(&mut Cursor::new(Vec::<u8>::new())), Err(Mp4Error::MoovReadError)));
    assert!(matches!(Mp4::from_bytes(ftyp()).moov(), Err(Mp4Error::MoovReadError)));
}

#[test]
fn truncated_moov() {
    let mut file = ftyp();
    file.extend_from_slice(&Be::default().u32(1000).bytes(b"moov").zeros(20).0);
    let result = parse(&mut Cursor::new(file));
    assert!(matches!(result, Err(Mp4Error::ReadMismatch{got: 20, expected: 992, offset: 32})));
}

#[test]
fn oversized_moov() {
    let file = Be::default()
        .u32(1)
        .bytes(b"moov")
        .u64(1 << 40)
        .zeros(16)
        .0;
    let result = locate_moov(&mut Cursor::new(file));
    assert!(matches!(
        result,
        Err(Mp4Error::ReadMismatch{got: 16, expected, offset: 16}) if expected == (1 << 40) - 16
    ));
}

#[test]
fn truncated_header() {
    let mut file = ftyp();
    file.extend_from_slice(&[0, 0, 0]);
    let result = parse(&mut Cursor::new(file));
    assert!(matches!(result, Err(Mp4Error::ReadMismatch{got: 3, expected: 8, offset: 24})));
}

#[test]
fn malformed_child_size() {
    let mut child = atom(b"free", &[0; 8]);
    child[.. 4].copy_from_slice(&100_u32.to_be_bytes());
    let file = [ftyp(), container(b"moov", &[child])].concat();

    let result = parse(&mut Cursor::new(file));
    assert!(matches!(result, Err(Mp4Error::UnexpectedAtomSize{len: 100, offset: 32})));

    let mut child = atom(b"free", &[0; 8]);
    child[.. 4].copy_from_slice(&4_u32.to_be_bytes());
    let file = [ftyp(), container(b"moov", &[child])].concat();

    let result = parse(&mut Cursor::new(file));
    assert!(matches!(result, Err(Mp4Error::UnexpectedAtomSize{len: 4, offset: 32})));
}

#[test]
fn malformed_top_level_size() {
    let mut file = ftyp();
    file.extend_from_slice(&Be::default().u32(4).bytes(b"free").0);
    let result = parse(&mut Cursor::new(file));
    assert!(matches!(result, Err(Mp4Error::UnexpectedAtomSize{len: 4, offset: 24})));
}

#[test]
fn large_size_atoms() {
    let file = [
        ftyp(),
        atom64(b"mdat", &[0_u8; 40]),
        container(b"moov", &[atom64(b"free", &[1, 2, 3]), mvhd(1000, 0)]),
    ].concat();

    let moov = locate_moov(&mut Cursor::new(file)).unwrap().unwrap();
    assert_eq!(moov.header().offset(), (ftyp().len() + 56) as u64);

    let free = moov.find(&FourCC::Custom("free".to_owned())).unwrap();
    assert_eq!(free.header().header_size(), 16);
    assert_eq!(free.size(), 19);
    assert_eq!(free.data(), Some([1_u8, 2, 3].as_slice()));
}

#[test]
fn atom_tree() {
    let moov = locate_moov(&mut Cursor::new(mp4_file())).unwrap().unwrap();

    assert_eq!(moov.find_all(&FourCC::Trak).len(), 3);
    assert!(moov.find(&FourCC::Mvhd).is_some());

    // unknown and non-container atoms are kept as raw bytes
    let udta = moov.find(&FourCC::Custom("udta".to_owned())).unwrap();
    assert!(matches!(udta.body(), AtomBody::Leaf(data) if data.ends_with(b"vendor data")));

    let trak = &moov.find_all(&FourCC::Trak)[0];
    let stbl = trak.find_path(&[FourCC::Mdia, FourCC::Minf, FourCC::Stbl]).unwrap();
    assert!(stbl.header().is_container());
    assert_eq!(stbl.children().unwrap().len(), 7);

    let dref = trak.find_path(&[
        FourCC::Mdia,
        FourCC::Minf,
        FourCC::Dinf,
        FourCC::Custom("dref".to_owned())
    ]);
    assert!(dref.is_some());

    // children iterate in file order
    let names: Vec<String> = stbl.children().unwrap()
        .iter()
        .map(|a| a.name().to_string())
        .collect();
    assert_eq!(names, vec!["stsd", "stts", "ctts", "stss", "stsc", "stsz", "stco"]);

    // absolute offsets
    let stsd = stbl.find(&FourCC::Stsd).unwrap();
    assert_eq!(stsd.header().offset(), stbl.header().data_offset());
}

#[test]
fn decode_wrong_atom() {
    let moov = locate_moov(&mut Cursor::new(mp4_file())).unwrap().unwrap();
    let mvhd = moov.find(&FourCC::Mvhd).unwrap();
    assert!(matches!(mvhd.stts(), Err(Mp4Error::AtomMismatch{..})));
    assert!(matches!(moov.mvhd(), Err(Mp4Error::AtomMismatch{..})));
    let mvhd = mvhd.mvhd().unwrap();
    assert_eq!(mvhd.version(), 0);
    assert_eq!(mvhd.next_track_id, 3);
}

#[test]
fn truncated_leaf() {
    let file = [
        ftyp(),
        container(b"moov", &[atom(b"mvhd", &[0; 10])]),
    ].concat();
    let result = parse(&mut Cursor::new(file));
    assert!(matches!(result, Err(Mp4Error::BinReadError(_))));
}

#[test]
fn ctts_expansion() {
    let data = ctts(&[(1, 1000), (1, 2000), (3, 0), (1, -500)]);
    let ctts: Ctts = Cursor::new(&data[8 ..]).read_be().unwrap();

    assert_eq!(ctts.len(), 6);
    assert_eq!(ctts.expand(), vec![1000, 2000, 0, 0, 0, -500]);
    assert_eq!(ctts.expand_to(2), vec![1000, 2000]);
}

#[test]
fn track_header() {
    let data = tkhd(7);
    let tkhd: Tkhd = Cursor::new(&data[8 ..]).read_be().unwrap();
    assert_eq!(tkhd.version(), 0);
    assert_eq!(tkhd.track_id(), 7);
    assert_eq!(tkhd.duration(), 5000);
    assert_eq!(tkhd.creation_time(), Some(mp4_time_zero()));
}

#[test]
fn stsz_uniform_expansion() {
    let data = stsz_uniform(200, 4);
    let stsz: Stsz = Cursor::new(&data[8 ..]).read_be().unwrap();

    assert_eq!(stsz.sample_size(), 200);
    assert_eq!(stsz.len(), 4);
    assert!(stsz.sizes().is_empty());
    assert_eq!(stsz.expand_to(usize::MAX), vec![200, 200, 200, 200]);
}

/// Decodes the tables of a bare `stbl` atom.
fn stbl_tables(children: &[Vec<u8>]) -> SampleTables {
    let file = container(b"moov", &[container(b"stbl", children)]);
    let moov = locate_moov(&mut Cursor::new(file)).unwrap().unwrap();
    SampleTables::from_stbl(moov.find(&FourCC::Stbl).unwrap()).unwrap()
}

#[test]
fn uniform_stsz_count_not_trusted() {
    let data = stsz_uniform(4, u32::MAX);
    let stsz: Stsz = Cursor::new(&data[8 ..]).read_be().unwrap();
    assert_eq!(stsz.len(), u32::MAX as usize);
    assert_eq!(stsz.expand_to(3), vec![4, 4, 4]);

    let tables = stbl_tables(&[
        stts(&[(2, 1)]),
        stsz_uniform(4, u32::MAX),
        stco(&[0]),
    ]);
    assert_eq!(tables.sizes, vec![4, 4]);
}

#[test]
fn ctts_capped_at_sizes() {
    let tables = stbl_tables(&[
        stts(&[(u32::MAX, 1)]),
        ctts(&[(u32::MAX, 5)]),
        stsc(&[(1, 4)]),
        stsz(&[10, 20]),
        stco(&[0]),
    ]);
    assert_eq!(tables.sizes, vec![10, 20]);
    assert_eq!(tables.composition_offsets, vec![5, 5]);

    let result = SampleTableBuilder::new(&tables, 1, true).build();
    assert!(matches!(result, Err(Mp4Error::SampleCountMismatch{table: "stsz", ..})));
}

#[test]
fn stco_preferred_over_co64() {
    let stbl = container(b"stbl", &[
        stts(&[(1, 1)]),
        stsz(&[1]),
        co64(&[99]),
        stco(&[42]),
    ]);
    let file = [ftyp(), container(b"moov", &[
        container(b"trak", &[container(b"mdia", &[
            mdhd(1, 1),
            hdlr(b"soun", b"\0"),
            container(b"minf", &[stbl]),
        ])]),
    ])].concat();

    let moov = locate_moov(&mut Cursor::new(file)).unwrap().unwrap();
    let stbl = moov.find_path(&[FourCC::Trak, FourCC::Mdia, FourCC::Minf, FourCC::Stbl]).unwrap();
    let tables = SampleTables::from_stbl(stbl).unwrap();
    assert_eq!(tables.chunk_offsets, vec![42]);
    assert_eq!(tables.sync_samples, None);
}

#[test]
fn sample_descriptions() {
    let moov = locate_moov(&mut Cursor::new(mp4_file())).unwrap().unwrap();
    let trak = &moov.find_all(&FourCC::Trak)[0];
    let stsd = trak.find_path(&[FourCC::Mdia, FourCC::Minf, FourCC::Stbl, FourCC::Stsd])
        .unwrap()
        .stsd()
        .unwrap();

    assert_eq!(stsd.len(), 1);
    assert!(stsd.audio().is_none());
    let description = stsd.video().unwrap();
    assert_eq!(description.data_reference_index(), 1);

    let video = description.video().unwrap();
    assert_eq!(video.compressor_name(), "h264");
    assert_eq!(video.depth(), 24);
    assert_eq!(video.color_table_id(), -1);
    assert_eq!(video.horizontal_resolution(), 72.0);
    assert_eq!(video.extensions(), avcc().as_slice());
}
