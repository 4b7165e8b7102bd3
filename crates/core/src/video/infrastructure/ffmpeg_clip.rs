use std::path::Path;

use ffmpeg_next::format::Pixel;
use ffmpeg_next::media::Type;
use ffmpeg_next::software::scaling;
use ffmpeg_next::util::frame::video::Video;
use ffmpeg_next::Rational;

use super::frame_ticker::FrameTicker;
use crate::shared::clip_metadata::ClipMetadata;
use crate::video::domain::video_clip::{EncodeSettings, VideoClip};

const AV_TIME_BASE: f64 = 1_000_000.0;

/// Resizes, loops and re-encodes a clip via ffmpeg-next.
///
/// `open` probes the file and keeps the demuxer as the clip handle.
/// `write` consumes that demuxer for the first pass (reopening the file for
/// any loop passes), scales every frame to the
/// requested size, resamples onto the output frame rate and encodes with
/// the named encoder. The container is picked from the output extension.
pub struct FfmpegClip {
    input_ctx: Option<ffmpeg_next::format::context::Input>,
    metadata: Option<ClipMetadata>,
    source_fps: Option<f64>,
    size: Option<(u32, u32)>,
    loop_duration: Option<f64>,
}

// Safety: FfmpegClip is only used from a single thread at a time.
// The raw pointers inside ffmpeg types are not shared across threads.
unsafe impl Send for FfmpegClip {}

impl FfmpegClip {
    pub fn new() -> Self {
        Self {
            input_ctx: None,
            metadata: None,
            source_fps: None,
            size: None,
            loop_duration: None,
        }
    }
}

impl Default for FfmpegClip {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoClip for FfmpegClip {
    fn open(&mut self, path: &Path) -> Result<ClipMetadata, Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;
        self.close();

        let ictx = ffmpeg_next::format::input(path)?;

        let stream = ictx
            .streams()
            .best(Type::Video)
            .ok_or("No video stream found")?;
        let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?;
        let decoder = codec_ctx.decoder().video()?;

        let fps = rational_to_f64(stream.rate())
            .or_else(|| rational_to_f64(stream.avg_frame_rate()))
            .unwrap_or(0.0);

        let duration = if ictx.duration() > 0 {
            ictx.duration() as f64 / AV_TIME_BASE
        } else {
            rational_to_f64(stream.time_base())
                .map(|tb| stream.duration().max(0) as f64 * tb)
                .unwrap_or(0.0)
        };

        let metadata = ClipMetadata {
            width: decoder.width(),
            height: decoder.height(),
            fps,
            duration,
            codec: decoder
                .codec()
                .map(|c| c.name().to_string())
                .unwrap_or_default(),
            source_path: Some(path.to_path_buf()),
        };
        log::debug!("Opened {}: {metadata:?}", path.display());

        self.metadata = Some(metadata.clone());
        self.input_ctx = Some(ictx);

        Ok(metadata)
    }

    fn set_fps(&mut self, fps: f64) {
        self.source_fps = Some(fps);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = Some((width, height));
    }

    fn loop_to(&mut self, duration: f64) {
        self.loop_duration = Some(duration);
    }

    fn write(
        &mut self,
        path: &Path,
        settings: &EncodeSettings<'_>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if settings.audio {
            return Err("Audio output is not supported; only the video stream is encoded".into());
        }
        if settings.fps == 0 {
            return Err("Output frame rate must be positive".into());
        }
        let mut opened = self.input_ctx.take();
        let metadata = self.metadata.as_ref().ok_or("FfmpegClip: not opened")?;
        let source = metadata
            .source_path
            .clone()
            .ok_or("FfmpegClip: source path unknown")?;

        let (width, height) = self.size.unwrap_or((metadata.width, metadata.height));
        let end = match self.loop_duration {
            Some(d) if d > 0.0 => d,
            _ if metadata.duration > 0.0 => metadata.duration,
            _ => f64::INFINITY,
        };
        let out_fps = settings.fps as f64;
        let source_fps = self
            .source_fps
            .filter(|fps| *fps > 0.0)
            .or(Some(metadata.fps).filter(|fps| *fps > 0.0))
            .unwrap_or(out_fps);

        let mut encoder = ClipEncoder::create(path, width, height, settings)?;
        let mut resampler = Resampler::new(FrameTicker::new(out_fps, end), 1.0 / source_fps);

        let mut offset = 0.0;
        loop {
            let ictx = match opened.take() {
                Some(ictx) => ictx,
                None => ffmpeg_next::format::input(&source)?,
            };
            let decoded = decode_pass(
                ictx,
                (width, height),
                source_fps,
                offset,
                &mut resampler,
                &mut encoder,
            )?;
            if decoded == 0 || resampler.is_done() || !end.is_finite() {
                break;
            }
            offset = resampler.next_offset();
        }

        resampler.finish(&mut encoder)?;
        let frames = encoder.finish()?;
        log::debug!("Encoded {frames} frames at {width}x{height} to {}", path.display());

        Ok(())
    }

    fn close(&mut self) {
        self.input_ctx = None;
        self.metadata = None;
        self.source_fps = None;
        self.size = None;
        self.loop_duration = None;
    }
}

/// Output side: one encoded video stream muxed into `path`.
struct ClipEncoder {
    octx: ffmpeg_next::format::context::Output,
    encoder: ffmpeg_next::codec::encoder::video::Encoder,
    stream_index: usize,
    frame_time_base: Rational,
    stream_time_base: Rational,
    frames: usize,
}

impl ClipEncoder {
    fn create(
        path: &Path,
        width: u32,
        height: u32,
        settings: &EncodeSettings<'_>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut octx = ffmpeg_next::format::output(path)?;

        let global_header = octx
            .format()
            .flags()
            .contains(ffmpeg_next::format::Flags::GLOBAL_HEADER);

        let codec = ffmpeg_next::encoder::find_by_name(settings.codec)
            .ok_or_else(|| format!("Encoder {} not found", settings.codec))?;

        let mut ost = octx.add_stream(Some(codec))?;
        let stream_index = ost.index();

        let mut encoder_ctx = ffmpeg_next::codec::context::Context::new_with_codec(codec)
            .encoder()
            .video()?;

        let fps_i = settings.fps as i32;
        let frame_time_base = Rational(1, fps_i);

        encoder_ctx.set_width(width);
        encoder_ctx.set_height(height);
        encoder_ctx.set_format(Pixel::YUV420P);
        encoder_ctx.set_time_base(frame_time_base);
        encoder_ctx.set_frame_rate(Some(Rational(fps_i, 1)));

        if global_header {
            encoder_ctx.set_flags(ffmpeg_next::codec::Flags::GLOBAL_HEADER);
        }

        let encoder = encoder_ctx.open_with(ffmpeg_next::Dictionary::new())?;
        ost.set_parameters(&encoder);

        octx.write_header()?;

        let stream_time_base = octx
            .stream(stream_index)
            .ok_or("Output stream missing after header")?
            .time_base();

        Ok(Self {
            octx,
            encoder,
            stream_index,
            frame_time_base,
            stream_time_base,
            frames: 0,
        })
    }

    /// Encodes `frame` as output tick `tick`.
    fn push(&mut self, frame: &mut Video, tick: i64) -> Result<(), Box<dyn std::error::Error>> {
        frame.set_pts(Some(tick));
        self.encoder.send_frame(&*frame)?;
        self.frames += 1;
        self.drain()
    }

    fn drain(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let mut encoded = ffmpeg_next::Packet::empty();
        while self.encoder.receive_packet(&mut encoded).is_ok() {
            encoded.set_stream(self.stream_index);
            encoded.rescale_ts(self.frame_time_base, self.stream_time_base);
            encoded.write_interleaved(&mut self.octx)?;
        }
        Ok(())
    }

    /// Flushes the encoder and writes the trailer. Returns the frame count.
    fn finish(mut self) -> Result<usize, Box<dyn std::error::Error>> {
        self.encoder.send_eof()?;
        self.drain()?;
        self.octx.write_trailer()?;
        Ok(self.frames)
    }
}

/// Holds the latest scaled frame until the next timestamp shows how many
/// output ticks it covers.
struct Resampler {
    ticker: FrameTicker,
    pending: Option<Video>,
    last_time: f64,
    frame_step: f64,
}

impl Resampler {
    fn new(ticker: FrameTicker, frame_step: f64) -> Self {
        Self {
            ticker,
            pending: None,
            last_time: 0.0,
            frame_step,
        }
    }

    /// Queues a frame shown from `time`. Returns `false` once the output
    /// duration is filled.
    fn push(
        &mut self,
        time: f64,
        frame: Video,
        encoder: &mut ClipEncoder,
    ) -> Result<bool, Box<dyn std::error::Error>> {
        if let Some(mut held) = self.pending.take() {
            for tick in self.ticker.ticks_before(time) {
                encoder.push(&mut held, tick)?;
            }
        }
        self.pending = Some(frame);
        self.last_time = time;
        Ok(!self.ticker.is_done())
    }

    fn is_done(&self) -> bool {
        self.ticker.is_done()
    }

    /// Start time for the next loop pass.
    fn next_offset(&self) -> f64 {
        self.last_time + self.frame_step
    }

    fn finish(&mut self, encoder: &mut ClipEncoder) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(mut held) = self.pending.take() {
            for tick in self.ticker.ticks_before(self.last_time + self.frame_step) {
                encoder.push(&mut held, tick)?;
            }
        }
        Ok(())
    }
}

/// Presentation time of decoded frames within one pass, shifted by the
/// pass offset so every pass starts where the previous one ended.
struct PassClock {
    offset: f64,
    time_base: Option<f64>,
    frame_step: f64,
    first_ts: Option<i64>,
    decoded: usize,
}

impl PassClock {
    fn time_of(&mut self, frame: &Video) -> f64 {
        let ts = frame.timestamp().or(frame.pts());
        let time = match (ts, self.time_base) {
            (Some(ts), Some(tb)) => {
                let first = *self.first_ts.get_or_insert(ts);
                self.offset + (ts - first).max(0) as f64 * tb
            }
            _ => self.offset + self.decoded as f64 * self.frame_step,
        };
        self.decoded += 1;
        time
    }
}

/// Decodes a freshly opened source from the start, feeding scaled frames
/// to the resampler. Returns the number of frames decoded in this pass.
fn decode_pass(
    mut ictx: ffmpeg_next::format::context::Input,
    size: (u32, u32),
    source_fps: f64,
    offset: f64,
    resampler: &mut Resampler,
    encoder: &mut ClipEncoder,
) -> Result<usize, Box<dyn std::error::Error>> {
    let stream = ictx
        .streams()
        .best(Type::Video)
        .ok_or("No video stream found")?;
    let stream_index = stream.index();
    let time_base = rational_to_f64(stream.time_base());
    let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?;
    let mut decoder = codec_ctx.decoder().video()?;

    let mut scaler = scaling::Context::get(
        decoder.format(),
        decoder.width(),
        decoder.height(),
        Pixel::YUV420P,
        size.0,
        size.1,
        scaling::Flags::BILINEAR,
    )?;

    let mut clock = PassClock {
        offset,
        time_base,
        frame_step: 1.0 / source_fps,
        first_ts: None,
        decoded: 0,
    };

    for (stream, packet) in ictx.packets() {
        if stream.index() != stream_index {
            continue;
        }
        if decoder.send_packet(&packet).is_err() {
            continue;
        }
        if !receive_frames(&mut decoder, &mut scaler, &mut clock, resampler, encoder)? {
            return Ok(clock.decoded);
        }
    }

    decoder.send_eof()?;
    receive_frames(&mut decoder, &mut scaler, &mut clock, resampler, encoder)?;

    Ok(clock.decoded)
}

/// Drains decoded frames. Returns `false` once the resampler is full.
fn receive_frames(
    decoder: &mut ffmpeg_next::decoder::Video,
    scaler: &mut scaling::Context,
    clock: &mut PassClock,
    resampler: &mut Resampler,
    encoder: &mut ClipEncoder,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut decoded = Video::empty();
    while decoder.receive_frame(&mut decoded).is_ok() {
        let time = clock.time_of(&decoded);
        let mut scaled = Video::empty();
        scaler.run(&decoded, &mut scaled)?;
        if !resampler.push(time, scaled, encoder)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn rational_to_f64(rate: Rational) -> Option<f64> {
    if rate.denominator() == 0 || rate.numerator() <= 0 {
        return None;
    }
    Some(rate.numerator() as f64 / rate.denominator() as f64)
}
