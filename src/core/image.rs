//! Photo compression: decode, fit into a bounding box, re-encode as JPEG and
//! wrap the result in an embeddable `data:` payload.

use crate::errors::{AppError, AppResult};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

pub const DEFAULT_MAX_DIMENSION: u32 = 450;
pub const DEFAULT_QUALITY: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressOptions {
    pub max_dimension: u32,
    /// JPEG quality, 1..=100.
    pub quality: u8,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            quality: DEFAULT_QUALITY,
        }
    }
}

/// Where the image came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Chosen through a file picker that already filters by type.
    Picker,
    /// Dropped or piped in with a declared media type that must be `image/*`.
    Dropped { media_type: String },
}

impl ImageSource {
    pub fn check(&self) -> AppResult<()> {
        match self {
            ImageSource::Picker => Ok(()),
            ImageSource::Dropped { media_type } => {
                if media_type.trim().to_ascii_lowercase().starts_with("image/") {
                    Ok(())
                } else {
                    Err(AppError::UnsupportedMediaType(media_type.clone()))
                }
            }
        }
    }
}

/// Fit `(width, height)` inside a `max`×`max` box, keeping the aspect ratio.
///
/// Width is constrained first, then height. Images already inside the box
/// are left alone; fractional results are truncated.
pub fn scaled_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
    let max_f = max as f64;
    let mut w = width as f64;
    let mut h = height as f64;

    if w > max_f {
        h *= max_f / w;
        w = max_f;
    }
    if h > max_f {
        w *= max_f / h;
        h = max_f;
    }

    ((w as u32).max(1), (h as u32).max(1))
}

/// Compress raw image bytes into a `data:image/jpeg;base64,...` payload.
pub fn compress(bytes: &[u8], source: &ImageSource, opts: CompressOptions) -> AppResult<String> {
    source.check()?;

    let img = image::load_from_memory(bytes).map_err(|e| AppError::ImageDecode(e.to_string()))?;
    let jpeg = encode_jpeg(&fit(img, opts.max_dimension), opts.quality)?;

    Ok(to_data_url("image/jpeg", &jpeg))
}

fn fit(img: DynamicImage, max: u32) -> DynamicImage {
    let (w, h) = img.dimensions();
    let (nw, nh) = scaled_dimensions(w, h, max);
    if (nw, nh) == (w, h) {
        img
    } else {
        img.resize_exact(nw, nh, FilterType::Triangle)
    }
}

/// JPEG has no alpha channel: flatten to RGB before encoding.
pub(crate) fn encode_jpeg(img: &DynamicImage, quality: u8) -> AppResult<Vec<u8>> {
    let rgb = img.to_rgb8();
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality)
        .encode(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ColorType::Rgb8.into(),
        )
        .map_err(|e| AppError::ImageEncode(e.to_string()))?;
    Ok(out)
}

pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Split a `data:<mime>;base64,<payload>` string into its media type and bytes.
pub fn decode_payload(data_url: &str) -> AppResult<(String, Vec<u8>)> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| AppError::ImageDecode("payload is not a data URL".into()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| AppError::ImageDecode("data URL without payload".into()))?;

    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| AppError::ImageDecode("only base64 data URLs are supported".into()))?;

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| AppError::ImageDecode(format!("invalid base64 payload: {e}")))?;

    Ok((mime.to_string(), bytes))
}

/// Result of one background compression, keyed by the entry it belongs to.
#[derive(Debug)]
pub struct Completion {
    pub entry_id: String,
    pub result: AppResult<String>,
}

/// Runs compressions on worker threads and hands back completions in the
/// order they finish.
///
/// There is no cancellation: once submitted, a job runs to completion.
pub struct CompressionQueue {
    opts: CompressOptions,
    tx: Option<Sender<Completion>>,
    rx: Receiver<Completion>,
    pending: usize,
}

impl CompressionQueue {
    pub fn new(opts: CompressOptions) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            opts,
            tx: Some(tx),
            rx,
            pending: 0,
        }
    }

    pub fn submit(&mut self, entry_id: impl Into<String>, bytes: Vec<u8>, source: ImageSource) {
        let Some(tx) = self.tx.clone() else {
            return;
        };
        let entry_id = entry_id.into();
        let opts = self.opts;

        self.pending += 1;
        thread::spawn(move || {
            let result = compress(&bytes, &source, opts);
            // receiver gone means the caller stopped listening
            let _ = tx.send(Completion { entry_id, result });
        });
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Stop accepting jobs and yield completions as workers finish.
    ///
    /// The iterator ends once every worker has exited, including one that
    /// panicked before reporting.
    pub fn completions(mut self) -> impl Iterator<Item = Completion> {
        self.tx = None;
        self.rx.into_iter()
    }
}
