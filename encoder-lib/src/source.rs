use crate::*;
use ::image::{codecs::gif::GifDecoder, AnimationDecoder, Rgb, Rgba, RgbaImage};
use anyhow::{Context, Result};
use log::info;
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

/// Finds all GIFs inside given directory, sorted by path.
pub fn discover(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let pattern = dir.as_ref().join("*.gif");
    let paths = glob::glob(&pattern.to_string_lossy()).context("Couldn't find animations")?;

    let mut paths = paths
        .map(|path| path.context("Couldn't find animation"))
        .collect::<Result<Vec<_>>>()?;

    paths.sort();

    Ok(paths)
}

/// Blends a composited frame onto a white background, so that transparent
/// areas (which the decoder leaves as `[0, 0, 0, 0]`) don't turn into ink.
fn flatten(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let Rgba([r, g, b, a]) = *image.get_pixel(x, y);
        let a = a as u16;
        let blend = |c: u8| ((c as u16 * a + 255 * (255 - a)) / 255) as u8;

        Rgb([blend(r), blend(g), blend(b)])
    })
}

/// A fully decoded animation.
///
/// Frames are buffered up front, since the header needs to know how many of
/// them there are before the first one gets encoded.
#[derive(Clone, Debug)]
pub struct Animation {
    name: String,
    frames: Vec<Frame>,
}

impl Animation {
    pub fn new(name: impl Into<String>, frames: Vec<Frame>) -> Self {
        Self {
            name: name.into(),
            frames,
        }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let name = path
            .file_stem()
            .with_context(|| format!("Couldn't name animation: {}", path.display()))?
            .to_string_lossy()
            .into_owned();

        let file = File::open(path)
            .with_context(|| format!("Couldn't open animation: {}", path.display()))?;

        let frames = GifDecoder::new(BufReader::new(file))
            .and_then(|decoder| decoder.into_frames().collect_frames())
            .with_context(|| format!("Couldn't decode animation: {}", path.display()))?;

        let frames = frames
            .into_iter()
            .enumerate()
            .map(|(index, frame)| {
                let (numer, denom) = frame.delay().numer_denom_ms();
                let duration = numer / denom.max(1);
                let image = flatten(frame.buffer());

                Frame::from_rgb(index, &image, Some(duration))
                    .with_context(|| format!("Couldn't read frame {}: {}", index, path.display()))
            })
            .collect::<Result<Vec<_>>>()?;

        info!("{}: decoded {} frame(s)", name, frames.len());

        Ok(Self { name, frames })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    pub fn encode(&self, sink: &mut dyn Sink) -> Result<Stats> {
        encode(&self.name, self.frame_count(), self.frames(), sink)
            .with_context(|| format!("Couldn't encode animation: {}", self.name))
    }
}
