use crate::*;

/// One decoded image of an animation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    index: usize,
    width: u32,
    height: u32,
    channels: usize,
    samples: Vec<u8>,
    duration: Option<u32>,
}

impl Frame {
    /// Creates a frame out of a row-major, interleaved sample buffer.
    pub fn new(
        index: usize,
        width: u32,
        height: u32,
        channels: usize,
        samples: Vec<u8>,
        duration: Option<u32>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyFrame);
        }

        if channels < 3 {
            return Err(Error::ChannelCount { channels });
        }

        let expected = (width as usize) * (height as usize) * channels;

        if samples.len() != expected {
            return Err(Error::InvalidBuffer {
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            index,
            width,
            height,
            channels,
            samples,
            duration,
        })
    }

    pub fn from_rgb(index: usize, img: &RgbImage, duration: Option<u32>) -> Result<Self> {
        Self::new(
            index,
            img.width(),
            img.height(),
            3,
            img.as_raw().clone(),
            duration,
        )
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn duration(&self) -> Option<u32> {
        self.duration
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let offset = ((y as usize) * (self.width as usize) + (x as usize)) * self.channels;

        self.samples.get(offset..offset + self.channels)
    }
}
