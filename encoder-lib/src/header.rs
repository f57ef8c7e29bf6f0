use crate::*;

/// Display duration written for frames whose declared delay is zero; viewers
/// treat a zero delay as "as fast as possible", which the device can't do.
pub const ZERO_DELAY_DURATION: u16 = 100;

/// Metadata prepended to the first unit of every animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub width: u16,
    pub height: u16,
    pub frame_count: u16,
    pub duration: u16,
}

impl Header {
    pub const SIZE: usize = 8;

    pub fn new(first: &Frame, frame_count: usize) -> Result<Self> {
        let duration = match first.duration() {
            None => 0,
            Some(0) => ZERO_DELAY_DURATION as usize,
            Some(duration) => duration as usize,
        };

        Ok(Self {
            width: narrow("width", first.width() as usize)?,
            height: narrow("height", first.height() as usize)?,
            frame_count: narrow("frame count", frame_count)?,
            duration: narrow("duration", duration)?,
        })
    }

    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let Some(bytes) = bytes.get(..Self::SIZE) else {
            return Err(Error::TruncatedUnit {
                expected: Self::SIZE,
                actual: bytes.len(),
            });
        };

        let field = |idx: usize| u16::from_be_bytes([bytes[2 * idx], bytes[2 * idx + 1]]);

        Ok(Self {
            width: field(0),
            height: field(1),
            frame_count: field(2),
            duration: field(3),
        })
    }

    pub fn serialize(&self) -> [u8; Self::SIZE] {
        let mut buffer = [0; Self::SIZE];

        buffer[0..2].copy_from_slice(&self.width.to_be_bytes());
        buffer[2..4].copy_from_slice(&self.height.to_be_bytes());
        buffer[4..6].copy_from_slice(&self.frame_count.to_be_bytes());
        buffer[6..8].copy_from_slice(&self.duration.to_be_bytes());
        buffer
    }

    /// Number of pixels in every plane of the animation.
    pub fn pixels(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Size of every unit's packed plane, header excluded.
    pub fn plane_len(&self) -> usize {
        bitset::packed_len(self.pixels())
    }
}

fn narrow(field: &'static str, value: usize) -> Result<u16> {
    u16::try_from(value).map_err(|_| Error::HeaderOverflow { field, value })
}
