use crate::*;

/// Monochrome plane of a frame, stored column by column (x outer, y inner),
/// since that's the order in which the device streams it to the display.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plane {
    pixels: Vec<bool>,
}

impl Plane {
    pub fn extract(frame: &Frame) -> Result<Self> {
        let mut pixels = Vec::with_capacity((frame.width() as usize) * (frame.height() as usize));

        for x in 0..frame.width() {
            for y in 0..frame.height() {
                pixels.push(pixel::is_ink(frame.pixel(x, y).unwrap_or_default())?);
            }
        }

        Ok(Self { pixels })
    }

    /// Returns which pixels have flipped between `self` and `curr`.
    pub fn diff(&self, curr: &Plane) -> Result<Self> {
        self.ensure_same_len(curr)?;

        Ok(Self {
            pixels: self
                .pixels()
                .zip(curr.pixels())
                .map(|(a, b)| a != b)
                .collect(),
        })
    }

    /// Flips every pixel set in `diff`; inverse of [`Plane::diff`].
    pub fn apply(&mut self, diff: &Plane) -> Result<()> {
        self.ensure_same_len(diff)?;

        for (pixel, flip) in self.pixels.iter_mut().zip(diff.pixels()) {
            *pixel ^= flip;
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn ink(&self) -> usize {
        self.pixels().filter(|&p| p).count()
    }

    pub fn get(&self, idx: usize) -> Option<bool> {
        self.pixels.get(idx).copied()
    }

    pub fn pixels(&self) -> impl Iterator<Item = bool> + '_ {
        self.pixels.iter().copied()
    }

    fn ensure_same_len(&self, other: &Plane) -> Result<()> {
        if self.len() == other.len() {
            Ok(())
        } else {
            Err(Error::FormatMismatch {
                expected: self.len(),
                actual: other.len(),
            })
        }
    }
}

impl FromIterator<bool> for Plane {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        Self {
            pixels: iter.into_iter().collect(),
        }
    }
}
