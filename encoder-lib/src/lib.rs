//! Compiles animations into the bit-packed, frame-differenced format read by
//! the badge firmware.
//!
//! Every animation becomes a sequence of units: the first one carries an
//! 8-byte [`Header`] and the packed plane of frame 0, and each next one only
//! carries the pixels that flipped since the frame before it.

mod bitset;
mod error;
mod frame;
mod frames;
mod header;
mod params;
mod pixel;
mod plane;
mod playback;
mod sink;
mod source;
mod stats;
mod unit;

use self::frames::*;
pub use ::image::RgbImage;
use log::{debug, warn};

pub use self::{
    bitset::*, error::*, frame::*, header::*, params::*, pixel::*, plane::*, playback::*,
    sink::*, source::*, stats::*, unit::*,
};

/// Turns frames of a single animation into units, one frame at a time.
#[derive(Debug)]
pub struct Encoder {
    frame_count: usize,
    next: usize,
    prev: Option<Plane>,
    stats: Stats,
}

impl Encoder {
    /// `frame_count` is the number of frames the decoder declared; it's
    /// written into the header before the first frame gets encoded.
    pub fn new(frame_count: usize) -> Self {
        Self {
            frame_count,
            next: 0,
            prev: None,
            stats: Default::default(),
        }
    }

    pub fn add(&mut self, frame: &Frame) -> Result<Unit> {
        let index = self.next;

        if index >= self.frame_count {
            return Err(Error::TooManyFrames {
                count: self.frame_count,
            });
        }

        let (curr, bytes) = self.build(frame).map_err(|err| err.at_frame(index))?;

        debug!(
            "frame {}: duration = {:?}, {} byte(s)",
            index,
            frame.duration(),
            bytes.len()
        );

        self.stats.frames += 1;
        self.stats.bytes += bytes.len();
        self.prev = Some(curr);
        self.next += 1;

        Ok(Unit::new(index, bytes))
    }

    pub fn finish(self) -> Result<Stats> {
        if self.next < self.frame_count {
            return Err(Error::InputExhausted {
                index: self.next,
                count: self.frame_count,
            });
        }

        Ok(self.stats)
    }

    fn build(&mut self, frame: &Frame) -> Result<(Plane, Vec<u8>)> {
        let curr = Plane::extract(frame)?;

        let bytes = if let Some(prev) = &self.prev {
            let frame = PFrame::build(prev, &curr)?;

            self.stats.changed_pixels += frame.changed();
            frame.serialize()
        } else {
            let header = Header::new(frame, self.frame_count)?;

            if curr.len() % 8 != 0 {
                warn!(
                    "{}x{} plane isn't byte-aligned, its last {} pixel(s) will be dropped",
                    header.width,
                    header.height,
                    curr.len() % 8
                );
            }

            IFrame::build(header, &curr).serialize()
        };

        Ok((curr, bytes))
    }
}

/// Encodes a whole animation, handing every unit to `sink` as soon as it's
/// ready.
///
/// On error nothing more is written for this animation; units that have
/// already been handed over stay where the sink put them.
pub fn encode<'a>(
    name: &str,
    frame_count: usize,
    frames: impl IntoIterator<Item = &'a Frame>,
    sink: &mut dyn Sink,
) -> anyhow::Result<Stats> {
    let mut encoder = Encoder::new(frame_count);

    for frame in frames {
        let unit = encoder.add(frame)?;

        sink.write(name, unit)?;
    }

    let stats = encoder.finish()?;

    sink.finish(name)?;

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(index: usize, ink: bool) -> Frame {
        let value = if ink { 0 } else { 255 };

        Frame::new(index, 8, 8, 3, vec![value; 8 * 8 * 3], Some(50)).unwrap()
    }

    #[test]
    fn first_unit_has_header() {
        let mut encoder = Encoder::new(2);
        let unit = encoder.add(&solid(0, true)).unwrap();

        assert!(unit.is_first());
        assert_eq!(16, unit.len());
        assert_eq!(&[0, 8, 0, 8, 0, 2, 0, 50], &unit.bytes()[..8]);
        assert_eq!(&[0xFF; 8], &unit.bytes()[8..]);
    }

    #[test]
    fn next_units_are_diffs() {
        let mut encoder = Encoder::new(3);

        encoder.add(&solid(0, true)).unwrap();

        let same = encoder.add(&solid(1, true)).unwrap();
        let flipped = encoder.add(&solid(2, false)).unwrap();

        assert_eq!(&[0x00; 8], same.bytes());
        assert_eq!(&[0xFF; 8], flipped.bytes());

        let stats = encoder.finish().unwrap();

        assert_eq!(3, stats.frames);
        assert_eq!(32, stats.bytes);
        assert_eq!(64, stats.changed_pixels);
    }

    #[test]
    fn resized_frame() {
        let mut encoder = Encoder::new(2);
        encoder.add(&solid(0, true)).unwrap();

        let smaller = Frame::new(1, 4, 4, 3, vec![0; 48], None).unwrap();
        let err = encoder.add(&smaller).unwrap_err();

        assert_eq!(Some(1), err.frame());
        assert!(matches!(
            err,
            Error::AtFrame { source, .. } if matches!(*source, Error::FormatMismatch { expected: 64, actual: 16 })
        ));
    }

    #[test]
    fn missing_frames() {
        let mut encoder = Encoder::new(3);
        encoder.add(&solid(0, true)).unwrap();

        assert!(matches!(
            encoder.finish(),
            Err(Error::InputExhausted { index: 1, count: 3 })
        ));
    }

    #[test]
    fn surplus_frames() {
        let mut encoder = Encoder::new(1);
        encoder.add(&solid(0, true)).unwrap();

        assert!(matches!(
            encoder.add(&solid(1, true)),
            Err(Error::TooManyFrames { count: 1 })
        ));
    }

    #[test]
    fn failed_animation_stops_writing() {
        let frames = [
            solid(0, true),
            Frame::new(1, 4, 4, 3, vec![0; 48], None).unwrap(),
            solid(2, true),
        ];

        let mut sink = MemorySink::default();
        let err = encode("broken", 3, &frames, &mut sink).unwrap_err();

        assert!(err.downcast_ref::<Error>().is_some());
        assert_eq!(1, sink.units("broken").len());
    }
}
