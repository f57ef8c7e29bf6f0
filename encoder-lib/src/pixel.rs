use crate::*;

/// Pixels whose `r + g + b` falls below this are considered ink.
pub const INK_THRESHOLD: u16 = 382;

/// Classifies a single pixel sample; only the first three channels are looked
/// at, so an RGBA sample is accepted as long as its alpha has already been
/// flattened away by whoever decoded it.
pub fn is_ink(sample: &[u8]) -> Result<bool> {
    match sample {
        [r, g, b, ..] => Ok((*r as u16) + (*g as u16) + (*b as u16) < INK_THRESHOLD),
        _ => Err(Error::ChannelCount {
            channels: sample.len(),
        }),
    }
}
