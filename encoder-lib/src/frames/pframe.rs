use crate::*;

/// Any frame but the first: pixels that flipped since the previous plane.
pub struct PFrame {
    body: Vec<u8>,
    changed: usize,
}

impl PFrame {
    pub fn build(prev: &Plane, curr: &Plane) -> Result<Self> {
        let diff = prev.diff(curr)?;

        Ok(Self {
            body: bitset::pack(diff.pixels()),
            changed: diff.ink(),
        })
    }

    pub fn changed(&self) -> usize {
        self.changed
    }

    pub fn serialize(self) -> Vec<u8> {
        self.body
    }
}
