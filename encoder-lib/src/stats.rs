use std::ops::AddAssign;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub frames: usize,
    pub bytes: usize,
    pub changed_pixels: usize,
}

impl AddAssign for Stats {
    fn add_assign(&mut self, rhs: Self) {
        self.frames += rhs.frames;
        self.bytes += rhs.bytes;
        self.changed_pixels += rhs.changed_pixels;
    }
}
