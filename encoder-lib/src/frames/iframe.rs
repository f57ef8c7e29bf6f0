use crate::*;

/// First frame of an animation: header followed by the raw plane.
pub struct IFrame {
    header: Header,
    body: Vec<u8>,
}

impl IFrame {
    pub fn build(header: Header, curr: &Plane) -> Self {
        Self {
            header,
            body: bitset::pack(curr.pixels()),
        }
    }

    pub fn serialize(self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(Header::SIZE + self.body.len());

        buffer.extend(self.header.serialize());
        buffer.extend(self.body);
        buffer
    }
}
