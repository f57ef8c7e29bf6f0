use crate::*;

/// Replays encoded units the way the device does, reconstructing the plane
/// of every frame.
#[derive(Clone, Debug)]
pub struct Player {
    header: Header,
    plane: Plane,
    frame: usize,
}

impl Player {
    pub fn new(first: &[u8]) -> Result<Self> {
        let header = Header::parse(first)?;
        let plane = Self::read_plane(&header, &first[Header::SIZE..])?;

        Ok(Self {
            header,
            plane,
            frame: 0,
        })
    }

    /// Splits an animation stored as a single blob back into its units; the
    /// blob has to hold exactly as many units as its header declares.
    pub fn from_bundle(bundle: &[u8]) -> Result<(Self, Vec<&[u8]>)> {
        let header = Header::parse(bundle)?;

        if header.frame_count == 0 {
            return Err(Error::NoFrames);
        }

        let plane_len = header.plane_len();
        let expected = Header::SIZE + (header.frame_count as usize) * plane_len;

        if bundle.len() < expected {
            return Err(Error::TruncatedUnit {
                expected,
                actual: bundle.len(),
            });
        }

        if bundle.len() > expected {
            return Err(Error::TrailingBytes {
                extra: bundle.len() - expected,
            });
        }

        let (first, mut rest) = bundle.split_at(Header::SIZE + plane_len);
        let mut units = Vec::with_capacity(header.frame_count as usize - 1);

        for _ in 1..header.frame_count {
            let (unit, tail) = rest.split_at(plane_len);

            units.push(unit);
            rest = tail;
        }

        Ok((Self::new(first)?, units))
    }

    /// Applies the next diff unit.
    pub fn apply(&mut self, unit: &[u8]) -> Result<&Plane> {
        let diff = Self::read_plane(&self.header, unit)
            .map_err(|err| err.at_frame(self.frame + 1))?;

        self.plane.apply(&diff)?;
        self.frame += 1;

        Ok(&self.plane)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Index of the frame [`Player::plane`] currently shows.
    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn pixel(&self, x: u16, y: u16) -> Option<bool> {
        if x >= self.header.width || y >= self.header.height {
            return None;
        }

        self.plane
            .get((x as usize) * (self.header.height as usize) + (y as usize))
    }

    fn read_plane(header: &Header, bytes: &[u8]) -> Result<Plane> {
        if bytes.len() < header.plane_len() {
            return Err(Error::TruncatedUnit {
                expected: header.plane_len(),
                actual: bytes.len(),
            });
        }

        Ok(bitset::unpack(bytes, header.pixels()).collect())
    }
}
