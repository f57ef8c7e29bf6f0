mod iframe;
mod pframe;

pub use self::{iframe::*, pframe::*};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;

    #[test]
    fn iframe_is_header_and_plane() {
        let header = Header {
            width: 4,
            height: 4,
            frame_count: 2,
            duration: 100,
        };

        let plane: Plane = [[true; 8], [false; 8]].concat().into_iter().collect();

        assert_eq!(
            vec![0, 4, 0, 4, 0, 2, 0, 100, 0xFF, 0x00],
            IFrame::build(header, &plane).serialize()
        );
    }

    #[test]
    fn pframe_holds_flips_only() {
        let prev: Plane = [[true; 8], [false; 8]].concat().into_iter().collect();
        let mut curr = [[true; 8], [false; 8]].concat();
        curr[0] = false;
        curr[15] = true;

        let curr: Plane = curr.into_iter().collect();
        let frame = PFrame::build(&prev, &curr).unwrap();

        assert_eq!(2, frame.changed());
        assert_eq!(vec![0x80, 0x01], frame.serialize());
    }

    #[test]
    fn pframe_of_resized_frame() {
        let prev: Plane = vec![false; 16].into_iter().collect();
        let curr: Plane = vec![false; 24].into_iter().collect();

        assert!(matches!(
            PFrame::build(&prev, &curr),
            Err(Error::FormatMismatch { .. })
        ));
    }
}
