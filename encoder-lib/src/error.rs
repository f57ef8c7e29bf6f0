use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("plane length mismatch: expected {expected} bits, got {actual}")]
    FormatMismatch { expected: usize, actual: usize },

    #[error("decoder ran out of frames: got {index} out of {count}")]
    InputExhausted { index: usize, count: usize },

    #[error("decoder supplied more frames than the declared {count}")]
    TooManyFrames { count: usize },

    #[error("pixel has {channels} channel(s), at least 3 are required")]
    ChannelCount { channels: usize },

    #[error("pixel buffer holds {actual} samples, expected {expected}")]
    InvalidBuffer { expected: usize, actual: usize },

    #[error("frame has no pixels")]
    EmptyFrame,

    #[error("{field} = {value} doesn't fit in 16 bits")]
    HeaderOverflow { field: &'static str, value: usize },

    #[error("unit is too short: expected {expected} bytes, got {actual}")]
    TruncatedUnit { expected: usize, actual: usize },

    #[error("{extra} unexpected byte(s) after the last unit")]
    TrailingBytes { extra: usize },

    #[error("header declares no frames")]
    NoFrames,

    #[error("frame {index}: {source}")]
    AtFrame {
        index: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn at_frame(self, index: usize) -> Self {
        match self {
            err @ Self::AtFrame { .. } => err,
            err => Self::AtFrame {
                index,
                source: Box::new(err),
            },
        }
    }

    /// Index of the frame that caused this error, if known.
    pub fn frame(&self) -> Option<usize> {
        match self {
            Self::AtFrame { index, .. } => Some(*index),
            Self::InputExhausted { index, .. } => Some(*index),
            _ => None,
        }
    }
}
