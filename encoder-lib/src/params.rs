use std::path::PathBuf;

/// How units of a single animation are laid out on disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layout {
    /// `<name>_<index>.bin` per frame.
    #[default]
    PerFrame,

    /// `<name>.bin` holding every unit back to back.
    PerAnimation,
}

#[derive(Clone, Debug)]
pub struct Params {
    pub(crate) out_dir: PathBuf,
    pub(crate) layout: Layout,
}

impl Params {
    pub fn new(out_dir: impl Into<PathBuf>, layout: Layout) -> Self {
        Self {
            out_dir: out_dir.into(),
            layout,
        }
    }

    pub fn out_dir(&self) -> &PathBuf {
        &self.out_dir
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }
}
