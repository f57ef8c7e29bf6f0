use crate::*;
use anyhow::{bail, Context, Result};
use std::{collections::BTreeMap, fmt::Write as _, fs, path::Path};

/// Receives units of encoded animations, in frame order.
pub trait Sink {
    fn write(&mut self, name: &str, unit: Unit) -> Result<()>;

    /// Called once every frame of `name` has been written successfully.
    fn finish(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }
}

/// Hands every unit to both sinks.
impl<A, B> Sink for (A, B)
where
    A: Sink,
    B: Sink,
{
    fn write(&mut self, name: &str, unit: Unit) -> Result<()> {
        self.0.write(name, unit.clone())?;
        self.1.write(name, unit)
    }

    fn finish(&mut self, name: &str) -> Result<()> {
        self.0.finish(name)?;
        self.1.finish(name)
    }
}

/// Writes units into a directory, according to [`Layout`].
#[derive(Debug)]
pub struct DirSink {
    params: Params,
    pending: Vec<u8>,
}

impl DirSink {
    pub fn new(params: Params) -> Result<Self> {
        fs::create_dir_all(&params.out_dir).with_context(|| {
            format!(
                "Couldn't create output directory: {}",
                params.out_dir.display()
            )
        })?;

        Ok(Self {
            params,
            pending: Default::default(),
        })
    }

    fn save(&self, file: &str, bytes: &[u8]) -> Result<()> {
        let path = self.params.out_dir.join(file);

        fs::write(&path, bytes).with_context(|| format!("Couldn't write: {}", path.display()))
    }
}

impl Sink for DirSink {
    fn write(&mut self, name: &str, unit: Unit) -> Result<()> {
        match self.params.layout {
            Layout::PerFrame => {
                self.save(&format!("{}_{}.bin", name, unit.index()), unit.bytes())
            }

            Layout::PerAnimation => {
                if unit.is_first() {
                    self.pending.clear();
                }

                self.pending.extend(unit.into_bytes());

                Ok(())
            }
        }
    }

    fn finish(&mut self, name: &str) -> Result<()> {
        if self.params.layout == Layout::PerAnimation {
            let bytes = std::mem::take(&mut self.pending);

            self.save(&format!("{}.bin", name), &bytes)?;
        }

        Ok(())
    }
}

/// Reads an animation written by [`DirSink`] back as a single blob.
///
/// Given the first unit of [`Layout::PerFrame`] (`<name>_0.bin`), the files of
/// the remaining frames are read and appended too.
pub fn load_bundle(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let mut bundle = read(path)?;

    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let unit = stem
        .rsplit_once('_')
        .and_then(|(name, idx)| Some((name, idx.parse::<usize>().ok()?)));

    match unit {
        Some((name, 0)) => {
            let header = Header::parse(&bundle)
                .with_context(|| format!("Couldn't parse: {}", path.display()))?;

            if bundle.len() == Header::SIZE + header.plane_len() {
                for idx in 1..header.frame_count {
                    let sibling = path.with_file_name(format!("{}_{}.bin", name, idx));

                    bundle.extend(read(&sibling)?);
                }
            }
        }

        Some((name, idx)) => {
            if Player::from_bundle(&bundle).is_err() {
                bail!(
                    "{} holds frame {} of `{}`; load `{}_0.bin` instead",
                    path.display(),
                    idx,
                    name,
                    name
                );
            }
        }

        None => {}
    }

    Ok(bundle)
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Couldn't read: {}", path.display()))
}

/// Keeps units in memory, grouped by animation.
#[derive(Debug, Default)]
pub struct MemorySink {
    units: BTreeMap<String, Vec<Unit>>,
}

impl MemorySink {
    pub fn units(&self, name: &str) -> &[Unit] {
        self.units.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All units of `name`, back to back.
    pub fn bundle(&self, name: &str) -> Vec<u8> {
        self.units(name)
            .iter()
            .flat_map(|unit| unit.bytes())
            .copied()
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(|name| name.as_str())
    }
}

impl Sink for MemorySink {
    fn write(&mut self, name: &str, unit: Unit) -> Result<()> {
        self.units.entry(name.to_owned()).or_default().push(unit);

        Ok(())
    }
}

/// Renders bundled animations as C arrays, so that they can be compiled right
/// into the firmware.
#[derive(Debug)]
pub struct CArray {
    name: String,
    images: Vec<(String, Vec<u8>)>,
}

impl CArray {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            images: Default::default(),
        }
    }

    pub fn push(&mut self, name: &str, bundle: Vec<u8>) {
        self.images.push((c_identifier(name), bundle));
    }

    pub fn header(&self) -> String {
        let guard = format!("_{}_H_", c_identifier(&self.name).to_uppercase());
        let mut code = String::new();

        writeln!(code, "#ifndef {}", guard).unwrap();
        writeln!(code, "#define {}", guard).unwrap();
        writeln!(code).unwrap();
        writeln!(code, "#include <stdint.h>").unwrap();
        writeln!(code).unwrap();

        for (name, bytes) in &self.images {
            writeln!(code, "extern const uint8_t gal_{}[{}];", name, bytes.len()).unwrap();
        }

        writeln!(code).unwrap();
        writeln!(code, "#endif // {}", guard).unwrap();

        code
    }

    pub fn source(&self) -> String {
        let mut code = String::new();

        writeln!(code, "#include \"{}.h\"", self.name).unwrap();
        writeln!(code).unwrap();

        for (name, bytes) in &self.images {
            write!(code, "const uint8_t gal_{}[{}] = {{", name, bytes.len()).unwrap();

            for line in bytes.chunks(16) {
                write!(code, "\n   ").unwrap();

                for byte in line {
                    write!(code, " {:#04x},", byte).unwrap();
                }
            }

            writeln!(code, "\n}};").unwrap();
            writeln!(code).unwrap();
        }

        code
    }

    pub fn save(&self, dir: impl AsRef<Path>) -> Result<()> {
        for (ext, code) in [("h", self.header()), ("c", self.source())] {
            let path = dir.as_ref().join(format!("{}.{}", self.name, ext));

            fs::write(&path, code)
                .with_context(|| format!("Couldn't write: {}", path.display()))?;
        }

        Ok(())
    }
}

fn c_identifier(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn units() -> Vec<Unit> {
        vec![
            Unit::new(0, vec![0, 8, 0, 1, 0, 2, 0, 100, 0xAA]),
            Unit::new(1, vec![0x01]),
        ]
    }

    #[test]
    fn per_frame_files() {
        let dir = tempdir().unwrap();
        let mut sink = DirSink::new(Params::new(dir.path(), Layout::PerFrame)).unwrap();

        for unit in units() {
            sink.write("nyan", unit).unwrap();
        }

        sink.finish("nyan").unwrap();

        assert_eq!(
            vec![0, 8, 0, 1, 0, 2, 0, 100, 0xAA],
            fs::read(dir.path().join("nyan_0.bin")).unwrap()
        );
        assert_eq!(vec![0x01], fs::read(dir.path().join("nyan_1.bin")).unwrap());
        assert!(!dir.path().join("nyan.bin").exists());
    }

    #[test]
    fn per_animation_file() {
        let dir = tempdir().unwrap();
        let mut sink = DirSink::new(Params::new(dir.path(), Layout::PerAnimation)).unwrap();

        for unit in units() {
            sink.write("nyan", unit).unwrap();
        }

        assert!(!dir.path().join("nyan.bin").exists());

        sink.finish("nyan").unwrap();

        assert_eq!(
            vec![0, 8, 0, 1, 0, 2, 0, 100, 0xAA, 0x01],
            fs::read(dir.path().join("nyan.bin")).unwrap()
        );
    }

    #[test]
    fn memory() {
        let mut sink = MemorySink::default();

        for unit in units() {
            sink.write("nyan", unit).unwrap();
        }

        assert_eq!(2, sink.units("nyan").len());
        assert!(sink.units("other").is_empty());
        assert_eq!(10, sink.bundle("nyan").len());
        assert_eq!(vec!["nyan"], sink.names().collect::<Vec<_>>());
    }

    #[test]
    fn pair() {
        let dir = tempdir().unwrap();
        let files = DirSink::new(Params::new(dir.path(), Layout::PerAnimation)).unwrap();
        let mut sink = (files, MemorySink::default());

        for unit in units() {
            sink.write("nyan", unit).unwrap();
        }

        sink.finish("nyan").unwrap();

        assert_eq!(
            sink.1.bundle("nyan"),
            fs::read(dir.path().join("nyan.bin")).unwrap()
        );
    }

    fn write_all(layout: Layout, dir: &Path) {
        let mut sink = DirSink::new(Params::new(dir, layout)).unwrap();

        for unit in units() {
            sink.write("nyan", unit).unwrap();
        }

        sink.finish("nyan").unwrap();
    }

    #[test]
    fn load_per_frame() {
        let dir = tempdir().unwrap();
        write_all(Layout::PerFrame, dir.path());

        let bundle = load_bundle(dir.path().join("nyan_0.bin")).unwrap();

        assert_eq!(vec![0, 8, 0, 1, 0, 2, 0, 100, 0xAA, 0x01], bundle);
        assert!(Player::from_bundle(&bundle).is_ok());
    }

    #[test]
    fn load_per_animation() {
        let dir = tempdir().unwrap();
        write_all(Layout::PerAnimation, dir.path());

        assert_eq!(
            vec![0, 8, 0, 1, 0, 2, 0, 100, 0xAA, 0x01],
            load_bundle(dir.path().join("nyan.bin")).unwrap()
        );
    }

    #[test]
    fn load_later_frame() {
        let dir = tempdir().unwrap();
        write_all(Layout::PerFrame, dir.path());

        let err = load_bundle(dir.path().join("nyan_1.bin")).unwrap_err();

        assert!(err.to_string().contains("load `nyan_0.bin` instead"));
    }

    #[test]
    fn load_with_missing_frame() {
        let dir = tempdir().unwrap();
        write_all(Layout::PerFrame, dir.path());
        fs::remove_file(dir.path().join("nyan_1.bin")).unwrap();

        let err = load_bundle(dir.path().join("nyan_0.bin")).unwrap_err();

        assert!(err.to_string().contains("nyan_1.bin"));
    }

    #[test]
    fn c_array() {
        let mut array = CArray::new("galleryImages");
        array.push("nyan-cat", vec![0x00, 0x10, 0xFF]);

        assert_eq!(
            "#include \"galleryImages.h\"\n\nconst uint8_t gal_nyan_cat[3] = {\n    0x00, 0x10, 0xff,\n};\n\n",
            array.source()
        );

        assert!(array
            .header()
            .contains("extern const uint8_t gal_nyan_cat[3];"));
        assert!(array.header().starts_with("#ifndef _GALLERYIMAGES_H_\n"));
    }

    #[test]
    fn c_array_files() {
        let dir = tempdir().unwrap();
        let mut array = CArray::new("gallery");
        array.push("a", vec![1, 2, 3]);
        array.save(dir.path()).unwrap();

        assert!(dir.path().join("gallery.c").exists());
        assert!(dir.path().join("gallery.h").exists());
    }
}
