use std::{
    fs::File,
    io::{self, Read},
    path::PathBuf,
};

/// A file reader that defers opening the file until the first read.
#[derive(Debug)]
pub(crate) struct LazyFile {
    path: PathBuf,
    file: Option<File>,
}

impl LazyFile {
    pub(crate) fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }
}

impl Read for LazyFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let file = match &mut self.file {
            Some(file) => file,
            file => {
                trace!("opening {}", self.path.display());
                file.insert(File::open(&self.path)?)
            }
        };

        file.read(buf)
    }
}
