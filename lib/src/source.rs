use std::{fs, io};
use std::fmt::Debug;
use std::path::Path;

use crate::error::{Error, Kind, Result};

/// Reads the raw text of a file-backed [`Page`](crate::Page).
///
/// Any failure to produce the text, missing or unreadable, is reported as
/// [`Kind::SourceNotFound`].
pub trait Loader: Debug + Send + Sync {
    fn load(&self, path: &Path) -> Result<String>;
}

/// A [`Loader`] that reads from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLoader;

impl Loader for FsLoader {
    fn load(&self, path: &Path) -> Result<String> {
        use io::Read;

        let read = || -> io::Result<String> {
            let mut string = String::new();
            let mut file = io::BufReader::new(fs::File::open(path)?);
            file.read_to_string(&mut string)?;
            Ok(string)
        };

        read().map_err(|e| {
            let reason = match e.kind() {
                io::ErrorKind::NotFound => "file does not exist",
                io::ErrorKind::InvalidData => "file is not valid UTF-8",
                _ => "file could not be read",
            };

            Error::new(Kind::SourceNotFound, e)
                .chain(error! {
                    "failed to load page source",
                    "file path" => path.display(),
                    "reason" => reason,
                })
                .with_kind(Kind::SourceNotFound)
        })
    }
}

impl<L: Loader + ?Sized> Loader for &L {
    fn load(&self, path: &Path) -> Result<String> {
        L::load(self, path)
    }
}

impl<L: Loader + ?Sized> Loader for std::sync::Arc<L> {
    fn load(&self, path: &Path) -> Result<String> {
        L::load(self, path)
    }
}
