//! Fetching the raw bytes behind a [`Location`].
//!
//! Loading is the only I/O the conversion performs. Loaders return the whole
//! resource as an owned buffer; decompression and decoding happen afterwards
//! in [`crate::decode`]. Retrying failed fetches, if desired, is up to the
//! loader implementation.

use std::fs;
use std::io;

use tracing::debug;

use crate::location::Location;

/// A facility for fetching the bytes at a [`Location`].
pub trait Loader {
    /// Loads the complete contents of `location` into memory.
    fn load(&self, location: &Location) -> io::Result<Vec<u8>>;
}

/// A [`Loader`] that reads from the local filesystem.
///
/// URLs are rejected with [`io::ErrorKind::Unsupported`].
///
/// # Examples
///
/// ```
/// use chainpaf::loader::Loader as _;
/// use chainpaf::loader::Local;
///
/// let location = "https://example.com/a.chain".parse()?;
/// let err = Local.load(&location).unwrap_err();
///
/// assert_eq!(err.kind(), std::io::ErrorKind::Unsupported);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Local;

impl Loader for Local {
    fn load(&self, location: &Location) -> io::Result<Vec<u8>> {
        let path = location.as_path().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::Unsupported,
                format!("the local loader cannot fetch remote location `{location}`"),
            )
        })?;

        debug!(path = %path.display(), "reading local file");
        fs::read(path)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempdir::TempDir;

    use super::*;

    #[test]
    fn it_reads_local_files() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("chainpaf")?;
        let path = dir.path().join("a.chain");
        fs::write(&path, b"chain 0 seq0 2 + 0 2 seq0 2 + 0 2\n2\n")?;

        let bytes = Local.load(&Location::Path(path))?;
        assert_eq!(bytes, b"chain 0 seq0 2 + 0 2 seq0 2 + 0 2\n2\n");

        Ok(())
    }

    #[test]
    fn it_reports_missing_files() {
        let location = Location::Path(PathBuf::from("/this/path/does/not/exist.chain"));
        let err = Local.load(&location).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn it_rejects_urls() {
        let location = Location::Url(String::from("https://example.com/a.chain"));
        let err = Local.load(&location).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
        assert_eq!(
            err.to_string(),
            "the local loader cannot fetch remote location `https://example.com/a.chain`"
        );
    }
}
