//! Converting chain files into [alignment records](Record).

use std::io;

use tracing::debug;

use crate::decode;
use crate::loader::Loader;
use crate::location::Location;
use crate::record::Record;
use crate::records;
use crate::records::Records;

pub mod builder;

pub use builder::Builder;
pub use records::TrailingChain;

/// An error related to a [`Converter`].
#[derive(Debug)]
pub enum Error {
    /// The resource at a location could not be loaded.
    Load(Location, io::Error),

    /// The bytes could not be decoded into text.
    Decode(decode::Error),

    /// The text could not be parsed into records.
    Parse(records::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Load(location, err) => write!(f, "failed to load `{location}`: {err}"),
            Error::Decode(err) => write!(f, "{err}"),
            Error::Parse(err) => write!(f, "parse error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// Converts chain files into [alignment records](Record).
///
/// Every conversion is all-or-nothing: either every record in the input is
/// returned or an error is, never a partial list.
///
/// A [`Converter`] is generally created via a [`Builder`].
#[derive(Clone, Debug)]
pub struct Converter {
    /// The ceiling on the size of the decoded input (in bytes).
    max_decoded_size: usize,

    /// What to do with the final chain.
    trailing_chain: TrailingChain,
}

impl Converter {
    /// Gets the ceiling on the size of the decoded input (in bytes).
    pub fn max_decoded_size(&self) -> usize {
        self.max_decoded_size
    }

    /// Gets the [`TrailingChain`] behavior.
    pub fn trailing_chain(&self) -> TrailingChain {
        self.trailing_chain
    }

    /// Converts raw (optionally gzip-compressed) bytes into records.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainpaf::convert::Converter;
    ///
    /// let data = b"chain 1 chrT 100 + 0 50 chrQ 200 + 10 40 1\n10\t0\t0\n";
    /// let records = Converter::default().convert(data)?;
    ///
    /// assert_eq!(records.len(), 1);
    /// assert_eq!(
    ///     records[0].to_string(),
    ///     "chrQ\t200\t10\t40\t+\tchrT\t100\t0\t50\t10\t50\t0\tcg:Z:10M"
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn convert(&self, bytes: &[u8]) -> Result<Vec<Record>> {
        let text = decode::decode(bytes, self.max_decoded_size).map_err(Error::Decode)?;
        self.convert_str(&text)
    }

    /// Converts already-decoded text into records.
    pub fn convert_str(&self, text: &str) -> Result<Vec<Record>> {
        let records = Records::new(decode::lines(text), self.trailing_chain)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Parse)?;

        debug!(records = records.len(), "converted chain data");
        Ok(records)
    }

    /// Loads the resource at `location` with `loader` and converts it.
    pub fn load<L>(&self, loader: &L, location: &Location) -> Result<Vec<Record>>
    where
        L: Loader + ?Sized,
    {
        let bytes = loader
            .load(location)
            .map_err(|err| Error::Load(location.clone(), err))?;
        debug!(%location, bytes = bytes.len(), "loaded chain data");
        self.convert(&bytes)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Builder::default().build()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Write as _;
    use std::path::PathBuf;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use tempdir::TempDir;

    use super::*;
    use crate::loader::Local;

    const CHAINS: &str = "chain 4900 chrT 100 + 0 50 chrQ 200 + 10 40 1\n\
                          10\t5\t0\n\
                          20\t0\t0\n\
                          \n\
                          chain 3000 chrT 100 + 60 90 chrQ 200 - 10 40 2\n\
                          10\t0\t3\n\
                          17\n";

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn it_converts_plain_and_compressed_input_identically()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let converter = Converter::default();

        let plain = converter.convert(CHAINS.as_bytes())?;
        let compressed = converter.convert(&gzip(CHAINS.as_bytes()))?;

        assert_eq!(plain.len(), 2);
        assert_eq!(plain, compressed);

        Ok(())
    }

    #[test]
    fn it_is_deterministic() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let converter = Converter::default();

        let first = converter.convert(CHAINS.as_bytes())?;
        let second = converter.convert(CHAINS.as_bytes())?;

        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(|r| r.to_string()).collect::<Vec<_>>(),
            second.iter().map(|r| r.to_string()).collect::<Vec<_>>()
        );

        Ok(())
    }

    #[test]
    fn it_renders_paf_lines() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let records = Converter::default().convert(CHAINS.as_bytes())?;
        let lines = records.iter().map(|r| r.to_string()).collect::<Vec<_>>();

        assert_eq!(
            lines,
            vec![
                "chrQ\t200\t10\t40\t+\tchrT\t100\t0\t50\t30\t50\t0\tcg:Z:10M5D20M",
                "chrQ\t200\t160\t190\t-\tchrT\t100\t60\t90\t27\t30\t0\tcg:Z:10M3I17M",
            ]
        );

        Ok(())
    }

    #[test]
    fn it_honors_the_trailing_chain_behavior() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let converter = Builder::default()
            .trailing_chain(TrailingChain::Drop)
            .build();

        let records = converter.convert(CHAINS.as_bytes())?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].chain_id(), Some("1"));

        Ok(())
    }

    #[test]
    fn it_fails_before_parsing_oversized_input() {
        // The first line is invalid, so reaching the parser would produce a
        // parse error instead.
        let data = format!("garbage\n{CHAINS}");
        let converter = Builder::default().max_decoded_size(16).build();

        let err = converter.convert(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            Error::Decode(decode::Error::ResourceTooLarge(16))
        ));

        let err = converter.convert(&gzip(data.as_bytes())).unwrap_err();
        assert!(matches!(
            err,
            Error::Decode(decode::Error::ResourceTooLarge(16))
        ));
    }

    #[test]
    fn it_fails_on_invalid_utf8() {
        let mut data = CHAINS.as_bytes().to_vec();
        data[7] = 0xff;

        let err = Converter::default().convert(&data).unwrap_err();
        assert!(matches!(err, Error::Decode(decode::Error::Decode(_))));
    }

    #[test]
    fn it_returns_no_records_when_any_chain_is_malformed() {
        let data = format!("{CHAINS}chain 0 chrT 100 + 0 50 chrQ 200 + 10 400 3\n5\n");

        let err = Converter::default().convert(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse(records::Error::Line(8, _))));
    }

    #[test]
    fn it_loads_and_converts() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("chainpaf")?;
        let path = dir.path().join("a.chain.gz");
        fs::write(&path, gzip(CHAINS.as_bytes()))?;

        let records = Converter::default().load(&Local, &Location::Path(path))?;
        assert_eq!(records.len(), 2);

        Ok(())
    }

    #[test]
    fn it_surfaces_load_errors() {
        let location = Location::Url(String::from("https://example.com/a.chain"));
        let err = Converter::default().load(&Local, &location).unwrap_err();

        assert!(matches!(err, Error::Load(ref l, _) if *l == location));
    }

    #[test]
    fn it_names_the_missing_file() {
        let location = Location::Path(PathBuf::from("/this/path/does/not/exist.chain"));
        let err = Converter::default().load(&Local, &location).unwrap_err();

        match err {
            Error::Load(ref l, ref inner) => {
                assert_eq!(*l, location);
                assert_eq!(inner.kind(), io::ErrorKind::NotFound);
            }
            _ => panic!("expected a load error, found {err:?}"),
        }

        assert!(
            err.to_string()
                .starts_with("failed to load `/this/path/does/not/exist.chain`: ")
        );
    }

    #[test]
    fn it_accepts_a_leading_byte_order_mark() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let data = format!("\u{feff}{CHAINS}");
        let converter = Converter::default();

        let expected = converter.convert(CHAINS.as_bytes())?;
        assert_eq!(converter.convert(data.as_bytes())?, expected);
        assert_eq!(converter.convert(&gzip(data.as_bytes()))?, expected);

        Ok(())
    }

    #[test]
    fn it_accepts_trailing_delimiters() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = "chain 4900 chrT 100 + 0 50 chrQ 200 + 10 40 1 \n\
                    10\t5\t0\t\n\
                    20 \n";

        let records = Converter::default().convert(data.as_bytes())?;

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].to_string(),
            "chrQ\t200\t10\t40\t+\tchrT\t100\t0\t50\t30\t50\t0\tcg:Z:10M5D20M"
        );

        Ok(())
    }
}
