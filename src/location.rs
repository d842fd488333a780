//! Locations from which chain files can be loaded.

use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// The scheme used for local file URLs.
const FILE_SCHEME: &str = "file";

/// Matches a URL scheme (e.g., `https://`) at the start of a location.
static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*)://(.*)$").unwrap());

/// An error related to parsing a [`Location`].
#[derive(Debug)]
pub enum ParseError {
    /// The location was empty.
    Empty,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty location"),
        }
    }
}

impl std::error::Error for ParseError {}

/// A location of a chain file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Location {
    /// A path on the local filesystem.
    Path(PathBuf),

    /// A remote URL.
    Url(String),
}

impl Location {
    /// Gets the path if this is a local location.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Location::Path(path) => Some(path),
            Location::Url(_) => None,
        }
    }

    /// Gets the URL if this is a remote location.
    pub fn as_url(&self) -> Option<&str> {
        match self {
            Location::Path(_) => None,
            Location::Url(url) => Some(url),
        }
    }
}

impl FromStr for Location {
    type Err = ParseError;

    /// Parses a location.
    ///
    /// Anything with a URL scheme is treated as a URL, except for `file://`
    /// URLs, which are converted into paths. Everything else is a path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    ///
    /// use chainpaf::location::Location;
    ///
    /// assert_eq!(
    ///     "hg19ToHg38.over.chain.gz".parse::<Location>()?,
    ///     Location::Path(PathBuf::from("hg19ToHg38.over.chain.gz"))
    /// );
    /// assert_eq!(
    ///     "file:///data/a.chain".parse::<Location>()?,
    ///     Location::Path(PathBuf::from("/data/a.chain"))
    /// );
    /// assert_eq!(
    ///     "https://example.com/a.chain".parse::<Location>()?,
    ///     Location::Url(String::from("https://example.com/a.chain"))
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::Empty);
        }

        match SCHEME.captures(s) {
            Some(captures) => {
                let (_, [scheme, rest]) = captures.extract();

                if scheme.eq_ignore_ascii_case(FILE_SCHEME) {
                    Ok(Location::Path(PathBuf::from(rest)))
                } else {
                    Ok(Location::Url(s.to_string()))
                }
            }
            None => Ok(Location::Path(PathBuf::from(s))),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Path(path) => write!(f, "{}", path.display()),
            Location::Url(url) => write!(f, "{url}"),
        }
    }
}
