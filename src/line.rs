//! A line within a chain file.

use std::str::FromStr;

use crate::chain;
use crate::chain::data;
use crate::chain::header;
use crate::chain::header::HEADER_PREFIX;

/// An error associated with parsing a line.
#[derive(Debug)]
pub enum Error {
    /// An invalid header record.
    InvalidHeader(header::Error, String),

    /// An invalid alignment data record.
    InvalidData(data::Error, String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidHeader(err, line) => {
                write!(f, "invalid header record: {err}\n\nline: {line}")
            }
            Error::InvalidData(err, line) => {
                write!(f, "invalid alignment data record: {err}\n\nline: {line}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A line within a chain file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Line {
    /// An empty line.
    Empty,

    /// A header line.
    Header(header::Record),

    /// An alignment data line.
    Data(data::Record),
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Line::Empty => write!(f, ""),
            Line::Header(record) => write!(f, "{record}"),
            Line::Data(record) => write!(f, "{record}"),
        }
    }
}

impl FromStr for Line {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::Empty);
        }

        match chain::fields(s).next() {
            Some(HEADER_PREFIX) => s
                .parse()
                .map(Line::Header)
                .map_err(|err| Error::InvalidHeader(err, s.into())),
            _ => s
                .parse()
                .map(Line::Data)
                .map_err(|err| Error::InvalidData(err, s.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_header_line() -> Result<(), Box<dyn std::error::Error>> {
        let line = "chain 0 seq0 2 + 0 2 seq0 2 - 0 2 1".parse::<Line>()?;
        assert!(matches!(line, Line::Header(_)));

        let line = "chain\t0\tseq0\t2\t+\t0\t2\tseq0\t2\t-\t0\t2\t1".parse::<Line>()?;
        assert!(matches!(line, Line::Header(_)));

        Ok(())
    }

    #[test]
    fn test_valid_alignment_data_lines() -> Result<(), Box<dyn std::error::Error>> {
        for s in ["9\t0\t1", "9 0 1", "9\t0", "9"] {
            let line = s.parse::<Line>()?;
            assert!(matches!(line, Line::Data(_)));
        }

        Ok(())
    }

    #[test]
    fn test_empty_line() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("".parse::<Line>()?, Line::Empty);
        Ok(())
    }

    #[test]
    fn test_prefix_must_be_a_whole_field() {
        let err = "chains 0 seq0 2 + 0 2 seq0 2 - 0 2 1"
            .parse::<Line>()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidData(_, _)));
    }

    #[test]
    fn test_invalid_header_line() {
        let err = "chain 0 seq0 2 + 0 2 seq0 2 - 0 ?"
            .parse::<Line>()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid header record: parse error: invalid query sequence: parse error: invalid \
             alignment end: invalid digit found in string\n\nline: chain 0 seq0 2 + 0 2 seq0 2 - \
             0 ?"
        );
    }

    #[test]
    fn test_invalid_alignment_data_line() {
        let err = "9\tx".parse::<Line>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid alignment data record: parse error: invalid dt: invalid digit found in \
             string\n\nline: 9\tx"
        );
    }
}
