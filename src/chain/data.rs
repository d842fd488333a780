//! An alignment data record.

use std::num::ParseIntError;
use std::str::FromStr;

use omics::coordinate::position::Number;

use crate::chain;

/// The delimiter used when rendering an alignment data record.
const DELIMITER: char = '\t';

/// The maximum number of fields in an alignment data record.
pub const MAX_DATA_FIELDS: usize = 3;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to the parsing of an alignment data record.
#[derive(Debug)]
pub enum ParseError {
    /// An incorrect number of fields in the alignment data line.
    IncorrectNumberOfFields(usize),

    /// An invalid size.
    InvalidSize(ParseIntError),

    /// An invalid dt.
    InvalidDt(ParseIntError),

    /// An invalid dq.
    InvalidDq(ParseIntError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(n) => write!(
                f,
                "invalid number of fields in alignment data: expected at most {MAX_DATA_FIELDS} \
                 fields, found {n} fields"
            ),
            ParseError::InvalidSize(err) => write!(f, "invalid size: {err}"),
            ParseError::InvalidDt(err) => write!(f, "invalid dt: {err}"),
            ParseError::InvalidDq(err) => write!(f, "invalid dq: {err}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// An error related to a [`Record`].
#[derive(Debug)]
pub enum Error {
    /// A parse error.
    Parse(ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Parse(err) => write!(f, "parse error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Record
////////////////////////////////////////////////////////////////////////////////////////

/// An alignment data record within a chain file.
///
/// Each record describes an ungapped block of aligned bases (`size`)
/// followed by the gap to the next block on the target (`dt`) and on the
/// query (`dq`). The last record of a chain conventionally omits both gaps.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The size of the ungapped alignment.
    size: Number,

    /// The following target offset.
    dt: Option<Number>,

    /// The following query offset.
    dq: Option<Number>,
}

impl Record {
    /// Creates a new [`Record`].
    ///
    /// # Examples
    ///
    /// ```
    /// use chainpaf::chain::data::Record;
    ///
    /// let record = Record::new(10, Some(0), Some(1));
    ///
    /// assert_eq!(record.size(), 10);
    /// assert_eq!(record.dt(), Some(0));
    /// assert_eq!(record.dq(), Some(1));
    /// ```
    pub fn new(size: Number, dt: Option<Number>, dq: Option<Number>) -> Self {
        Self { size, dt, dq }
    }

    /// Retuns the size of the ungapped alignment.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainpaf::chain::data;
    ///
    /// let alignment: data::Record = "9\t1\t0".parse()?;
    /// assert_eq!(alignment.size(), 9);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn size(&self) -> Number {
        self.size
    }

    /// Returns the difference between this block and the next block for the
    /// target sequence, if it was present.
    pub fn dt(&self) -> Option<Number> {
        self.dt
    }

    /// Returns the difference between this block and the next block for the
    /// query sequence, if it was present.
    pub fn dq(&self) -> Option<Number> {
        self.dq
    }

    /// Returns the gap on the target sequence, defaulting to zero when absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainpaf::chain::data;
    ///
    /// let alignment: data::Record = "9".parse()?;
    /// assert_eq!(alignment.dt(), None);
    /// assert_eq!(alignment.target_gap(), 0);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn target_gap(&self) -> Number {
        self.dt.unwrap_or_default()
    }

    /// Returns the gap on the query sequence, defaulting to zero when absent.
    pub fn query_gap(&self) -> Number {
        self.dq.unwrap_or_default()
    }
}

impl FromStr for Record {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts = chain::fields(s).collect::<Vec<_>>();

        if parts.len() > MAX_DATA_FIELDS {
            return Err(Error::Parse(ParseError::IncorrectNumberOfFields(
                parts.len(),
            )));
        }

        let size = parts[0]
            .parse()
            .map_err(|err| Error::Parse(ParseError::InvalidSize(err)))?;

        let dt = parts
            .get(1)
            .map(|dt| dt.parse::<Number>())
            .transpose()
            .map_err(|err| Error::Parse(ParseError::InvalidDt(err)))?;

        let dq = parts
            .get(2)
            .map(|dq| dq.parse::<Number>())
            .transpose()
            .map_err(|err| Error::Parse(ParseError::InvalidDq(err)))?;

        Ok(Record { size, dt, dq })
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.size)?;

        if let Some(dt) = self.dt {
            write!(f, "{DELIMITER}{dt}")?;
        }

        if let Some(dq) = self.dq {
            write!(f, "{DELIMITER}{dq}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonterminating_alignment_data() {
        let record = "9\t1\t0".parse::<Record>().unwrap();

        assert_eq!(record.size(), 9);
        assert_eq!(record.dt(), Some(1));
        assert_eq!(record.dq(), Some(0));
        assert_eq!(record.target_gap(), 1);
        assert_eq!(record.query_gap(), 0);
    }

    #[test]
    fn terminating_alignment_data() {
        let record = "9".parse::<Record>().unwrap();

        assert_eq!(record.size(), 9);
        assert_eq!(record.dt(), None);
        assert_eq!(record.dq(), None);
        assert_eq!(record.target_gap(), 0);
        assert_eq!(record.query_gap(), 0);
    }

    #[test]
    fn partial_alignment_data() {
        let record = "9 4".parse::<Record>().unwrap();

        assert_eq!(record.size(), 9);
        assert_eq!(record.dt(), Some(4));
        assert_eq!(record.dq(), None);
        assert_eq!(record.query_gap(), 0);
    }

    #[test]
    fn space_delimited_alignment_data() {
        let record = "9 1 2".parse::<Record>().unwrap();
        assert_eq!(record, Record::new(9, Some(1), Some(2)));
    }

    #[test]
    fn invalid_number_of_fields() {
        let err = "9\t0\t1\t2".parse::<Record>().unwrap_err();

        assert!(matches!(
            err,
            Error::Parse(ParseError::IncorrectNumberOfFields(4))
        ));

        assert_eq!(
            err.to_string(),
            "parse error: invalid number of fields in alignment data: expected at most 3 fields, \
             found 4 fields"
        );
    }

    #[test]
    fn invalid_size() {
        let err = "?\t0\t1".parse::<Record>().unwrap_err();

        assert!(matches!(err, Error::Parse(ParseError::InvalidSize(_))));
        assert_eq!(
            err.to_string(),
            "parse error: invalid size: invalid digit found in string"
        );
    }

    #[test]
    fn invalid_dt() {
        let err = "9\t?\t1".parse::<Record>().unwrap_err();

        assert!(matches!(err, Error::Parse(ParseError::InvalidDt(_))));
        assert_eq!(
            err.to_string(),
            "parse error: invalid dt: invalid digit found in string"
        );
    }

    #[test]
    fn invalid_dq() {
        let err = "9\t0\t?".parse::<Record>().unwrap_err();

        assert!(matches!(err, Error::Parse(ParseError::InvalidDq(_))));
        assert_eq!(
            err.to_string(),
            "parse error: invalid dq: invalid digit found in string"
        );
    }

    #[test]
    fn empty_field_is_not_coerced_to_zero() {
        let err = "9\t\t1".parse::<Record>().unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::InvalidDt(_))));
    }

    #[test]
    fn trailing_delimiters_are_ignored() {
        let record = "10\t0\t0\t".parse::<Record>().unwrap();
        assert_eq!(record, Record::new(10, Some(0), Some(0)));

        let record = "10 ".parse::<Record>().unwrap();
        assert_eq!(record, Record::new(10, None, None));
    }

    #[test]
    fn negative_values_are_rejected() {
        let err = "-9".parse::<Record>().unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::InvalidSize(_))));
    }

    #[test]
    fn alignment_data_display() {
        assert_eq!(Record::new(9, Some(1), Some(0)).to_string(), "9\t1\t0");
        assert_eq!(Record::new(9, Some(1), None).to_string(), "9\t1");
        assert_eq!(Record::new(9, None, None).to_string(), "9");
    }
}
