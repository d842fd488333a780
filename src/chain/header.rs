//! A header record.

pub mod sequence;

use std::str::FromStr;

use omics::coordinate::Strand;
pub use sequence::Sequence;

use crate::chain;

/// The prefix for a header record.
pub const HEADER_PREFIX: &str = "chain";

/// The delimiter used when rendering a header record.
pub const DELIMITER: char = ' ';

/// The minimum number of fields in a header record (the chain id is
/// optional).
pub const MIN_HEADER_FIELDS: usize = 12;

/// The maximum number of fields in a header record.
pub const MAX_HEADER_FIELDS: usize = 13;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error associated with parsing a header record.
#[derive(Debug)]
pub enum ParseError {
    /// An incorrect number of fields in the header line.
    IncorrectNumberOfFields(usize),

    /// An invalid prefix.
    InvalidPrefix(String),

    /// An invalid target sequence.
    InvalidTargetSequence(sequence::Error),

    /// An invalid query sequence.
    InvalidQuerySequence(sequence::Error),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(fields) => write!(
                f,
                "invalid number of fields in header: expected {MIN_HEADER_FIELDS} or \
                 {MAX_HEADER_FIELDS} fields, found {fields} fields"
            ),
            ParseError::InvalidPrefix(prefix) => {
                write!(
                    f,
                    "invalid prefix: expected \"{HEADER_PREFIX}\", found \"{prefix}\""
                )
            }
            ParseError::InvalidTargetSequence(err) => {
                write!(f, "invalid target sequence: {err}")
            }
            ParseError::InvalidQuerySequence(err) => write!(f, "invalid query sequence: {err}"),
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

/// A header record within a chain file.
///
/// The query sequence is normalized into forward-strand coordinates exactly
/// once, when the record is parsed. The target sequence is kept as written.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The chain score.
    ///
    /// This is kept verbatim: the score plays no part in the conversion.
    score: String,

    /// The target (reference) sequence.
    target_sequence: Sequence,

    /// The query sequence, in forward-strand coordinates.
    query_sequence: Sequence,

    /// The chain id, if one was present.
    id: Option<String>,
}

impl Record {
    /// Gets the score.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainpaf::chain::header;
    ///
    /// let header = "chain 4900 chrT 100 + 0 50 chrQ 200 - 10 40 1".parse::<header::Record>()?;
    /// assert_eq!(header.score(), "4900");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn score(&self) -> &str {
        &self.score
    }

    /// Gets the target sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainpaf::chain::header;
    /// use omics::coordinate::Strand;
    ///
    /// let header = "chain 0 chrT 100 + 0 50 chrQ 200 - 10 40 1".parse::<header::Record>()?;
    ///
    /// assert_eq!(header.target_sequence().chromosome_name(), "chrT");
    /// assert_eq!(header.target_sequence().chromosome_size(), 100);
    /// assert_eq!(header.target_sequence().strand(), Strand::Positive);
    /// assert_eq!(header.target_sequence().alignment_start(), 0);
    /// assert_eq!(header.target_sequence().alignment_end(), 50);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn target_sequence(&self) -> &Sequence {
        &self.target_sequence
    }

    /// Gets the query sequence in forward-strand coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainpaf::chain::header;
    /// use omics::coordinate::Strand;
    ///
    /// let header = "chain 0 chrT 100 + 0 50 chrQ 200 - 10 40 1".parse::<header::Record>()?;
    ///
    /// assert_eq!(header.query_sequence().chromosome_name(), "chrQ");
    /// assert_eq!(header.query_sequence().chromosome_size(), 200);
    /// assert_eq!(header.query_sequence().strand(), Strand::Negative);
    /// assert_eq!(header.query_sequence().alignment_start(), 160);
    /// assert_eq!(header.query_sequence().alignment_end(), 190);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn query_sequence(&self) -> &Sequence {
        &self.query_sequence
    }

    /// Gets the chain id (if it exists).
    ///
    /// # Examples
    ///
    /// ```
    /// use chainpaf::chain::header;
    ///
    /// let header = "chain 0 chrT 100 + 0 50 chrQ 200 - 10 40 7".parse::<header::Record>()?;
    /// assert_eq!(header.id(), Some("7"));
    ///
    /// let header = "chain 0 chrT 100 + 0 50 chrQ 200 - 10 40".parse::<header::Record>()?;
    /// assert_eq!(header.id(), None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl FromStr for Record {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts = chain::fields(s).collect::<Vec<_>>();

        if !(MIN_HEADER_FIELDS..=MAX_HEADER_FIELDS).contains(&parts.len()) {
            return Err(Error::Parse(ParseError::IncorrectNumberOfFields(
                parts.len(),
            )));
        }

        let prefix = parts[0];
        if prefix != HEADER_PREFIX {
            return Err(Error::Parse(ParseError::InvalidPrefix(prefix.into())));
        }

        let score = parts[1].to_string();
        let target_sequence = Sequence::try_new(parts[2], parts[3], parts[4], parts[5], parts[6])
            .map_err(|err| Error::Parse(ParseError::InvalidTargetSequence(err)))?;
        let query_sequence = Sequence::try_new(parts[7], parts[8], parts[9], parts[10], parts[11])
            .map_err(|err| Error::Parse(ParseError::InvalidQuerySequence(err)))?
            .into_forward_strand();
        let id = parts.get(12).map(|id| id.to_string());

        Ok(Record {
            score,
            target_sequence,
            query_sequence,
            id,
        })
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let target_sequence = self.target_sequence.to_string();

        // The query is rendered back in its original coordinate frame.
        let query_sequence = match self.query_sequence.strand() {
            Strand::Positive => self.query_sequence.to_string(),
            Strand::Negative => self.query_sequence.flip().to_string(),
        };

        let mut parts = vec![
            HEADER_PREFIX,
            self.score.as_str(),
            target_sequence.as_str(),
            query_sequence.as_str(),
        ];

        if let Some(id) = &self.id {
            parts.push(id.as_str());
        }

        write!(f, "{}", parts.join(DELIMITER.to_string().as_str()))
    }
}
