//! CIGAR edit scripts built from chain alignment data.
//!
//! A [`Cigar`] is a non-empty series of [`Op`]s, each a run length paired
//! with a [`Kind`] (match, insertion or deletion). Chains only ever produce
//! these three kinds of operations.

use std::num::ParseIntError;
use std::str::FromStr;

use nonempty::NonEmpty;
use omics::coordinate::position::Number;

mod builder;

pub use builder::Builder;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to the parsing of a [`Cigar`].
#[derive(Debug)]
pub enum ParseError {
    /// The CIGAR string contained no operations.
    Empty,

    /// An operation was missing its length.
    MissingLength(char),

    /// An operation had an invalid length.
    InvalidLength(ParseIntError),

    /// An operation had a length of zero.
    ZeroLength(char),

    /// An unsupported operation character.
    InvalidKind(char),

    /// The CIGAR string ended with a length that had no operation.
    TrailingLength(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty CIGAR string"),
            ParseError::MissingLength(kind) => {
                write!(f, "missing length for operation `{kind}`")
            }
            ParseError::InvalidLength(err) => write!(f, "invalid length: {err}"),
            ParseError::ZeroLength(kind) => write!(f, "zero length for operation `{kind}`"),
            ParseError::InvalidKind(kind) => write!(
                f,
                "invalid operation: expected one of `M`, `I`, or `D`, found `{kind}`"
            ),
            ParseError::TrailingLength(length) => {
                write!(f, "length `{length}` is not followed by an operation")
            }
        }
    }
}

impl std::error::Error for ParseError {}

////////////////////////////////////////////////////////////////////////////////////////
// Operations
////////////////////////////////////////////////////////////////////////////////////////

/// The kind of a CIGAR operation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    /// An alignment match (`M`).
    Match,

    /// An insertion into the target, i.e., bases present only in the query
    /// (`I`).
    Insertion,

    /// A deletion from the target, i.e., bases present only in the target
    /// (`D`).
    Deletion,
}

impl Kind {
    /// Gets the character used to represent the kind within a CIGAR string.
    pub fn as_char(&self) -> char {
        match self {
            Kind::Match => 'M',
            Kind::Insertion => 'I',
            Kind::Deletion => 'D',
        }
    }
}

impl TryFrom<char> for Kind {
    type Error = ParseError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'M' => Ok(Kind::Match),
            'I' => Ok(Kind::Insertion),
            'D' => Ok(Kind::Deletion),
            c => Err(ParseError::InvalidKind(c)),
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A single CIGAR operation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Op {
    /// The kind of operation.
    kind: Kind,

    /// The run length.
    len: Number,
}

impl Op {
    /// Creates a new [`Op`].
    ///
    /// # Examples
    ///
    /// ```
    /// use chainpaf::cigar::Kind;
    /// use chainpaf::cigar::Op;
    ///
    /// let op = Op::new(Kind::Insertion, 2);
    ///
    /// assert_eq!(op.kind(), Kind::Insertion);
    /// assert_eq!(op.len(), 2);
    /// assert_eq!(op.to_string(), "2I");
    /// ```
    pub fn new(kind: Kind, len: Number) -> Self {
        Self { kind, len }
    }

    /// Gets the kind of operation.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Gets the run length.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> Number {
        self.len
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.len, self.kind)
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// CIGAR
////////////////////////////////////////////////////////////////////////////////////////

/// A CIGAR edit script.
///
/// Adjacent operations of the same kind are kept as-is and are never merged.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cigar(NonEmpty<Op>);

impl Cigar {
    /// Gets the operations within the CIGAR.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainpaf::cigar::Cigar;
    /// use chainpaf::cigar::Kind;
    ///
    /// let cigar = "10M5M2I".parse::<Cigar>()?;
    /// let kinds = cigar.ops().iter().map(|op| op.kind()).collect::<Vec<_>>();
    ///
    /// assert_eq!(kinds, vec![Kind::Match, Kind::Match, Kind::Insertion]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn ops(&self) -> &NonEmpty<Op> {
        &self.0
    }

    /// Gets the number of target bases consumed by the CIGAR (matches and
    /// deletions).
    pub fn target_len(&self) -> Number {
        self.0
            .iter()
            .filter(|op| matches!(op.kind(), Kind::Match | Kind::Deletion))
            .map(|op| op.len())
            .sum()
    }

    /// Gets the number of query bases consumed by the CIGAR (matches and
    /// insertions).
    pub fn query_len(&self) -> Number {
        self.0
            .iter()
            .filter(|op| matches!(op.kind(), Kind::Match | Kind::Insertion))
            .map(|op| op.len())
            .sum()
    }
}

impl From<NonEmpty<Op>> for Cigar {
    fn from(ops: NonEmpty<Op>) -> Self {
        Self(ops)
    }
}

impl FromStr for Cigar {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut ops: Option<NonEmpty<Op>> = None;
        let mut length = String::new();

        for c in s.chars() {
            if c.is_ascii_digit() {
                length.push(c);
                continue;
            }

            let kind = Kind::try_from(c)?;

            if length.is_empty() {
                return Err(ParseError::MissingLength(c));
            }

            let len = length
                .parse::<Number>()
                .map_err(ParseError::InvalidLength)?;

            if len == 0 {
                return Err(ParseError::ZeroLength(c));
            }

            length.clear();

            let op = Op::new(kind, len);
            match ops.as_mut() {
                Some(ops) => ops.push(op),
                None => ops = Some(NonEmpty::new(op)),
            }
        }

        if !length.is_empty() {
            return Err(ParseError::TrailingLength(length));
        }

        ops.map(Cigar).ok_or(ParseError::Empty)
    }
}

impl std::fmt::Display for Cigar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for op in self.0.iter() {
            write!(f, "{op}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_and_displays_a_cigar() -> Result<(), Box<dyn std::error::Error>> {
        let cigar = "10M5M2I3M1D".parse::<Cigar>()?;

        assert_eq!(cigar.ops().len(), 5);
        assert_eq!(cigar.ops().head, Op::new(Kind::Match, 10));
        assert_eq!(cigar.ops().last(), &Op::new(Kind::Deletion, 1));
        assert_eq!(cigar.to_string(), "10M5M2I3M1D");

        Ok(())
    }

    #[test]
    fn it_counts_consumed_bases() -> Result<(), Box<dyn std::error::Error>> {
        let cigar = "10M5M2I3M1D".parse::<Cigar>()?;

        assert_eq!(cigar.target_len(), 19);
        assert_eq!(cigar.query_len(), 20);

        Ok(())
    }

    #[test]
    fn it_rejects_an_empty_cigar() {
        let err = "".parse::<Cigar>().unwrap_err();
        assert!(matches!(err, ParseError::Empty));
    }

    #[test]
    fn it_rejects_unsupported_operations() {
        let err = "10M5S".parse::<Cigar>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid operation: expected one of `M`, `I`, or `D`, found `S`"
        );
    }

    #[test]
    fn it_rejects_malformed_lengths() {
        assert!(matches!(
            "M".parse::<Cigar>().unwrap_err(),
            ParseError::MissingLength('M')
        ));
        assert!(matches!(
            "0M".parse::<Cigar>().unwrap_err(),
            ParseError::ZeroLength('M')
        ));
        assert!(matches!(
            "10M5".parse::<Cigar>().unwrap_err(),
            ParseError::TrailingLength(_)
        ));
        assert!(matches!(
            "99999999999999999999999M".parse::<Cigar>().unwrap_err(),
            ParseError::InvalidLength(_)
        ));
    }
}
