//! A sequence within a header record.

use std::num::ParseIntError;

use omics::coordinate::Strand;
use omics::coordinate::position::Number;
use omics::coordinate::strand;

/// The delimiter used when rendering a sequence.
const DELIMITER: char = ' ';

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// Errors associated with parsing a sequence.
#[derive(Debug)]
pub enum ParseError {
    /// An invalid chromosome size.
    InvalidChromosomeSize(ParseIntError),

    /// An invalid strand.
    InvalidStrand(strand::Error),

    /// An invalid alignment start.
    InvalidAlignmentStart(ParseIntError),

    /// An invalid alignment end.
    InvalidAlignmentEnd(ParseIntError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidChromosomeSize(err) => write!(f, "invalid chromosome size: {err}"),
            ParseError::InvalidStrand(err) => write!(f, "invalid strand: {err}"),
            ParseError::InvalidAlignmentStart(err) => write!(f, "invalid alignment start: {err}"),
            ParseError::InvalidAlignmentEnd(err) => write!(f, "invalid alignment end: {err}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// An error related to a [`Sequence`].
#[derive(Debug)]
pub enum Error {
    /// A parse error.
    Parse(ParseError),

    /// The alignment start is greater than the alignment end.
    StartExceedsEnd(Number, Number),

    /// The alignment end is greater than the size of the chromosome.
    EndExceedsSize(String, Number, Number),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Parse(err) => write!(f, "parse error: {err}"),
            Error::StartExceedsEnd(start, end) => write!(
                f,
                "the start position ({start}) is greater than the end position ({end})"
            ),
            Error::EndExceedsSize(chrom, end, size) => write!(
                f,
                "the end position ({end}) exceeds the size of the chromosome `{chrom}` ({size})"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Sequence
////////////////////////////////////////////////////////////////////////////////////////

/// The sequence portion(s) of a header record.
///
/// The alignment start and end are always stored in the coordinate frame of
/// the strand reported by [`Sequence::strand()`] at construction. Use
/// [`Sequence::into_forward_strand()`] to move a negative-stranded sequence
/// into forward-strand coordinates.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sequence {
    /// The chromosome name.
    chromosome_name: String,

    /// The chromosome size.
    chromosome_size: Number,

    /// The strand.
    strand: Strand,

    /// The start of the alignment.
    alignment_start: Number,

    /// The end of the alignment.
    alignment_end: Number,
}

impl Sequence {
    /// Attempts to create a new sequence from the raw fields of a header line.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainpaf::chain::header::Sequence;
    /// use omics::coordinate::Strand;
    ///
    /// let sequence = Sequence::try_new("seq0", "2", "+", "0", "2")?;
    ///
    /// assert_eq!(sequence.chromosome_name(), "seq0");
    /// assert_eq!(sequence.chromosome_size(), 2);
    /// assert_eq!(sequence.strand(), Strand::Positive);
    /// assert_eq!(sequence.alignment_start(), 0);
    /// assert_eq!(sequence.alignment_end(), 2);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(
        chromosome_name: &str,
        chromosome_size: &str,
        strand: &str,
        alignment_start: &str,
        alignment_end: &str,
    ) -> Result<Self> {
        let chromosome_size = chromosome_size
            .parse()
            .map_err(|err| Error::Parse(ParseError::InvalidChromosomeSize(err)))?;
        let strand = strand
            .parse()
            .map_err(|err| Error::Parse(ParseError::InvalidStrand(err)))?;
        let alignment_start = alignment_start
            .parse()
            .map_err(|err| Error::Parse(ParseError::InvalidAlignmentStart(err)))?;
        let alignment_end = alignment_end
            .parse()
            .map_err(|err| Error::Parse(ParseError::InvalidAlignmentEnd(err)))?;

        if alignment_start > alignment_end {
            return Err(Error::StartExceedsEnd(alignment_start, alignment_end));
        }

        if alignment_end > chromosome_size {
            return Err(Error::EndExceedsSize(
                chromosome_name.into(),
                alignment_end,
                chromosome_size,
            ));
        }

        Ok(Self {
            chromosome_name: chromosome_name.into(),
            chromosome_size,
            strand,
            alignment_start,
            alignment_end,
        })
    }

    /// Gets the chromosome name.
    pub fn chromosome_name(&self) -> &str {
        &self.chromosome_name
    }

    /// Gets the chromosome size.
    pub fn chromosome_size(&self) -> Number {
        self.chromosome_size
    }

    /// Gets the strand.
    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Gets the alignment start.
    pub fn alignment_start(&self) -> Number {
        self.alignment_start
    }

    /// Gets the alignment end.
    pub fn alignment_end(&self) -> Number {
        self.alignment_end
    }

    /// Gets the number of bases spanned by the alignment.
    pub fn span(&self) -> Number {
        self.alignment_end - self.alignment_start
    }

    /// Mirrors the alignment interval onto the opposite end of the
    /// chromosome.
    ///
    /// The start becomes `size - end` and the end becomes `size - start`. The
    /// strand is left untouched. Flipping twice yields the original
    /// sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainpaf::chain::header::Sequence;
    ///
    /// let sequence = Sequence::try_new("seq0", "200", "-", "10", "40")?;
    /// let flipped = sequence.flip();
    ///
    /// assert_eq!(flipped.alignment_start(), 160);
    /// assert_eq!(flipped.alignment_end(), 190);
    /// assert_eq!(flipped.flip(), sequence);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn flip(&self) -> Self {
        // Both subtractions are bounded by the `end <= size` and
        // `start <= end` checks performed at construction.
        Self {
            chromosome_name: self.chromosome_name.clone(),
            chromosome_size: self.chromosome_size,
            strand: self.strand,
            alignment_start: self.chromosome_size - self.alignment_end,
            alignment_end: self.chromosome_size - self.alignment_start,
        }
    }

    /// Consumes `self` and returns the sequence with its alignment interval
    /// expressed in forward-strand coordinates.
    ///
    /// Positive-stranded sequences are returned unchanged; negative-stranded
    /// ones are [flipped](Sequence::flip()). The strand itself is preserved so
    /// that the original orientation is still known.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainpaf::chain::header::Sequence;
    /// use omics::coordinate::Strand;
    ///
    /// let sequence = Sequence::try_new("chrQ", "200", "-", "10", "40")?.into_forward_strand();
    ///
    /// assert_eq!(sequence.strand(), Strand::Negative);
    /// assert_eq!(sequence.alignment_start(), 160);
    /// assert_eq!(sequence.alignment_end(), 190);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn into_forward_strand(self) -> Self {
        match self.strand {
            Strand::Positive => self,
            Strand::Negative => self.flip(),
        }
    }
}

impl std::fmt::Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let chromosome_size = self.chromosome_size.to_string();
        let strand = self.strand.to_string();
        let alignment_start = self.alignment_start.to_string();
        let alignment_end = self.alignment_end.to_string();

        let parts = [
            self.chromosome_name.as_str(),
            chromosome_size.as_str(),
            strand.as_str(),
            alignment_start.as_str(),
            alignment_end.as_str(),
        ];

        write!(f, "{}", parts.join(DELIMITER.to_string().as_str()))
    }
}
