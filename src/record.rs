//! Normalized alignment records emitted for each chain.

use omics::coordinate::Strand;
use omics::coordinate::position::Number;

use crate::chain::header;
use crate::chain::header::Sequence;
use crate::cigar::Cigar;

/// The mapping quality reported for every record.
///
/// Chain files carry no per-chain quality score.
pub const MAPPING_QUALITY: u8 = 0;

/// The delimiter used when rendering a record as a PAF line.
const DELIMITER: char = '\t';

/// The tag prefix for the CIGAR string within a PAF line.
const CIGAR_TAG: &str = "cg:Z:";

////////////////////////////////////////////////////////////////////////////////////////
// Region
////////////////////////////////////////////////////////////////////////////////////////

/// A region of a named sequence in forward-strand coordinates.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Region {
    /// The sequence name.
    name: String,

    /// The size of the whole sequence.
    size: Number,

    /// The start of the region.
    start: Number,

    /// The end of the region.
    end: Number,
}

impl Region {
    /// Gets the sequence name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the size of the whole sequence.
    pub fn size(&self) -> Number {
        self.size
    }

    /// Gets the start of the region.
    pub fn start(&self) -> Number {
        self.start
    }

    /// Gets the end of the region.
    pub fn end(&self) -> Number {
        self.end
    }

    /// Gets the number of bases within the region.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> Number {
        self.end - self.start
    }
}

impl From<&Sequence> for Region {
    fn from(sequence: &Sequence) -> Self {
        Self {
            name: sequence.chromosome_name().to_string(),
            size: sequence.chromosome_size(),
            start: sequence.alignment_start(),
            end: sequence.alignment_end(),
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.name, self.start, self.end)
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Record
////////////////////////////////////////////////////////////////////////////////////////

/// A normalized alignment record.
///
/// Both regions are expressed in forward-strand coordinates, regardless of
/// the strand the chain was written on. The CIGAR is expressed relative to
/// the query as it was accumulated from the chain's data records.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The target region.
    target: Region,

    /// The query region.
    query: Region,

    /// The strand of the query relative to the target.
    strand: Strand,

    /// The number of matching bases.
    num_matches: Number,

    /// The length of the alignment block.
    block_len: Number,

    /// The edit script.
    cigar: Cigar,

    /// The id of the chain the record was built from.
    chain_id: Option<String>,
}

impl Record {
    /// Creates a [`Record`] from a chain header and the CIGAR accumulated over
    /// its data records.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainpaf::chain::header;
    /// use chainpaf::record::Record;
    /// use omics::coordinate::Strand;
    ///
    /// let header = "chain 0 chrT 100 + 0 50 chrQ 200 - 10 40 1".parse::<header::Record>()?;
    /// let record = Record::new(&header, "30M".parse()?, 30);
    ///
    /// assert_eq!(record.target().name(), "chrT");
    /// assert_eq!(record.target().start(), 0);
    /// assert_eq!(record.target().end(), 50);
    /// assert_eq!(record.query().name(), "chrQ");
    /// assert_eq!(record.query().start(), 160);
    /// assert_eq!(record.query().end(), 190);
    /// assert_eq!(record.strand(), Strand::Negative);
    /// assert_eq!(record.sign(), -1);
    /// assert_eq!(record.block_len(), 50);
    /// assert_eq!(record.num_matches(), 30);
    /// assert_eq!(record.mapping_quality(), 0);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(header: &header::Record, cigar: Cigar, num_matches: Number) -> Self {
        let target = Region::from(header.target_sequence());
        let query = Region::from(header.query_sequence());
        let block_len = target.len().max(query.len());

        Self {
            target,
            query,
            strand: header.query_sequence().strand(),
            num_matches,
            block_len,
            cigar,
            chain_id: header.id().map(String::from),
        }
    }

    /// Gets the target region.
    pub fn target(&self) -> &Region {
        &self.target
    }

    /// Gets the query region.
    pub fn query(&self) -> &Region {
        &self.query
    }

    /// Gets the strand of the query.
    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Gets the strand as a signed unit: `1` for the positive strand and `-1`
    /// for the negative strand.
    pub fn sign(&self) -> i8 {
        match self.strand {
            Strand::Positive => 1,
            Strand::Negative => -1,
        }
    }

    /// Gets the number of matching bases (the sum of all ungapped block
    /// sizes).
    pub fn num_matches(&self) -> Number {
        self.num_matches
    }

    /// Gets the alignment block length: the larger of the target and query
    /// spans.
    pub fn block_len(&self) -> Number {
        self.block_len
    }

    /// Gets the mapping quality (always [`MAPPING_QUALITY`]).
    pub fn mapping_quality(&self) -> u8 {
        MAPPING_QUALITY
    }

    /// Gets the edit script.
    pub fn cigar(&self) -> &Cigar {
        &self.cigar
    }

    /// Gets the id of the originating chain (if it had one).
    pub fn chain_id(&self) -> Option<&str> {
        self.chain_id.as_deref()
    }
}

/// Renders the record as a PAF line with a `cg:Z:` tag.
impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let d = DELIMITER;

        write!(
            f,
            "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{CIGAR_TAG}{}",
            self.query.name,
            self.query.size,
            self.query.start,
            self.query.end,
            self.strand,
            self.target.name,
            self.target.size,
            self.target.start,
            self.target.end,
            self.num_matches,
            self.block_len,
            MAPPING_QUALITY,
            self.cigar,
        )
    }
}
