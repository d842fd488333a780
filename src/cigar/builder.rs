//! A builder that accumulates a [`Cigar`] over the data records of a chain.

use nonempty::NonEmpty;
use omics::coordinate::position::Number;

use crate::chain::data;
use crate::cigar::Cigar;
use crate::cigar::Kind;
use crate::cigar::Op;

/// Accumulates CIGAR operations and the running match count for a single
/// chain.
///
/// Each [data record](data::Record) contributes, in this order and only when
/// the respective value is non-zero:
///
/// 1. a match (`M`) of the ungapped size,
/// 2. an insertion (`I`) of the query gap, and
/// 3. a deletion (`D`) of the target gap.
///
/// Insertions always precede deletions within a single record.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Builder {
    /// The operations seen so far.
    ops: Option<NonEmpty<Op>>,

    /// The sum of all ungapped sizes seen so far.
    matches: Number,
}

impl Builder {
    /// Folds a [data record](data::Record) into the [`Builder`].
    ///
    /// # Examples
    ///
    /// ```
    /// use chainpaf::cigar::Builder;
    ///
    /// let mut builder = Builder::default();
    /// builder.push(&"10".parse()?);
    /// builder.push(&"5\t0\t2".parse()?);
    /// builder.push(&"3\t1\t0".parse()?);
    ///
    /// assert_eq!(builder.matches(), 18);
    ///
    /// let (cigar, matches) = builder.build().unwrap();
    /// assert_eq!(cigar.to_string(), "10M5M2I3M1D");
    /// assert_eq!(matches, 18);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn push(&mut self, record: &data::Record) {
        if record.size() != 0 {
            self.matches = self.matches.saturating_add(record.size());
            self.push_op(Op::new(Kind::Match, record.size()));
        }

        if record.query_gap() != 0 {
            self.push_op(Op::new(Kind::Insertion, record.query_gap()));
        }

        if record.target_gap() != 0 {
            self.push_op(Op::new(Kind::Deletion, record.target_gap()));
        }
    }

    /// Appends a single operation.
    fn push_op(&mut self, op: Op) {
        match self.ops.as_mut() {
            Some(ops) => ops.push(op),
            None => self.ops = Some(NonEmpty::new(op)),
        }
    }

    /// Returns whether no operations have been accumulated.
    pub fn is_empty(&self) -> bool {
        self.ops.is_none()
    }

    /// Gets the running match count.
    pub fn matches(&self) -> Number {
        self.matches
    }

    /// Consumes `self` and returns the [`Cigar`] along with the total match
    /// count.
    ///
    /// Returns [`None`] if no operations were ever accumulated.
    pub fn build(self) -> Option<(Cigar, Number)> {
        self.ops.map(|ops| (Cigar::from(ops), self.matches))
    }
}
