//! An iterator that converts the lines of a chain file into
//! [alignment records](crate::record::Record).

use std::mem;

use tracing::trace;
use tracing::warn;

use crate::chain::header;
use crate::cigar;
use crate::line;
use crate::line::Line;
use crate::record::Record;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to [`Records`].
#[derive(Debug)]
pub enum Error {
    /// A line could not be parsed (the first field is the line number).
    Line(usize, line::Error),

    /// Alignment data was found before any chain header (the field is the
    /// line number).
    DataOutsideChain(usize),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Line(line_no, err) => write!(f, "line {line_no}: {err}"),
            Error::DataOutsideChain(line_no) => {
                write!(
                    f,
                    "line {line_no}: found alignment data before any chain header"
                )
            }
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Trailing chain behavior
////////////////////////////////////////////////////////////////////////////////////////

/// What to do with the chain that is still open when the input ends.
///
/// Older converters built the record for the final chain but never appended
/// it to their output. [`TrailingChain::Drop`] reproduces that behavior for
/// consumers that must stay byte-compatible with data produced that way.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TrailingChain {
    /// Emit a record for the final chain.
    #[default]
    Emit,

    /// Silently drop the final chain.
    Drop,
}

////////////////////////////////////////////////////////////////////////////////////////
// Records
////////////////////////////////////////////////////////////////////////////////////////

/// The state of the iterator.
#[derive(Debug)]
enum State {
    /// No chain has been started yet.
    Idle,

    /// A chain header has been read and its data is being accumulated.
    InChain {
        /// The header of the chain in progress.
        header: header::Record,

        /// The CIGAR accumulated so far.
        cigar: cigar::Builder,
    },

    /// The input is exhausted or an error was returned.
    Done,
}

/// An iterator over the [alignment records](Record) described by a series of
/// numbered lines.
///
/// A record is emitted for a chain when the next chain header is read or when
/// the input ends (subject to [`TrailingChain`]). Chains whose data produced
/// no CIGAR operations are skipped. The iterator stops after the first error.
///
/// # Examples
///
/// ```
/// use chainpaf::decode;
/// use chainpaf::records::Records;
/// use chainpaf::records::TrailingChain;
///
/// let text = "chain 1 chrT 100 + 0 50 chrQ 200 + 10 40 1\n10\t0\t0\n\
///             chain 2 chrT 100 + 60 70 chrQ 200 - 0 10 2\n10";
///
/// let records = Records::new(decode::lines(text), TrailingChain::Emit)
///     .collect::<Result<Vec<_>, _>>()?;
///
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].chain_id(), Some("1"));
/// assert_eq!(records[1].query().start(), 190);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Records<I> {
    /// The numbered lines.
    lines: I,

    /// The state of the iterator.
    state: State,

    /// What to do with the final chain.
    trailing_chain: TrailingChain,
}

impl<I> Records<I> {
    /// Creates a new [`Records`] iterator over `(line number, line)` pairs.
    pub fn new(lines: I, trailing_chain: TrailingChain) -> Self {
        Self {
            lines,
            state: State::Idle,
            trailing_chain,
        }
    }
}

impl<I, S> Iterator for Records<I>
where
    I: Iterator<Item = (usize, S)>,
    S: AsRef<str>,
{
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if matches!(self.state, State::Done) {
                return None;
            }

            // (1) Reads the next line. At the end of the input, the chain in
            // progress (if any) is flushed according to the trailing chain
            // behavior.
            let (line_no, line) = match self.lines.next() {
                Some(line) => line,
                None => {
                    return match (self.finish(), self.trailing_chain) {
                        (Some(record), TrailingChain::Emit) => Some(Ok(record)),
                        (Some(_), TrailingChain::Drop) => {
                            trace!("dropping the final chain");
                            None
                        }
                        (None, _) => None,
                    };
                }
            };

            // (2) Classifies the line, stopping at the first parse error.
            let line = match line.as_ref().parse::<Line>() {
                Ok(line) => line,
                Err(err) => {
                    self.state = State::Done;
                    return Some(Err(Error::Line(line_no, err)));
                }
            };

            // (3) Advances the state machine.
            match line {
                Line::Empty => {}
                Line::Header(header) => {
                    let previous = mem::replace(
                        &mut self.state,
                        State::InChain {
                            header,
                            cigar: cigar::Builder::default(),
                        },
                    );

                    if let Some(record) = emit(previous) {
                        return Some(Ok(record));
                    }
                }
                Line::Data(record) => match &mut self.state {
                    State::InChain { cigar, .. } => cigar.push(&record),
                    _ => {
                        self.state = State::Done;
                        return Some(Err(Error::DataOutsideChain(line_no)));
                    }
                },
            }
        }
    }
}

impl<I> Records<I> {
    /// Moves the iterator into its terminal state, returning the record for
    /// the chain that was in progress (if it produced one).
    fn finish(&mut self) -> Option<Record> {
        emit(mem::replace(&mut self.state, State::Done))
    }
}

/// Builds the record for a chain, if the state holds a chain whose CIGAR is
/// non-empty.
fn emit(state: State) -> Option<Record> {
    match state {
        State::InChain { header, cigar } => {
            let (cigar, num_matches) = cigar.build()?;

            if !spans_agree(&header, &cigar) {
                warn!(
                    chain_id = header.id().unwrap_or_default(),
                    target_span = header.target_sequence().span(),
                    query_span = header.query_sequence().span(),
                    cigar_target_len = cigar.target_len(),
                    cigar_query_len = cigar.query_len(),
                    "alignment data does not cover the spans declared in the chain header"
                );
            }

            let record = Record::new(&header, cigar, num_matches);
            trace!(
                target_region = %record.target(),
                query_region = %record.query(),
                "emitting alignment record"
            );
            Some(record)
        }
        State::Idle | State::Done => None,
    }
}

/// Returns whether the bases consumed by `cigar` match the spans declared in
/// `header` on both sequences.
fn spans_agree(header: &header::Record, cigar: &cigar::Cigar) -> bool {
    cigar.target_len() == header.target_sequence().span()
        && cigar.query_len() == header.query_sequence().span()
}
