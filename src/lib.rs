//! `chainpaf` is a crate for converting genomic chain files into normalized,
//! PAF-style alignment records.
//!
//! A chain file describes pairwise alignments between two genome assemblies
//! as a series of chains. Each chain is a header line followed by alignment
//! data lines (ungapped block sizes and the gaps that separate them). For
//! every chain that contains alignment data, this crate produces one
//! [`Record`]: the target and query regions (both in forward-strand
//! coordinates), the strand of the query, the number of matching bases, the
//! alignment block length, and a CIGAR string describing the alignment.
//!
//! The conversion happens in a few stages, each of which is exposed in case
//! it is needed on its own:
//!
//! - [`decode`] detects and inflates gzip-compressed input, enforces a
//!   ceiling on the size of the decoded data, and strictly decodes it as
//!   UTF-8 before splitting it into lines.
//! - [`line`] classifies each line as a [chain header](chain::header::Record)
//!   or an [alignment data record](chain::data::Record).
//! - [`records`] runs the state machine that accumulates the
//!   [`cigar::Cigar`] for each chain and emits one [`Record`] per chain.
//!
//! Most users will want the [`Converter`], which ties these stages together
//! and returns either every record in the input or an error.
//!
//! ```
//! use chainpaf::Converter;
//!
//! let data = b"chain 0 seq0 4 + 0 4 seq0 5 - 0 5 1\n3\t0\t1\n1";
//! let records = Converter::default().convert(&data[..])?;
//!
//! for record in &records {
//!     println!("{record}");
//! }
//!
//! assert_eq!(
//!     records[0].to_string(),
//!     "seq0\t5\t0\t5\t-\tseq0\t4\t0\t4\t4\t5\t0\tcg:Z:3M1I1M"
//! );
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Chain files can also be loaded from a [`location::Location`] using any
//! [`loader::Loader`]. The crate ships with [`loader::Local`] for reading from
//! the filesystem; fetching remote URLs is left to the caller (the
//! `chain2paf` binary does so over HTTP).

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod chain;
pub mod cigar;
pub mod convert;
pub mod decode;
pub mod line;
pub mod loader;
pub mod location;
pub mod record;
pub mod records;

pub use convert::Converter;
pub use line::Line;
pub use record::Record;
