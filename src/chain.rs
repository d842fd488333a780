//! Records found within a chain file.
//!
//! A chain file is made up of alignment blocks (chains). Each chain starts
//! with a [header record](header::Record) and is followed by zero or more
//! [data records](data::Record), each describing an ungapped run of aligned
//! bases and the gaps that follow it.

pub mod data;
pub mod header;

/// The characters that separate fields within a chain file line.
///
/// The format specifies a single space for headers and a tab for data lines,
/// but files in the wild mix both conventions freely, so either is accepted
/// everywhere.
pub const DELIMITERS: &[char] = &[' ', '\t'];

/// Splits a line into its fields.
///
/// Trailing delimiters are ignored. Consecutive delimiters within the line
/// are not collapsed: each one separates a (possibly empty) field, which
/// keeps field positions stable.
pub(crate) fn fields(line: &str) -> impl Iterator<Item = &str> {
    line.trim_end_matches(DELIMITERS).split(DELIMITERS)
}
