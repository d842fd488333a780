//! Turning raw bytes into lines of text.
//!
//! Input may be plain text or gzip-compressed (including BGZF, which is a
//! series of concatenated gzip members). Either way, the decoded buffer is
//! capped at [`MAX_DECODED_SIZE`] bytes and must be valid UTF-8.

use std::borrow::Cow;
use std::io;
use std::io::Read as _;
use std::str::Utf8Error;

use flate2::read::MultiGzDecoder;
use tracing::debug;

/// The magic bytes at the start of every gzip member.
pub const GZIP_MAGIC: [u8; 3] = [0x1f, 0x8b, 0x08];

/// The default ceiling on the size of the decoded buffer (512 MiB minus a
/// small margin).
pub const MAX_DECODED_SIZE: usize = 536_870_888;

/// The new line character.
const NEW_LINE: char = '\n';

/// The carriage return character.
const CARRIAGE_RETURN: char = '\r';

/// The UTF-8 byte order mark.
const BYTE_ORDER_MARK: char = '\u{feff}';

/// An error related to decoding.
#[derive(Debug)]
pub enum Error {
    /// The gzip stream could not be decompressed.
    Decompress(io::Error),

    /// The decoded buffer exceeded the configured ceiling (in bytes).
    ResourceTooLarge(usize),

    /// The decoded buffer was not valid UTF-8.
    Decode(Utf8Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Decompress(err) => write!(f, "decompression error: {err}"),
            Error::ResourceTooLarge(limit) => {
                write!(f, "data exceeds the maximum decoded size of {limit} bytes")
            }
            Error::Decode(err) => write!(f, "decode error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// Returns whether the bytes begin with the gzip magic number.
///
/// # Examples
///
/// ```
/// use chainpaf::decode;
///
/// assert!(decode::is_gzip(&[0x1f, 0x8b, 0x08, 0x00]));
/// assert!(!decode::is_gzip(b"chain"));
/// assert!(!decode::is_gzip(&[0x1f, 0x8b]));
/// ```
pub fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

/// Decompresses `bytes` if they are gzip-compressed, enforcing `limit` on the
/// size of the result.
///
/// Uncompressed input is borrowed as-is. Decompression stops as soon as more
/// than `limit` bytes have been produced.
pub fn decompress(bytes: &[u8], limit: usize) -> Result<Cow<'_, [u8]>> {
    if !is_gzip(bytes) {
        if bytes.len() > limit {
            return Err(Error::ResourceTooLarge(limit));
        }

        return Ok(Cow::Borrowed(bytes));
    }

    debug!(compressed = bytes.len(), "decompressing gzip input");

    let mut buffer = Vec::new();
    let ceiling = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);

    MultiGzDecoder::new(bytes)
        .take(ceiling)
        .read_to_end(&mut buffer)
        .map_err(Error::Decompress)?;

    if buffer.len() > limit {
        return Err(Error::ResourceTooLarge(limit));
    }

    debug!(decompressed = buffer.len(), "decompressed gzip input");
    Ok(Cow::Owned(buffer))
}

/// Decompresses (if needed) and strictly decodes `bytes` as UTF-8.
///
/// A single leading byte order mark is dropped.
///
/// # Examples
///
/// ```
/// use chainpaf::decode;
///
/// let text = decode::decode(b"chain 0 chrT 100 + 0 50 chrQ 200 + 10 40\n10", 1024)?;
/// assert_eq!(text, "chain 0 chrT 100 + 0 50 chrQ 200 + 10 40\n10");
///
/// let err = decode::decode(&[b'1', 0xff], 1024).unwrap_err();
/// assert!(matches!(err, decode::Error::Decode(_)));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn decode(bytes: &[u8], limit: usize) -> Result<Cow<'_, str>> {
    let text = match decompress(bytes, limit)? {
        Cow::Borrowed(bytes) => std::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .map_err(Error::Decode)?,
        Cow::Owned(bytes) => String::from_utf8(bytes)
            .map(Cow::Owned)
            .map_err(|err| Error::Decode(err.utf8_error()))?,
    };

    Ok(strip_byte_order_mark(text))
}

/// Removes a single leading byte order mark, if present.
fn strip_byte_order_mark(text: Cow<'_, str>) -> Cow<'_, str> {
    match text {
        Cow::Borrowed(s) => Cow::Borrowed(s.strip_prefix(BYTE_ORDER_MARK).unwrap_or(s)),
        Cow::Owned(mut s) => {
            if s.starts_with(BYTE_ORDER_MARK) {
                s.drain(..BYTE_ORDER_MARK.len_utf8());
            }

            Cow::Owned(s)
        }
    }
}

/// Splits decoded text into non-empty lines.
///
/// Each line is paired with its 1-based line number within `text`. A single
/// trailing carriage return is stripped from every line, and lines that are
/// empty afterwards are skipped.
///
/// # Examples
///
/// ```
/// use chainpaf::decode;
///
/// let lines = decode::lines("a\r\n\nb\n").collect::<Vec<_>>();
/// assert_eq!(lines, vec![(1, "a"), (3, "b")]);
/// ```
pub fn lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split(NEW_LINE)
        .enumerate()
        .map(|(i, line)| (i + 1, line.strip_suffix(CARRIAGE_RETURN).unwrap_or(line)))
        .filter(|(_, line)| !line.is_empty())
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use flate2::Compression;
    use flate2::write::GzEncoder;

    use super::*;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn it_passes_plain_text_through() {
        let bytes = b"chain 0 seq0 2 + 0 2 seq0 2 + 0 2\n2";
        let text = decode(bytes, MAX_DECODED_SIZE).unwrap();

        assert!(matches!(text, Cow::Borrowed(_)));
        assert_eq!(text, "chain 0 seq0 2 + 0 2 seq0 2 + 0 2\n2");
    }

    #[test]
    fn it_decompresses_gzip_input() {
        let data = b"chain 0 seq0 2 + 0 2 seq0 2 + 0 2\n2";
        let bytes = gzip(data);
        assert!(is_gzip(&bytes));

        let text = decode(&bytes, MAX_DECODED_SIZE).unwrap();
        assert_eq!(text.as_bytes(), data);
    }

    #[test]
    fn it_decompresses_multi_member_gzip_input() {
        let mut bytes = gzip(b"chain 0 seq0 2 + 0 2 seq0 2 + 0 2\n");
        bytes.extend(gzip(b"2\n"));

        let text = decode(&bytes, MAX_DECODED_SIZE).unwrap();
        assert_eq!(text, "chain 0 seq0 2 + 0 2 seq0 2 + 0 2\n2\n");
    }

    #[test]
    fn it_rejects_oversized_plain_input() {
        let err = decode(&[b'1'; 11], 10).unwrap_err();

        assert!(matches!(err, Error::ResourceTooLarge(10)));
        assert_eq!(
            err.to_string(),
            "data exceeds the maximum decoded size of 10 bytes"
        );
    }

    #[test]
    fn it_accepts_input_exactly_at_the_limit() {
        assert!(decode(&[b'1'; 10], 10).is_ok());
        assert!(decode(&gzip(&[b'1'; 10]), 10).is_ok());
    }

    #[test]
    fn it_rejects_oversized_decompressed_input() {
        // Compresses well below the limit, but inflates well past it.
        let bytes = gzip(&vec![b'0'; 1 << 20]);
        assert!(bytes.len() < 4096);

        let err = decode(&bytes, 4096).unwrap_err();
        assert!(matches!(err, Error::ResourceTooLarge(4096)));
    }

    #[test]
    fn it_rejects_invalid_utf8() {
        let err = decode(&[0x63, 0x68, 0xc3, 0x28], MAX_DECODED_SIZE).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));

        let err = decode(&gzip(&[0x31, 0x0a, 0xff]), MAX_DECODED_SIZE).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn it_strips_a_leading_byte_order_mark() {
        let data = "\u{feff}chain 0 seq0 2 + 0 2 seq0 2 + 0 2\n2";

        let text = decode(data.as_bytes(), MAX_DECODED_SIZE).unwrap();
        assert!(matches!(text, Cow::Borrowed(_)));
        assert_eq!(text, "chain 0 seq0 2 + 0 2 seq0 2 + 0 2\n2");

        let compressed = gzip(data.as_bytes());
        let text = decode(&compressed, MAX_DECODED_SIZE).unwrap();
        assert_eq!(text, "chain 0 seq0 2 + 0 2 seq0 2 + 0 2\n2");

        // Only the first one is removed.
        let text = decode("\u{feff}\u{feff}2".as_bytes(), MAX_DECODED_SIZE).unwrap();
        assert_eq!(text, "\u{feff}2");
    }

    #[test]
    fn it_reports_corrupt_gzip_streams() {
        let mut bytes = gzip(b"chain 0 seq0 2 + 0 2 seq0 2 + 0 2\n2");
        bytes.truncate(bytes.len() / 2);

        let err = decode(&bytes, MAX_DECODED_SIZE).unwrap_err();
        assert!(matches!(err, Error::Decompress(_)));
    }

    #[test]
    fn it_splits_lines_and_drops_empty_ones() {
        let lines = lines("\nchain\r\n10\t0\t0\n\n\r\n5\n").collect::<Vec<_>>();
        assert_eq!(lines, vec![(2, "chain"), (3, "10\t0\t0"), (6, "5")]);
    }
}
