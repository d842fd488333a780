//! A builder for a [`Converter`].

use crate::convert::Converter;
use crate::convert::TrailingChain;
use crate::decode::MAX_DECODED_SIZE;

/// A builder for a [`Converter`].
///
/// # Examples
///
/// ```
/// use chainpaf::convert::Builder;
/// use chainpaf::convert::TrailingChain;
///
/// let converter = Builder::default()
///     .max_decoded_size(1 << 20)
///     .trailing_chain(TrailingChain::Drop)
///     .build();
///
/// assert_eq!(converter.max_decoded_size(), 1 << 20);
/// assert_eq!(converter.trailing_chain(), TrailingChain::Drop);
/// ```
#[derive(Clone, Debug)]
pub struct Builder {
    /// The ceiling on the size of the decoded input (in bytes).
    max_decoded_size: usize,

    /// What to do with the final chain.
    trailing_chain: TrailingChain,
}

impl Builder {
    /// Sets the ceiling on the size of the decoded input (in bytes).
    ///
    /// Defaults to [`MAX_DECODED_SIZE`].
    pub fn max_decoded_size(mut self, bytes: usize) -> Self {
        self.max_decoded_size = bytes;
        self
    }

    /// Sets what to do with the chain still open at the end of the input.
    ///
    /// Defaults to [`TrailingChain::Emit`].
    pub fn trailing_chain(mut self, trailing_chain: TrailingChain) -> Self {
        self.trailing_chain = trailing_chain;
        self
    }

    /// Consumes `self` to build a [`Converter`].
    pub fn build(self) -> Converter {
        Converter {
            max_decoded_size: self.max_decoded_size,
            trailing_chain: self.trailing_chain,
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            max_decoded_size: MAX_DECODED_SIZE,
            trailing_chain: TrailingChain::default(),
        }
    }
}
