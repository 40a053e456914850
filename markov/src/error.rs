//! Common error type.

use core::fmt::{self, Display};

/// Common error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A rule index was not smaller than the number of rules.
    OutOfRange { index: usize, len: usize },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "rule index {} out of range for {} rules", index, len)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
