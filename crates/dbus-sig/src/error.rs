// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for signature parsing

use std::fmt;

/// Result type for signature parsing
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for signature parsing
///
/// Offsets are not carried; a single type is at most
/// [`LENGTH_MAX`](crate::config::LENGTH_MAX) bytes, so a caller can re-scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// Grammar violation, unknown type code, unbalanced bracket, bad
    /// dict-entry shape, or a length/depth limit exceeded
    Malformed,

    /// Descriptor allocation failed
    OutOfMemory,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Malformed => write!(f, "Malformed D-Bus signature"),
            Error::OutOfMemory => write!(f, "Out of memory allocating type descriptors"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::collections::TryReserveError> for Error {
    fn from(_: std::collections::TryReserveError) -> Self {
        Error::OutOfMemory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::Malformed.to_string(), "Malformed D-Bus signature");
        assert_eq!(
            Error::OutOfMemory.to_string(),
            "Out of memory allocating type descriptors"
        );
    }

    #[test]
    fn test_try_reserve_maps_to_oom() {
        let mut v: Vec<u64> = Vec::new();
        let err = v.try_reserve_exact(usize::MAX).unwrap_err();
        assert_eq!(Error::from(err), Error::OutOfMemory);
    }
}
