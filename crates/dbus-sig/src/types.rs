// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Iteration over the top-level types of a full signature.
//!
//! A method signature such as `sa{sv}as` is a sequence of complete types.
//! [`Types`] calls [`parse_one_with`] on the remaining tail until the input is
//! exhausted, stopping after the first error.

use crate::config::ParseOptions;
use crate::error::Result;
use crate::layout::TypeLayout;
use crate::parser::parse_one_with;

/// Iterate over every complete type of `signature` with default options.
///
/// ```rust
/// let sigs: Vec<_> = dbus_sig::types(b"sa{sv}as")
///     .map(|t| t.map(|layout| layout.signature().to_vec()))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(sigs, vec![b"s".to_vec(), b"a{sv}".to_vec(), b"as".to_vec()]);
/// ```
pub fn types(signature: &[u8]) -> Types<'_> {
    Types::new(signature, ParseOptions::default())
}

/// Iterator returned by [`types`].
#[derive(Debug, Clone)]
pub struct Types<'a> {
    rest: &'a [u8],
    options: ParseOptions,
    failed: bool,
}

impl<'a> Types<'a> {
    pub fn new(signature: &'a [u8], options: ParseOptions) -> Self {
        Self {
            rest: signature,
            options,
            failed: false,
        }
    }

    /// Bytes not consumed yet.
    pub fn remainder(&self) -> &'a [u8] {
        self.rest
    }
}

impl Iterator for Types<'_> {
    type Item = Result<TypeLayout>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.rest.is_empty() {
            return None;
        }

        match parse_one_with(self.rest, &self.options) {
            Ok(layout) => {
                self.rest = &self.rest[layout.len()..];
                Some(Ok(layout))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for Types<'_> {}
