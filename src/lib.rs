// SPDX-License-Identifier: CC0-1.0

//! Streaming SHA-1 (RFC 3174).
//!
//! A small, `no_std` capable implementation of the SHA-1 message digest built
//! around an explicit lifecycle: a [`Context`] starts [`State::Fresh`], accepts
//! input in any number of chunks, yields exactly one 20-byte digest and then
//! refuses further use until it is reset. Misuse and over-long messages are
//! reported as [`Error`] values and poison the context, no partial digest is
//! ever exposed.
//!
//! ## Commonly used operations
//!
//! Hashing a single byte slice or a string:
//!
//! ```rust
//! use sha1_stream::Hash;
//!
//! let hash = Hash::hash(b"abc").unwrap();
//! assert_eq!(hash.to_string(), "a9993e364706816aba3e25717850c26c9cd0d89d");
//! ```
//!
//! Hashing content from a reader:
//!
//! ```rust
//! use sha1_stream::Context;
//!
//! #[cfg(feature = "std")]
//! # fn main() -> std::io::Result<()> {
//! let mut reader: &[u8] = b"hello"; // in real code, this could be a `File` or `TcpStream`
//! let mut engine = Context::new();
//! std::io::copy(&mut reader, &mut engine)?;
//! let hash = engine.finalize().unwrap();
//! # Ok(())
//! # }
//!
//! #[cfg(not(feature = "std"))]
//! # fn main() {}
//! ```
//!
//! Driving the status-code interface:
//!
//! ```rust
//! use sha1_stream::status::{append, finish, init, Status};
//! use sha1_stream::Context;
//!
//! let mut ctx = Context::default();
//! let mut digest = [0u8; 20];
//! assert_eq!(init(Some(&mut ctx)), Status::Success);
//! assert_eq!(append(Some(&mut ctx), Some(&b"abc"[..])), Status::Success);
//! assert_eq!(finish(Some(&mut ctx), Some(&mut digest)), Status::Success);
//! assert_eq!(finish(Some(&mut ctx), Some(&mut digest)), Status::StateError);
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
// Experimental features we need.
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(bench, feature(test))]
// Coding conventions.
#![warn(missing_docs)]
// Exclude lints we don't think are valuable.
#![allow(clippy::needless_question_mark)] // https://github.com/rust-bitcoin/rust-bitcoin/pull/2134
#![allow(clippy::manual_range_contains)] // More readable than clippy's format.

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;
#[cfg(any(test, feature = "std"))]
extern crate core;

#[cfg(feature = "serde")]
/// A generic serialization/deserialization framework.
pub extern crate serde;

#[cfg(all(test, feature = "serde"))]
extern crate serde_test;
#[cfg(bench)]
extern crate test;

/// Re-export the `hex-conservative` crate.
pub extern crate hex;

#[doc(hidden)]
pub mod _export {
    /// A re-export of core::*
    pub mod _core {
        pub use core::*;
    }
}

#[cfg(feature = "schemars")]
extern crate schemars;

mod internal_macros;
#[macro_use]
pub mod serde_macros;
pub mod compress;
mod context;
mod hash;
#[cfg(feature = "bitcoin-io")]
mod impls;
pub mod status;

use core::fmt;

pub use crate::context::{Context, Midstate, State};
pub use crate::hash::Hash;
pub use crate::status::Status;

/// Errors returned by a [`Context`].
///
/// Either error leaves the context [`State::Corrupted`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The message would reach 2^64 bits.
    InputTooLong,
    /// The operation is not permitted in the given state.
    InvalidState(State),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InputTooLong => f.write_str("input data too long, SHA-1 takes at most 2^64 - 1 bits"),
            Error::InvalidState(state) => write!(f, "operation not permitted on a {} context", state),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Attempted to create a hash from an invalid length slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromSliceError {
    expected: usize,
    got: usize,
}

impl FromSliceError {
    /// Returns the expected slice length.
    pub fn expected_length(&self) -> usize { self.expected }

    /// Returns the invalid slice length.
    pub fn invalid_length(&self) -> usize { self.got }
}

impl fmt::Display for FromSliceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid slice length {} (expected {})", self.got, self.expected)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FromSliceError {}
