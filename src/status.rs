// SPDX-License-Identifier: CC0-1.0

//! Status-code interface to the SHA-1 context.
//!
//! These functions mirror the classic RFC 3174 entry points: every call returns
//! a [`Status`] instead of a `Result`, and a missing argument (`None`) is
//! reported as [`Status::NullPointer`] rather than being unrepresentable.
//!
//! ```
//! use sha1_stream::status::{self, Status};
//! use sha1_stream::Context;
//!
//! let mut ctx = Context::new();
//! let mut digest = [0u8; 20];
//! assert_eq!(status::init(Some(&mut ctx)), Status::Success);
//! assert_eq!(status::append(Some(&mut ctx), Some(&b"abc"[..])), Status::Success);
//! assert_eq!(status::finish(Some(&mut ctx), Some(&mut digest)), Status::Success);
//! assert_eq!(digest[0], 0xa9);
//! ```

use core::fmt;

use crate::{Context, Error};

/// Outcome of a status-code call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Status {
    /// The call succeeded.
    Success = 0,
    /// A required argument was missing.
    NullPointer = 1,
    /// The message would reach 2^64 bits.
    InputTooLong = 2,
    /// The call is not permitted in the context's current state.
    StateError = 3,
}

impl Status {
    /// Returns the numeric code of this status.
    pub fn code(self) -> u8 { self as u8 }

    /// Returns true for [`Status::Success`].
    pub fn is_success(self) -> bool { self == Status::Success }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match *self {
            Status::Success => "success",
            Status::NullPointer => "null pointer parameter",
            Status::InputTooLong => "input data too long",
            Status::StateError => "call not permitted in the current state",
        };
        f.write_str(s)
    }
}

impl From<Error> for Status {
    fn from(e: Error) -> Self {
        match e {
            Error::InputTooLong => Status::InputTooLong,
            Error::InvalidState(_) => Status::StateError,
        }
    }
}

impl From<Result<(), Error>> for Status {
    fn from(res: Result<(), Error>) -> Self {
        match res {
            Ok(()) => Status::Success,
            Err(e) => e.into(),
        }
    }
}

/// Resets `context` to its initial state.
pub fn init(context: Option<&mut Context>) -> Status {
    match context {
        Some(ctx) => {
            ctx.reset();
            Status::Success
        }
        None => Status::NullPointer,
    }
}

/// Appends `message` to `context`.
pub fn append(context: Option<&mut Context>, message: Option<&[u8]>) -> Status {
    match (context, message) {
        (Some(ctx), Some(message)) => ctx.input(message).into(),
        _ => Status::NullPointer,
    }
}

/// Pads the message and writes its digest into `digest`.
///
/// `digest` is written only when [`Status::Success`] is returned.
pub fn finish(context: Option<&mut Context>, digest: Option<&mut [u8; 20]>) -> Status {
    match (context, digest) {
        (Some(ctx), Some(digest)) => ctx.finish(digest).into(),
        _ => Status::NullPointer,
    }
}
