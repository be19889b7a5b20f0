// SPDX-License-Identifier: CC0-1.0

//! Non-public macros

/// Adds `AsRef<[u8]>` implementation to a given type `$ty`.
macro_rules! as_ref_impl(
    ($ty:ident) => (
        impl $crate::_export::_core::convert::AsRef<[u8]> for $ty {
            fn as_ref(&self) -> &[u8] { &self[..] }
        }
    )
);
pub(crate) use as_ref_impl;

/// Adds hex formatting traits to a byte array newtype `$ty` of `$bytes` bytes.
///
/// `Debug` uses the alternate form, i.e. the hex string is prefixed with `0x`.
macro_rules! arr_newtype_fmt_impl {
    ($ty:ident, $bytes:expr) => {
        impl $crate::_export::_core::fmt::LowerHex for $ty {
            #[inline]
            fn fmt(&self, f: &mut $crate::_export::_core::fmt::Formatter) -> $crate::_export::_core::fmt::Result {
                $crate::hex::fmt_hex_exact!(f, $bytes, self.0.iter(), $crate::hex::Case::Lower)
            }
        }

        impl $crate::_export::_core::fmt::UpperHex for $ty {
            #[inline]
            fn fmt(&self, f: &mut $crate::_export::_core::fmt::Formatter) -> $crate::_export::_core::fmt::Result {
                $crate::hex::fmt_hex_exact!(f, $bytes, self.0.iter(), $crate::hex::Case::Upper)
            }
        }

        impl $crate::_export::_core::fmt::Display for $ty {
            #[inline]
            fn fmt(&self, f: &mut $crate::_export::_core::fmt::Formatter) -> $crate::_export::_core::fmt::Result {
                $crate::_export::_core::fmt::LowerHex::fmt(self, f)
            }
        }

        impl $crate::_export::_core::fmt::Debug for $ty {
            #[inline]
            fn fmt(&self, f: &mut $crate::_export::_core::fmt::Formatter) -> $crate::_export::_core::fmt::Result {
                write!(f, "{:#}", self)
            }
        }
    };
}
pub(crate) use arr_newtype_fmt_impl;
