// SPDX-License-Identifier: CC0-1.0

//! The SHA-1 digest type.

use crate::{Context, Error};

/// Output of the SHA-1 hash function.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Hash([u8; 20]);

impl Hash {
    /// Length of the hash, in bytes.
    pub const LEN: usize = 20;

    /// Hashes `bytes` with a fresh [`Context`].
    ///
    /// # Errors
    ///
    /// [`Error::InputTooLong`] if `bytes` holds 2^61 bytes or more.
    #[allow(clippy::self_named_constructors)] // `hash` is a verb but `Hash` is a noun.
    pub fn hash(bytes: &[u8]) -> Result<Self, Error> {
        let mut engine = Self::engine();
        engine.input(bytes)?;
        engine.finalize()
    }

    /// Hashes all the byte slices retrieved from the iterator together.
    pub fn hash_byte_chunks<B, I>(byte_slices: I) -> Result<Self, Error>
    where
        B: AsRef<[u8]>,
        I: IntoIterator<Item = B>,
    {
        let mut engine = Self::engine();
        for slice in byte_slices {
            engine.input(slice.as_ref())?;
        }
        engine.finalize()
    }

    /// Returns a hash engine that is ready to be used for data.
    pub fn engine() -> Context { Context::new() }

    /// Creates a `Hash` from an `engine`.
    ///
    /// This is equivalent to calling `engine.finalize()`.
    pub fn from_engine(mut engine: Context) -> Result<Self, Error> { engine.finalize() }

    /// Copies a byte slice into a hash object.
    pub fn from_slice(sl: &[u8]) -> Result<Self, crate::FromSliceError> {
        if sl.len() != Self::LEN {
            Err(crate::FromSliceError { expected: Self::LEN, got: sl.len() })
        } else {
            let mut ret = [0; 20];
            ret.copy_from_slice(sl);
            Ok(Self::from_byte_array(ret))
        }
    }

    /// Constructs a hash from the underlying byte array.
    pub const fn from_byte_array(bytes: [u8; 20]) -> Self { Self(bytes) }

    /// Returns the underlying byte array.
    pub fn to_byte_array(self) -> [u8; 20] { self.0 }

    /// Returns a reference to the underlying byte array.
    pub fn as_byte_array(&self) -> &[u8; 20] { &self.0 }

    /// Returns an all zero hash.
    ///
    /// No known input produces it, it is only useful as a placeholder.
    pub fn all_zeros() -> Self { Self([0x00; 20]) }
}

impl core::str::FromStr for Hash {
    type Err = hex::HexToArrayError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use hex::FromHex;

        let bytes = <[u8; 20]>::from_hex(s)?;
        Ok(Self::from_byte_array(bytes))
    }
}

impl<I: core::slice::SliceIndex<[u8]>> core::ops::Index<I> for Hash {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output { &self.0[index] }
}

impl AsRef<[u8; 20]> for Hash {
    fn as_ref(&self) -> &[u8; 20] { &self.0 }
}

impl core::borrow::Borrow<[u8]> for Hash {
    fn borrow(&self) -> &[u8] { &self.0 }
}

crate::internal_macros::arr_newtype_fmt_impl!(Hash, 20);
crate::internal_macros::as_ref_impl!(Hash);
serde_impl!(Hash, 20);

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for Hash {
    fn schema_name() -> String { "Hash".to_owned() }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        let len = Self::LEN;
        let mut schema: schemars::schema::SchemaObject = <String>::json_schema(gen).into();
        schema.string = Some(Box::new(schemars::schema::StringValidation {
            max_length: Some((len * 2) as u32),
            min_length: Some((len * 2) as u32),
            pattern: Some("[0-9a-fA-F]+".to_owned()),
        }));
        schema.into()
    }
}
