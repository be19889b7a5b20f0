// SPDX-License-Identifier: CC0-1.0

//! The streaming SHA-1 context.
//!
//! A [`Context`] is created (or reset) into [`State::Fresh`], absorbs any
//! number of byte slices through [`Context::input`] and produces exactly one
//! digest through [`Context::finish`]. Every entry point first consults the
//! lifecycle [`State`]; calls that are not legal in the current state are
//! rejected and leave the context [`State::Corrupted`] until it is reset.

use core::fmt;

use zeroize::Zeroize;

use crate::compress::{compress, BLOCK_SIZE, IV};
use crate::internal_macros::{arr_newtype_fmt_impl, as_ref_impl};
use crate::{Error, Hash};

/// Offset of the 64-bit length field inside the final block.
const LENGTH_OFFSET: usize = BLOCK_SIZE - 8;

/// Lifecycle of a [`Context`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum State {
    /// Just initialized, nothing appended yet.
    Fresh,
    /// At least one byte has been appended.
    Accepting,
    /// The digest has been produced.
    Computed,
    /// An error occurred, the context must be reset before reuse.
    Corrupted,
}

impl State {
    /// Returns true if message bytes may be appended in this state.
    pub fn accepts_input(self) -> bool { matches!(self, State::Fresh | State::Accepting) }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match *self {
            State::Fresh => "fresh",
            State::Accepting => "accepting",
            State::Computed => "computed",
            State::Corrupted => "corrupted",
        };
        f.write_str(s)
    }
}

/// Running hash of a [`Context`] serialized as five big-endian words.
#[derive(Copy, Clone, PartialEq, Eq, Default, PartialOrd, Ord, Hash)]
pub struct Midstate([u8; 20]);

impl Midstate {
    /// Length of the midstate, in bytes.
    pub const LEN: usize = 20;

    /// Constructs a midstate from the underlying byte array.
    pub const fn from_byte_array(bytes: [u8; 20]) -> Self { Self(bytes) }

    /// Returns the underlying byte array.
    pub fn to_byte_array(self) -> [u8; 20] { self.0 }

    /// Returns a reference to the underlying byte array.
    pub fn as_byte_array(&self) -> &[u8; 20] { &self.0 }

    /// Copies a byte slice into a midstate object.
    pub fn from_slice(sl: &[u8]) -> Result<Self, crate::FromSliceError> {
        if sl.len() != Self::LEN {
            Err(crate::FromSliceError { expected: Self::LEN, got: sl.len() })
        } else {
            let mut ret = [0; 20];
            ret.copy_from_slice(sl);
            Ok(Self(ret))
        }
    }

    fn from_words(h: &[u32; 5]) -> Self {
        let mut ret = [0; 20];
        for (val, ret_bytes) in h.iter().zip(ret.chunks_exact_mut(4)) {
            ret_bytes.copy_from_slice(&val.to_be_bytes());
        }
        Self(ret)
    }

    fn to_words(self) -> [u32; 5] {
        let mut h = [0u32; 5];
        for (word, bytes) in h.iter_mut().zip(self.0.chunks_exact(4)) {
            *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }
        h
    }
}

impl core::str::FromStr for Midstate {
    type Err = hex::HexToArrayError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use hex::FromHex;

        let bytes = <[u8; 20]>::from_hex(s)?;
        Ok(Self(bytes))
    }
}

impl<I: core::slice::SliceIndex<[u8]>> core::ops::Index<I> for Midstate {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output { &self.0[index] }
}

arr_newtype_fmt_impl!(Midstate, 20);
as_ref_impl!(Midstate);
serde_impl!(Midstate, 20);

/// Engine to compute the SHA-1 hash function.
///
/// # Examples
///
/// ```
/// use sha1_stream::Context;
///
/// let mut ctx = Context::new();
/// ctx.input(b"a").unwrap();
/// ctx.input(b"bc").unwrap();
///
/// let mut digest = [0u8; 20];
/// ctx.finish(&mut digest).unwrap();
/// assert_eq!(digest[..4], [0xa9u8, 0x99, 0x3e, 0x36]);
/// ```
#[derive(Clone)]
pub struct Context {
    h: [u32; 5],
    bit_length: u64,
    buffer: [u8; BLOCK_SIZE],
    index: usize,
    state: State,
}

impl Context {
    /// Length of the digest produced by [`Context::finish`], in bytes.
    pub const DIGEST_LEN: usize = 20;

    /// Creates a context in the [`State::Fresh`] state.
    pub const fn new() -> Self {
        Self { h: IV, bit_length: 0, buffer: [0; BLOCK_SIZE], index: 0, state: State::Fresh }
    }

    /// Resets the context to the state returned by [`Context::new`].
    ///
    /// Legal in every state, including [`State::Computed`] and
    /// [`State::Corrupted`].
    pub fn reset(&mut self) {
        self.buffer.zeroize();
        self.h = IV;
        self.bit_length = 0;
        self.index = 0;
        self.state = State::Fresh;
    }

    /// Creates a context that resumes hashing after `length` bytes whose
    /// running hash is `midstate`.
    ///
    /// Only use this function if you know what you are doing.
    ///
    /// # Panics
    ///
    /// If `length` is not a multiple of the block size, or if `length` bytes
    /// already exceed the SHA-1 message limit of 2^64 - 1 bits.
    pub fn from_midstate(midstate: Midstate, length: u64) -> Self {
        assert!(length % BLOCK_SIZE as u64 == 0, "length is no multiple of the block size");
        let bit_length = match length.checked_mul(8) {
            Some(bits) => bits,
            None => panic!("length exceeds the SHA-1 message limit"),
        };
        let state = if length == 0 { State::Fresh } else { State::Accepting };

        Self { h: midstate.to_words(), bit_length, buffer: [0; BLOCK_SIZE], index: 0, state }
    }

    /// Outputs the running hash.
    ///
    /// The value only describes the message so far when
    /// [`Context::n_bytes_hashed`] is a multiple of the block size.
    pub fn midstate(&self) -> Midstate { Midstate::from_words(&self.h) }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> State { self.state }

    /// Returns true once a digest has been produced.
    pub fn is_computed(&self) -> bool { self.state == State::Computed }

    /// Returns true once an error has occurred.
    pub fn is_corrupted(&self) -> bool { self.state == State::Corrupted }

    /// Returns the number of message bits processed so far.
    pub fn bit_length(&self) -> u64 { self.bit_length }

    /// Returns the number of message bytes processed so far.
    pub fn n_bytes_hashed(&self) -> u64 { self.bit_length / 8 }

    /// Moves into [`State::Corrupted`] and hands back `err`.
    fn corrupt(&mut self, err: Error) -> Error {
        self.state = State::Corrupted;
        err
    }

    /// Rejects calls that the current state does not permit.
    ///
    /// A violation on a context that was still usable corrupts it. A context
    /// that is already corrupted stays untouched.
    fn check_accepting(&mut self) -> Result<(), Error> {
        match self.state {
            State::Fresh | State::Accepting => Ok(()),
            State::Computed => Err(self.corrupt(Error::InvalidState(State::Computed))),
            State::Corrupted => Err(Error::InvalidState(State::Corrupted)),
        }
    }

    fn process_block(&mut self) {
        debug_assert_eq!(self.index, BLOCK_SIZE);
        self.h = compress(self.h, &self.buffer);
        self.index = 0;
    }

    /// Appends `data` to the message.
    ///
    /// An empty slice is accepted without effect. Fails with
    /// [`Error::InvalidState`] once the digest was produced or an earlier call
    /// failed, and with [`Error::InputTooLong`] if the message would reach
    /// 2^64 bits. Both errors leave the context corrupted.
    pub fn input(&mut self, mut data: &[u8]) -> Result<(), Error> {
        self.check_accepting()?;
        if data.is_empty() {
            return Ok(());
        }
        self.state = State::Accepting;

        while !data.is_empty() {
            debug_assert!(self.index < BLOCK_SIZE);
            let rem_len = BLOCK_SIZE - self.index;
            let write_len = core::cmp::min(rem_len, data.len());

            // Bytes that still fit below 2^64 bits.
            let room = (u64::MAX - self.bit_length) / 8;
            let take = if (write_len as u64) > room { room as usize } else { write_len };

            self.buffer[self.index..self.index + take].copy_from_slice(&data[..take]);
            self.index += take;
            self.bit_length += 8 * take as u64;
            if take < write_len {
                return Err(self.corrupt(Error::InputTooLong));
            }

            if self.index == BLOCK_SIZE {
                self.process_block();
            }
            data = &data[write_len..];
        }
        Ok(())
    }

    /// Applies the final padding and writes the digest into `out`.
    ///
    /// On error `out` is left untouched. A second call after a successful one
    /// fails with [`Error::InvalidState`] and corrupts the context.
    pub fn finish(&mut self, out: &mut [u8; 20]) -> Result<(), Error> {
        self.check_accepting()?;

        self.pad();
        self.buffer.zeroize();
        self.state = State::Computed;

        *out = self.midstate().to_byte_array();
        Ok(())
    }

    /// Finalizes the context into a [`Hash`].
    pub fn finalize(&mut self) -> Result<Hash, Error> {
        let mut digest = [0u8; 20];
        self.finish(&mut digest)?;
        Ok(Hash::from_byte_array(digest))
    }

    /// Appends `0x80`, zeros and the big-endian bit length, compressing one or
    /// two blocks. The length field does not count towards `bit_length`.
    fn pad(&mut self) {
        debug_assert!(self.index < BLOCK_SIZE);
        self.buffer[self.index] = 0x80;
        self.index += 1;

        if self.index > LENGTH_OFFSET {
            self.buffer[self.index..].fill(0);
            self.index = BLOCK_SIZE;
            self.process_block();
        }

        self.buffer[self.index..LENGTH_OFFSET].fill(0);
        self.buffer[LENGTH_OFFSET..].copy_from_slice(&self.bit_length.to_be_bytes());
        self.index = BLOCK_SIZE;
        self.process_block();
    }
}

impl Default for Context {
    fn default() -> Self { Self::new() }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Context")
            .field("state", &self.state)
            .field("bit_length", &self.bit_length)
            .field("index", &self.index)
            .finish()
    }
}

impl Drop for Context {
    fn drop(&mut self) { self.buffer.zeroize(); }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest_of(chunks: &[&[u8]]) -> [u8; 20] {
        let mut ctx = Context::new();
        for chunk in chunks {
            ctx.input(chunk).expect("input accepted");
        }
        let mut out = [0u8; 20];
        ctx.finish(&mut out).expect("finish succeeds");
        out
    }

    fn hex_of(bytes: &[u8; 20]) -> String { Hash::from_byte_array(*bytes).to_string() }

    #[test]
    fn rfc3174_vectors() {
        struct Test {
            input: &'static str,
            repeat: usize,
            output: &'static str,
        }

        #[rustfmt::skip]
        let tests = [
            Test { input: "", repeat: 1, output: "da39a3ee5e6b4b0d3255bfef95601890afd80709" },
            Test { input: "abc", repeat: 1, output: "a9993e364706816aba3e25717850c26c9cd0d89d" },
            Test {
                input: "abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
                repeat: 1,
                output: "84983e441c3bd26ebaae4aa1f95129e5e54670f1",
            },
            Test {
                input: "0123456701234567012345670123456701234567012345670123456701234567",
                repeat: 10,
                output: "dea356a2cddd90c7a7ecedc5ebb563934f460452",
            },
            Test {
                input: "The quick brown fox jumps over the lazy dog",
                repeat: 1,
                output: "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12",
            },
        ];

        for test in tests.iter() {
            let mut ctx = Context::new();
            for _ in 0..test.repeat {
                ctx.input(test.input.as_bytes()).unwrap();
            }
            let mut out = [0u8; 20];
            ctx.finish(&mut out).unwrap();
            assert_eq!(hex_of(&out), test.output);
            assert_eq!(ctx.state(), State::Computed);
            assert_eq!(ctx.n_bytes_hashed(), (test.input.len() * test.repeat) as u64);
        }
    }

    #[test]
    fn one_million_a() {
        let chunk = [b'a'; 1000];
        let mut ctx = Context::new();
        for _ in 0..1000 {
            ctx.input(&chunk).unwrap();
        }
        assert_eq!(ctx.bit_length(), 8_000_000);
        let hash = ctx.finalize().unwrap();
        assert_eq!(hash.to_string(), "34aa973cd4c4daa4f61eeb2bdbad27316534016f");
    }

    #[test]
    fn chunking_invariance() {
        let msg: Vec<u8> = (0..200u32).map(|i| (i * 7 + 3) as u8).collect();
        let whole = digest_of(&[&msg[..]]);

        for split in 0..=msg.len() {
            let (left, right) = msg.split_at(split);
            assert_eq!(digest_of(&[left, right]), whole, "split at {}", split);
        }
        for first in (0..msg.len()).step_by(13) {
            for second in (first..=msg.len()).step_by(29) {
                let parts = [&msg[..first], &msg[first..second], &msg[second..]];
                assert_eq!(digest_of(&parts), whole);
            }
        }

        let mut ctx = Context::new();
        for b in msg.iter() {
            ctx.input(core::slice::from_ref(b)).unwrap();
        }
        let mut out = [0u8; 20];
        ctx.finish(&mut out).unwrap();
        assert_eq!(out, whole);
    }

    #[test]
    fn padding_boundaries() {
        // Lengths around the point where the length field no longer fits.
        for len in [0usize, 1, 54, 55, 56, 57, 63, 64, 65, 119, 120, 127, 128] {
            let msg = vec![0x61u8; len];
            let whole = digest_of(&[&msg[..]]);
            let half = len / 2;
            assert_eq!(digest_of(&[&msg[..half], &msg[half..]]), whole, "len {}", len);
        }

        // 56 bytes forces the padding into a second block.
        let msg = b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";
        assert_eq!(msg.len(), 56);
        assert_eq!(hex_of(&digest_of(&[&msg[..]])), "84983e441c3bd26ebaae4aa1f95129e5e54670f1");
    }

    #[test]
    fn empty_input_is_a_no_op() {
        let mut ctx = Context::new();
        ctx.input(&[]).unwrap();
        assert_eq!(ctx.state(), State::Fresh);
        assert_eq!(ctx.bit_length(), 0);

        ctx.input(b"abc").unwrap();
        ctx.input(&[]).unwrap();
        assert_eq!(ctx.state(), State::Accepting);
        assert_eq!(ctx.bit_length(), 24);
    }

    #[test]
    fn input_after_finish_is_rejected() {
        let mut ctx = Context::new();
        ctx.input(b"abc").unwrap();
        let mut out = [0u8; 20];
        ctx.finish(&mut out).unwrap();

        assert_eq!(ctx.input(b"more"), Err(Error::InvalidState(State::Computed)));
        assert!(ctx.is_corrupted());
        assert_eq!(ctx.input(&[]), Err(Error::InvalidState(State::Corrupted)));
    }

    #[test]
    fn second_finish_is_rejected() {
        let mut ctx = Context::new();
        ctx.input(b"abc").unwrap();
        let first = ctx.finalize().unwrap();
        assert!(ctx.is_computed());

        let mut out = [0xaau8; 20];
        assert_eq!(ctx.finish(&mut out), Err(Error::InvalidState(State::Computed)));
        assert_eq!(out, [0xaa; 20]);
        assert!(ctx.is_corrupted());
        assert_eq!(first.to_string(), "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn finish_on_corrupted_leaves_output_untouched() {
        let mut ctx = Context::new();
        ctx.finalize().unwrap();
        let _ = ctx.input(b"x");
        assert!(ctx.is_corrupted());

        let before = ctx.midstate();
        let mut out = [0x55u8; 20];
        assert_eq!(ctx.finish(&mut out), Err(Error::InvalidState(State::Corrupted)));
        assert_eq!(out, [0x55; 20]);
        assert_eq!(ctx.midstate(), before);
    }

    #[test]
    fn finish_wipes_block_buffer() {
        let mut ctx = Context::new();
        ctx.input(b"secret material").unwrap();
        ctx.finalize().unwrap();
        assert_eq!(ctx.buffer, [0u8; BLOCK_SIZE]);
        assert_eq!(ctx.index, 0);
    }

    #[test]
    fn length_limit() {
        // Block aligned offset 512 bits below the limit.
        let offset = (1u64 << 61) - BLOCK_SIZE as u64;
        let midstate = Context::new().midstate();

        let mut ctx = Context::from_midstate(midstate, offset);
        assert_eq!(ctx.bit_length(), u64::MAX - 511);
        ctx.input(&[0u8; BLOCK_SIZE - 1]).unwrap();
        assert_eq!(ctx.bit_length(), u64::MAX - 7);
        assert_eq!(ctx.input(&[0u8]), Err(Error::InputTooLong));
        assert!(ctx.is_corrupted());
        assert_eq!(ctx.bit_length(), u64::MAX - 7);

        // The longest byte aligned message still produces a digest.
        let mut ctx = Context::from_midstate(midstate, offset);
        ctx.input(&[0u8; BLOCK_SIZE - 1]).unwrap();
        let mut out = [0u8; 20];
        ctx.finish(&mut out).unwrap();

        // Overflow inside a larger slice is caught as well.
        let mut ctx = Context::from_midstate(midstate, offset);
        assert_eq!(ctx.input(&[0u8; 2 * BLOCK_SIZE]), Err(Error::InputTooLong));
        assert!(ctx.is_corrupted());
    }

    #[test]
    fn reset_restores_fresh_behaviour() {
        let expected = digest_of(&[&b"abc"[..]]);

        let mut ctx = Context::new();
        ctx.input(b"garbage").unwrap();
        ctx.reset();
        assert_eq!(ctx.state(), State::Fresh);
        ctx.input(b"abc").unwrap();
        let mut out = [0u8; 20];
        ctx.finish(&mut out).unwrap();
        assert_eq!(out, expected);

        ctx.reset();
        ctx.input(b"abc").unwrap();
        ctx.finish(&mut out).unwrap();
        assert_eq!(out, expected);

        let mut ctx = Context::from_midstate(Context::new().midstate(), (1u64 << 61) - 64);
        ctx.input(&[0u8; 64]).unwrap_err();
        assert!(ctx.is_corrupted());
        ctx.reset();
        assert_eq!(ctx.bit_length(), 0);
        ctx.input(b"abc").unwrap();
        ctx.finish(&mut out).unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn midstate_resume() {
        let msg = [0x5au8; 3 * BLOCK_SIZE + 17];
        let whole = digest_of(&[&msg[..]]);

        let mut ctx = Context::new();
        ctx.input(&msg[..2 * BLOCK_SIZE]).unwrap();
        let midstate = ctx.midstate();

        let mut resumed = Context::from_midstate(midstate, 2 * BLOCK_SIZE as u64);
        assert_eq!(resumed.state(), State::Accepting);
        resumed.input(&msg[2 * BLOCK_SIZE..]).unwrap();
        let mut out = [0u8; 20];
        resumed.finish(&mut out).unwrap();
        assert_eq!(out, whole);
    }

    #[test]
    #[should_panic]
    fn from_midstate_rejects_unaligned_length() {
        let _ = Context::from_midstate(Midstate::default(), 63);
    }

    #[test]
    fn debug_hides_buffer() {
        let mut ctx = Context::new();
        ctx.input(b"abc").unwrap();
        assert_eq!(
            format!("{:?}", ctx),
            "Context { state: Accepting, bit_length: 24, index: 3 }"
        );
    }

    #[test]
    fn midstate_hex() {
        let midstate = Context::new().midstate();
        assert_eq!(midstate.to_string(), "67452301efcdab8998badcfe10325476c3d2e1f0");
        assert_eq!(midstate.to_string().parse::<Midstate>().unwrap(), midstate);
    }
}

#[cfg(bench)]
mod benches {
    use test::Bencher;

    use crate::Context;

    #[bench]
    pub fn sha1_10(bh: &mut Bencher) {
        let mut engine = Context::new();
        let bytes = [1u8; 10];
        bh.iter(|| {
            engine.input(&bytes).unwrap();
        });
        bh.bytes = bytes.len() as u64;
    }

    #[bench]
    pub fn sha1_1k(bh: &mut Bencher) {
        let mut engine = Context::new();
        let bytes = [1u8; 1024];
        bh.iter(|| {
            engine.input(&bytes).unwrap();
        });
        bh.bytes = bytes.len() as u64;
    }

    #[bench]
    pub fn sha1_64k(bh: &mut Bencher) {
        let mut engine = Context::new();
        let bytes = [1u8; 65536];
        bh.iter(|| {
            engine.input(&bytes).unwrap();
        });
        bh.bytes = bytes.len() as u64;
    }
}
