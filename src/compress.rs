// SPDX-License-Identifier: CC0-1.0

//! The SHA-1 compression function.
//!
//! [`compress`] folds one 512-bit block into the 160-bit chaining value. It is
//! a pure function of its arguments, everything else in the crate (buffering,
//! padding, lifecycle) is built on top of it.

/// Size of a SHA-1 message block, in bytes.
pub const BLOCK_SIZE: usize = 64;

/// Initial chaining value of SHA-1 (FIPS 180-1, RFC 3174 section 6.1).
pub const IV: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

/// Additive round constants, one per 20-round stage.
const K: [u32; 4] = [0x5a827999, 0x6ed9eba1, 0x8f1bbcdc, 0xca62c1d6];

#[inline(always)]
fn choose(b: u32, c: u32, d: u32) -> u32 { (b & c) | (!b & d) }

#[inline(always)]
fn parity(b: u32, c: u32, d: u32) -> u32 { b ^ c ^ d }

#[inline(always)]
fn majority(b: u32, c: u32, d: u32) -> u32 { (b & c) | (b & d) | (c & d) }

/// Expands a block into the 80-word message schedule.
fn schedule(block: &[u8; BLOCK_SIZE]) -> [u32; 80] {
    let mut w = [0u32; 80];
    for (w_val, buff_bytes) in w.iter_mut().zip(block.chunks_exact(4)) {
        *w_val = u32::from_be_bytes([buff_bytes[0], buff_bytes[1], buff_bytes[2], buff_bytes[3]]);
    }
    for i in 16..80 {
        w[i] = (w[i - 3] ^ w[i - 8] ^ w[i - 14] ^ w[i - 16]).rotate_left(1);
    }
    w
}

/// Runs the 80 SHA-1 rounds of `block` over the chaining value `state`.
///
/// All additions are modulo 2^32. The function cannot fail.
///
/// # Examples
///
/// ```
/// use sha1_stream::compress::{compress, BLOCK_SIZE, IV};
///
/// // The single padded block of the message "abc".
/// let mut block = [0u8; BLOCK_SIZE];
/// block[..3].copy_from_slice(b"abc");
/// block[3] = 0x80;
/// block[63] = 24;
///
/// let h = compress(IV, &block);
/// assert_eq!(h, [0xa9993e36, 0x4706816a, 0xba3e2571, 0x7850c26c, 0x9cd0d89d]);
/// ```
pub fn compress(state: [u32; 5], block: &[u8; BLOCK_SIZE]) -> [u32; 5] {
    let w = schedule(block);

    let [mut a, mut b, mut c, mut d, mut e] = state;

    for (i, &wi) in w.iter().enumerate() {
        let f = match i / 20 {
            0 => choose(b, c, d),
            1 | 3 => parity(b, c, d),
            _ => majority(b, c, d),
        };

        let temp = a
            .rotate_left(5)
            .wrapping_add(f)
            .wrapping_add(e)
            .wrapping_add(K[i / 20])
            .wrapping_add(wi);
        e = d;
        d = c;
        c = b.rotate_left(30);
        b = a;
        a = temp;
    }

    [
        state[0].wrapping_add(a),
        state[1].wrapping_add(b),
        state[2].wrapping_add(c),
        state[3].wrapping_add(d),
        state[4].wrapping_add(e),
    ]
}
