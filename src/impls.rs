// SPDX-License-Identifier: CC0-1.0

//! Implementations of the I/O traits for [`Context`].
//!
//! A write to a context that no longer accepts input (already finished,
//! corrupted, or at the 2^64 bit limit) fails with an error of kind `Other`.

use crate::Context;

fn write_impl(ctx: &mut Context, buf: &[u8]) -> Result<usize, crate::Error> {
    ctx.input(buf)?;
    Ok(buf.len())
}

impl bitcoin_io::Write for Context {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> bitcoin_io::Result<usize> {
        write_impl(self, buf).map_err(|_| bitcoin_io::ErrorKind::Other.into())
    }

    #[inline]
    fn flush(&mut self) -> bitcoin_io::Result<()> { Ok(()) }
}

#[cfg(feature = "std")]
impl std::io::Write for Context {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        write_impl(self, buf).map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    #[inline]
    fn flush(&mut self) -> std::io::Result<()> { Ok(()) }
}
