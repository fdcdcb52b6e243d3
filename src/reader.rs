use byteorder::{BigEndian, ByteOrder};
use std::io::{self, Read};

use crate::parser::{ParseError, Result};

/// Sequential reader that counts every byte it hands out.
///
/// The consumed total is what the box walker compares against the stream
/// length to decide when it is done. All reads funnel through [`read_exact`]
/// or [`skip`], which turn short reads into a typed [`ParseError::Truncated`]
/// instead of letting a partial buffer masquerade as data.
///
/// [`read_exact`]: TrackedReader::read_exact
/// [`skip`]: TrackedReader::skip
pub struct TrackedReader<R> {
    inner: R,
    consumed: u64,
}

impl<R: Read> TrackedReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, consumed: 0 }
    }

    /// Total bytes consumed so far, headers and payloads alike.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        match self.inner.read_exact(buf) {
            Ok(()) => {
                self.consumed += buf.len() as u64;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(ParseError::Truncated {
                needed: buf.len() as u64,
            }),
            Err(e) => Err(ParseError::Io(e)),
        }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)?;
        Ok(BigEndian::read_u16(&buf))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(BigEndian::read_u32(&buf))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf)?;
        Ok(BigEndian::read_u64(&buf))
    }

    /// Read and discard exactly `n` bytes.
    ///
    /// Skipping consumes the stream rather than seeking, so any `Read` source
    /// works, pipes included.
    pub fn skip(&mut self, n: u64) -> Result<()> {
        let copied = io::copy(&mut (&mut self.inner).take(n), &mut io::sink())?;
        self.consumed += copied;
        if copied < n {
            return Err(ParseError::Truncated { needed: n - copied });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_are_counted() {
        let mut r = TrackedReader::new(Cursor::new(vec![0u8; 32]));
        r.read_u32().unwrap();
        r.read_u8().unwrap();
        r.skip(7).unwrap();
        assert_eq!(r.consumed(), 12);
    }

    #[test]
    fn big_endian_decoding() {
        let data = vec![0x00, 0x01, 0x00, 0x00];
        let mut r = TrackedReader::new(Cursor::new(data));
        assert_eq!(r.read_u32().unwrap(), 0x0001_0000);
    }

    #[test]
    fn short_read_is_truncated() {
        let mut r = TrackedReader::new(Cursor::new(vec![0u8; 3]));
        assert!(matches!(
            r.read_u32(),
            Err(ParseError::Truncated { needed: 4 })
        ));
    }

    #[test]
    fn skip_past_eof_is_truncated() {
        let mut r = TrackedReader::new(Cursor::new(vec![0u8; 10]));
        let err = r.skip(25).unwrap_err();
        assert!(matches!(err, ParseError::Truncated { needed: 15 }));
        // the 10 available bytes still count as consumed
        assert_eq!(r.consumed(), 10);
    }
}
