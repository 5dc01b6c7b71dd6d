//! Helpers for the canonical byte encoding of proofs and signatures.
use crate::commitment::CompressedPairedCommitment;
use crate::errors::{ProofError, ProofResult};
use alloc::vec::Vec;
use core::convert::TryFrom;
use curve25519_dalek::ristretto::CompressedRistretto;
use curve25519_dalek::scalar::Scalar;

/// Append `value` as a varint: seven bits per byte, least significant group
/// first, with the high bit set on every byte but the last.
pub(crate) fn write_varint(out: &mut Vec<u8>, value: u64) {
    let mut n = value;
    while n >= 0x80 {
        out.push((n & 0x7f) as u8 | 0x80);
        n >>= 7;
    }
    out.push(n as u8);
}

/// Reads fixed-size fields front to back, failing on truncated input.
pub(crate) struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        ByteCursor { bytes, pos: 0 }
    }

    fn read_bytes(&mut self, n: usize) -> ProofResult<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or(ProofError::Truncated)?;
        let bytes = self.bytes.get(self.pos..end).ok_or(ProofError::Truncated)?;
        self.pos = end;
        Ok(bytes)
    }

    fn read_array32(&mut self) -> ProofResult<[u8; 32]> {
        let mut buf = [0u8; 32];
        buf.copy_from_slice(self.read_bytes(32)?);
        Ok(buf)
    }

    pub(crate) fn read_varint(&mut self) -> ProofResult<u64> {
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            let byte = self.read_bytes(1)?[0];
            let group = u64::from(byte & 0x7f);
            if shift > 63 || (shift == 63 && group > 1) {
                return Err(ProofError::InvalidVarInt);
            }
            value |= group << shift;
            if byte & 0x80 == 0 {
                // Reject overlong encodings, so every value has exactly one
                // encoding.
                if byte == 0 && shift > 0 {
                    return Err(ProofError::InvalidVarInt);
                }
                return Ok(value);
            }
            shift += 7;
        }
    }

    pub(crate) fn read_usize(&mut self) -> ProofResult<usize> {
        usize::try_from(self.read_varint()?).map_err(|_| ProofError::InvalidVarInt)
    }

    /// Reads a compressed point. Its validity is checked when it is
    /// decompressed during verification.
    pub(crate) fn read_point(&mut self) -> ProofResult<CompressedRistretto> {
        Ok(CompressedRistretto(self.read_array32()?))
    }

    pub(crate) fn read_scalar(&mut self) -> ProofResult<Scalar> {
        Scalar::from_canonical_bytes(self.read_array32()?).ok_or(ProofError::InvalidScalar)
    }

    pub(crate) fn read_paired_commitment(&mut self) -> ProofResult<CompressedPairedCommitment> {
        Ok(CompressedPairedCommitment {
            P1: self.read_point()?,
            P2: self.read_point()?,
        })
    }

    pub(crate) fn read_scalar_matrix(
        &mut self,
        rows: usize,
        columns: usize,
    ) -> ProofResult<Vec<Vec<Scalar>>> {
        // Sizes come from untrusted input, so storage grows only as fields
        // are actually read.
        let mut matrix = Vec::new();
        for _ in 0..rows {
            let mut row = Vec::new();
            for _ in 0..columns {
                row.push(self.read_scalar()?);
            }
            matrix.push(row);
        }
        Ok(matrix)
    }

    /// Fails unless every byte has been consumed.
    pub(crate) fn finish(self) -> ProofResult<()> {
        if self.pos == self.bytes.len() {
            Ok(())
        } else {
            Err(ProofError::TrailingBytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn varint(value: u64) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint(&mut out, value);
        out
    }

    #[test]
    fn varint_encoding() {
        assert_eq!(varint(0), vec![0x00]);
        assert_eq!(varint(2), vec![0x02]);
        assert_eq!(varint(127), vec![0x7f]);
        assert_eq!(varint(128), vec![0x80, 0x01]);
        assert_eq!(varint(300), vec![0xac, 0x02]);
        assert_eq!(varint(16_383), vec![0xff, 0x7f]);
        assert_eq!(varint(16_384), vec![0x80, 0x80, 0x01]);
        assert_eq!(varint(u64::MAX).len(), 10);
    }

    #[test]
    fn varint_decoding() {
        for &v in &[0u64, 1, 127, 128, 300, 16_384, 1 << 35, u64::MAX] {
            let bytes = varint(v);
            let mut cursor = ByteCursor::new(&bytes);
            assert_eq!(cursor.read_varint().unwrap(), v);
            assert!(cursor.finish().is_ok());
        }

        // Continuation bit with nothing after it
        assert_eq!(
            ByteCursor::new(&[0x80]).read_varint().unwrap_err(),
            ProofError::Truncated
        );
        // Overlong encoding of 2
        assert_eq!(
            ByteCursor::new(&[0x82, 0x00]).read_varint().unwrap_err(),
            ProofError::InvalidVarInt
        );
        // Eleven bytes cannot fit in 64 bits
        let mut too_long = vec![0xffu8; 10];
        too_long.push(0x01);
        assert_eq!(
            ByteCursor::new(&too_long).read_varint().unwrap_err(),
            ProofError::InvalidVarInt
        );
        let mut overflow = vec![0xffu8; 9];
        overflow.push(0x02);
        assert_eq!(
            ByteCursor::new(&overflow).read_varint().unwrap_err(),
            ProofError::InvalidVarInt
        );
    }

    #[test]
    fn fixed_fields() {
        let one = Scalar::one();
        let mut bytes = Vec::new();
        bytes.extend_from_slice(one.as_bytes());
        bytes.extend_from_slice(&[0xffu8; 32]);

        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(cursor.read_scalar().unwrap(), one);
        assert_eq!(cursor.read_scalar().unwrap_err(), ProofError::InvalidScalar);

        let mut cursor = ByteCursor::new(&bytes[..40]);
        assert!(cursor.read_point().is_ok());
        assert_eq!(cursor.read_point().unwrap_err(), ProofError::Truncated);

        let mut cursor = ByteCursor::new(&bytes);
        assert!(cursor.read_point().is_ok());
        assert_eq!(cursor.finish().unwrap_err(), ProofError::TrailingBytes);
    }

    #[test]
    fn scalar_matrix_shape() {
        let mut bytes = Vec::new();
        for i in 0..6u64 {
            bytes.extend_from_slice(Scalar::from(i).as_bytes());
        }
        let m = ByteCursor::new(&bytes).read_scalar_matrix(3, 2).unwrap();
        assert_eq!(m.len(), 3);
        assert!(m.iter().all(|row| row.len() == 2));
        assert_eq!(m[2][1], Scalar::from(5u64));

        assert_eq!(
            ByteCursor::new(&bytes).read_scalar_matrix(4, 2).unwrap_err(),
            ProofError::Truncated
        );
    }
}
