//! Defines a `TranscriptProtocol` trait for using a Merlin transcript.
use crate::commitment::{CompressedPairedCommitment, PairedCommitment};
use crate::errors::{ProofError, ProofResult, Rejection};

use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar;

use merlin::Transcript;

/// Label of the root transcript every Fiat-Shamir hash starts from.
pub(crate) const PROTOCOL_LABEL: &[u8] = b"bootle-ruffing";

pub(crate) trait TranscriptProtocol {
    /// Append a domain separator for a one-of-many proof over a
    /// `base^exponent` sized set.
    fn one_of_many_proof_domain_sep(&mut self, base: u64, exponent: u64);

    /// Append a domain separator for a digit proof over a `base^exponent`
    /// sized set.
    fn digit_proof_domain_sep(&mut self, base: u64, exponent: u64);

    /// Append a domain separator for the per-input weight of input `j`.
    fn input_weight_domain_sep(&mut self, j: u32);

    /// Append a domain separator for a multisignature over `n` keys.
    fn multisig_domain_sep(&mut self, n: u64);

    /// Append a `point` with the given `label`.
    fn append_point(&mut self, label: &'static [u8], point: &CompressedRistretto);

    /// Check that a point decompresses to a valid group element, then append
    /// it to the transcript. Otherwise, return an error.
    fn validate_and_append_point(
        &mut self,
        label: &'static [u8],
        point: &CompressedRistretto,
    ) -> ProofResult<RistrettoPoint>;

    /// Append both points of a paired commitment with the given `label`.
    fn append_paired_commitment(&mut self, label: &'static [u8], c: &CompressedPairedCommitment);

    /// Check that both points of a paired commitment are valid group
    /// elements, then append them to the transcript.
    fn validate_and_append_paired_commitment(
        &mut self,
        label: &'static [u8],
        c: &CompressedPairedCommitment,
    ) -> ProofResult<PairedCommitment>;

    /// Compute a `label`ed challenge variable.
    fn challenge_scalar(&mut self, label: &'static [u8]) -> Scalar;
}

impl TranscriptProtocol for Transcript {
    fn one_of_many_proof_domain_sep(&mut self, base: u64, exponent: u64) {
        self.append_message(b"dom-sep", b"one-of-many-proof v1");
        self.append_u64(b"n", base);
        self.append_u64(b"m", exponent);
    }

    fn digit_proof_domain_sep(&mut self, base: u64, exponent: u64) {
        self.append_message(b"dom-sep", b"digit-proof v1");
        self.append_u64(b"n", base);
        self.append_u64(b"m", exponent);
    }

    fn input_weight_domain_sep(&mut self, j: u32) {
        self.append_message(b"dom-sep", b"input-weight v1");
        self.append_message(b"j", &j.to_le_bytes());
    }

    fn multisig_domain_sep(&mut self, n: u64) {
        self.append_message(b"dom-sep", b"multisig v1");
        self.append_u64(b"n", n);
    }

    fn append_point(&mut self, label: &'static [u8], point: &CompressedRistretto) {
        self.append_message(label, point.as_bytes());
    }

    fn validate_and_append_point(
        &mut self,
        label: &'static [u8],
        point: &CompressedRistretto,
    ) -> ProofResult<RistrettoPoint> {
        match point.decompress() {
            Some(p) => {
                self.append_message(label, point.as_bytes());
                Ok(p)
            }
            None => Err(ProofError::rejected(Rejection::InvalidPoint)),
        }
    }

    fn append_paired_commitment(&mut self, label: &'static [u8], c: &CompressedPairedCommitment) {
        self.append_message(label, &c.to_bytes());
    }

    fn validate_and_append_paired_commitment(
        &mut self,
        label: &'static [u8],
        c: &CompressedPairedCommitment,
    ) -> ProofResult<PairedCommitment> {
        match c.decompress() {
            Some(p) => {
                self.append_message(label, &c.to_bytes());
                Ok(p)
            }
            None => Err(ProofError::rejected(Rejection::InvalidPoint)),
        }
    }

    fn challenge_scalar(&mut self, label: &'static [u8]) -> Scalar {
        let mut buf = [0u8; 64];
        self.challenge_bytes(label, &mut buf);

        Scalar::from_bytes_mod_order_wide(&buf)
    }
}
