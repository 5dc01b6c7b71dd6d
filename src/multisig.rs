//! Schnorr multisignatures with MuSig key aggregation, for a single signer
//! holding every secret key.
//!
//! With public keys `X_0 .. X_{n-1}`:
//!
//! - `L = H(X_0, .., X_{n-1})` and `a_i = H(L, X_i)`
//! - the aggregate key is `X = sum(a_i * X_i)`
//! - signing: `(R, s) = (k*G, k + H(X, R, m) * sum(a_i * x_i))`
//! - verification: `s*G == R + H(X, R, m) * X`
#![allow(non_snake_case)]
use crate::encoding::ByteCursor;
use crate::errors::{ProofError, ProofResult, Rejection};
use crate::transcript::{TranscriptProtocol, PROTOCOL_LABEL};
use alloc::vec::Vec;
use curve25519_dalek::constants::RISTRETTO_BASEPOINT_TABLE;
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar;
use merlin::Transcript;
use rand::{CryptoRng, RngCore};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Length of an encoded [`Multisignature`] in bytes.
pub const MULTISIGNATURE_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Multisignature {
    R: CompressedRistretto,
    s: Scalar,
}

/// Transcript state after committing to the key list, and the aggregation
/// coefficient of every key.
fn aggregate(publics: &[CompressedRistretto]) -> ProofResult<(Transcript, Vec<Scalar>)> {
    if publics.is_empty() {
        return Err(ProofError::ShapeMismatch);
    }

    let mut transcript = Transcript::new(PROTOCOL_LABEL);
    transcript.multisig_domain_sep(publics.len() as u64);
    for X in publics {
        transcript.append_point(b"X", X);
    }

    let coefficients = publics
        .iter()
        .map(|X_i| {
            let mut t = transcript.clone();
            t.append_point(b"X_i", X_i);
            t.challenge_scalar(b"a_i")
        })
        .collect();

    Ok((transcript, coefficients))
}

fn challenge(
    mut transcript: Transcript,
    X: &CompressedRistretto,
    R: &CompressedRistretto,
    message: &[u8],
) -> Scalar {
    transcript.append_point(b"X_agg", X);
    transcript.append_point(b"R", R);
    transcript.append_message(b"m", message);
    transcript.challenge_scalar(b"c")
}

impl Multisignature {
    /// Sign `message` with every secret key in `secrets`. The matching public
    /// keys are `x_i*G`, in the same order.
    pub fn sign<R>(message: &[u8], secrets: &[Scalar], rng: &mut R) -> ProofResult<Multisignature>
    where
        R: RngCore + CryptoRng,
    {
        let publics = secrets
            .iter()
            .map(|x| (x * &RISTRETTO_BASEPOINT_TABLE).compress())
            .collect::<Vec<CompressedRistretto>>();
        let (transcript, a) = aggregate(&publics)?;

        let mut rng = {
            let mut builder = transcript.build_rng();

            // Commit to witness data
            for x in secrets {
                builder = builder.rekey_with_witness_bytes(b"x", x.as_bytes());
            }
            builder = builder.rekey_with_witness_bytes(b"m", message);

            builder.finalize(rng)
        };

        let x_agg = secrets.iter().zip(&a).map(|(x, a)| a * x).sum::<Scalar>();
        let X = (&x_agg * &RISTRETTO_BASEPOINT_TABLE).compress();

        let k = Scalar::random(&mut rng);
        let R = (&k * &RISTRETTO_BASEPOINT_TABLE).compress();
        let c = challenge(transcript, &X, &R, message);

        Ok(Multisignature { R, s: k + c * x_agg })
    }

    /// Verify the signature over `message` against the public keys, in the
    /// order they were signed with.
    pub fn verify(&self, message: &[u8], publics: &[RistrettoPoint]) -> ProofResult<()> {
        if !self.s.is_canonical() {
            return Err(ProofError::rejected(Rejection::MalformedProof));
        }
        let R = self
            .R
            .decompress()
            .ok_or_else(|| ProofError::rejected(Rejection::InvalidPoint))?;

        let compressed = publics
            .iter()
            .map(RistrettoPoint::compress)
            .collect::<Vec<CompressedRistretto>>();
        let (transcript, a) = aggregate(&compressed)?;

        let X = publics
            .iter()
            .zip(&a)
            .map(|(X_i, a_i)| a_i * X_i)
            .sum::<RistrettoPoint>();
        let c = challenge(transcript, &X.compress(), &self.R, message);

        if &self.s * &RISTRETTO_BASEPOINT_TABLE != R + c * X {
            return Err(ProofError::rejected(Rejection::Multisignature));
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> [u8; MULTISIGNATURE_LEN] {
        let mut bytes = [0u8; MULTISIGNATURE_LEN];
        bytes[..32].copy_from_slice(self.R.as_bytes());
        bytes[32..].copy_from_slice(self.s.as_bytes());
        bytes
    }

    pub(crate) fn read_bytes(cursor: &mut ByteCursor<'_>) -> ProofResult<Multisignature> {
        Ok(Multisignature {
            R: cursor.read_point()?,
            s: cursor.read_scalar()?,
        })
    }
}
