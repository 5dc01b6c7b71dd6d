//! Linkable ring signatures over a [`Ring`]: prove ownership of one column
//! of the ring, and sign with its key images, without revealing which
//! column.
#![allow(non_snake_case)]
use crate::encoding::{write_varint, ByteCursor};
use crate::errors::{ProofError, ProofResult, Rejection};
use crate::gens::{check_parameters, ProofGens};
use crate::keys::SecretKey;
use crate::multisig::Multisignature;
use crate::proofs::{OneOfManyProof, OneOfManyProofs};
use crate::statement::{Ring, RingStatement};
use alloc::vec::Vec;
use curve25519_dalek::constants::RISTRETTO_BASEPOINT_TABLE;
use curve25519_dalek::ristretto::CompressedRistretto;
use curve25519_dalek::scalar::Scalar;
use rand::{CryptoRng, RngCore};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A spend of `L` inputs from a ring of `base^exponent` members.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpendSignature {
    base: usize,
    exponent: usize,
    co1: CompressedRistretto,
    proof: OneOfManyProof,
    multisig: Multisignature,
}

/// Sign `message` by spending column `l` of `ring`.
///
/// `secret_keys[j]` must open `ring.public_keys()[j][l]` and match key image
/// `j`, and `ring.commitments()[l]` must equal `s*H`. The signature commits
/// to `co1 = s*G`.
///
/// ```
/// # use rand::rngs::OsRng;
/// # use bootle_ruffing::gens::ProofGens;
/// # use bootle_ruffing::keys::Output;
/// # use bootle_ruffing::spend::spend;
/// # use bootle_ruffing::statement::Ring;
/// #
/// let gens = ProofGens::new(2, 2).unwrap();
/// let outputs = (0..gens.ring_size())
///     .map(|i| Output::random(i as u64, &gens.pedersen, &mut OsRng))
///     .collect::<Vec<Output>>();
///
/// // Spend output 2 into a new output holding the same amount
/// let l = 2;
/// let new = Output::random(2, &gens.pedersen, &mut OsRng);
/// let s = outputs[l].mask - new.mask;
/// let ring = Ring::new(
///     vec![outputs[l].ki],
///     vec![outputs.iter().map(|o| o.pk).collect()],
///     outputs.iter().map(|o| o.co - new.co).collect(),
/// )
/// .unwrap();
///
/// let sig = spend(&gens, &ring, b"tx", &[outputs[l].sk.clone()], l, &s, &mut OsRng).unwrap();
/// assert!(sig.verify(&ring, b"tx").is_ok());
/// ```
pub fn spend<R>(
    gens: &ProofGens,
    ring: &Ring,
    message: &[u8],
    secret_keys: &[SecretKey],
    l: usize,
    s: &Scalar,
    rng: &mut R,
) -> ProofResult<SpendSignature>
where
    R: RngCore + CryptoRng,
{
    if secret_keys.len() != ring.inputs() {
        return Err(ProofError::ShapeMismatch);
    }
    if l >= gens.ring_size() {
        return Err(ProofError::IndexOutOfBounds);
    }
    if ring.len() < gens.ring_size() {
        return Err(ProofError::SetIsTooSmall);
    }
    if ring.len() > gens.ring_size() {
        return Err(ProofError::SetIsTooLarge);
    }

    let co1 = s * &RISTRETTO_BASEPOINT_TABLE;
    let statement = RingStatement::new(ring, co1, message);
    let reduction = statement.reduce();

    let s1 = s + secret_keys
        .iter()
        .zip(&reduction.weights)
        .map(|(sk, f)| sk.r * f)
        .sum::<Scalar>();
    let proof = reduction.commitments.prove(gens, l, &s1, rng)?;

    let mut signed = proof.to_bytes();
    signed.extend_from_slice(&statement.to_bytes());
    let secrets = secret_keys.iter().map(|sk| sk.r1).collect::<Vec<Scalar>>();
    let multisig = Multisignature::sign(&signed, &secrets, rng)?;

    Ok(SpendSignature {
        base: gens.base,
        exponent: gens.exponent,
        co1: co1.compress(),
        proof,
        multisig,
    })
}

impl SpendSignature {
    pub fn base(&self) -> usize {
        self.base
    }

    pub fn exponent(&self) -> usize {
        self.exponent
    }

    /// The commitment `s*G` this signature was made with.
    pub fn co1(&self) -> &CompressedRistretto {
        &self.co1
    }

    /// Verify the signature over `message` against `ring`. Both the
    /// multisignature over the key images and the one-of-many proof over the
    /// reduced ring must hold.
    pub fn verify(&self, ring: &Ring, message: &[u8]) -> ProofResult<()> {
        if ring.len() != check_parameters(self.base, self.exponent)? {
            return Err(ProofError::rejected(Rejection::RingSizeMismatch));
        }
        let gens = ProofGens::new(self.base, self.exponent)?;

        let co1 = self
            .co1
            .decompress()
            .ok_or_else(|| ProofError::rejected(Rejection::InvalidPoint))?;
        let statement = RingStatement::new(ring, co1, message);
        let reduction = statement.reduce();

        let mut signed = self.proof.to_bytes();
        signed.extend_from_slice(&statement.to_bytes());
        self.multisig.verify(&signed, ring.key_images())?;

        reduction.commitments.verify(&gens, &self.proof)
    }

    /// Canonical encoding: `base` and `exponent` as varints, then `co1`,
    /// the one-of-many proof and the multisignature.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint(&mut out, self.base as u64);
        write_varint(&mut out, self.exponent as u64);
        out.extend_from_slice(self.co1.as_bytes());
        self.proof.write_bytes(&mut out);
        out.extend_from_slice(&self.multisig.to_bytes());
        out
    }

    /// Decode a signature. Points are not validated until the signature is
    /// verified.
    pub fn from_bytes(bytes: &[u8]) -> ProofResult<SpendSignature> {
        let mut cursor = ByteCursor::new(bytes);
        let base = cursor.read_usize()?;
        let exponent = cursor.read_usize()?;
        check_parameters(base, exponent)?;

        let co1 = cursor.read_point()?;
        let proof = OneOfManyProof::read_bytes(&mut cursor, base, exponent)?;
        let multisig = Multisignature::read_bytes(&mut cursor)?;
        cursor.finish()?;

        Ok(SpendSignature {
            base,
            exponent,
            co1,
            proof,
            multisig,
        })
    }
}
