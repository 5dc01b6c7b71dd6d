//! Spending keys and freshly generated outputs.
#![allow(non_snake_case)]
use crate::commitment::PairedCommitment;
use crate::gens::PedersenGens;
use curve25519_dalek::constants::RISTRETTO_BASEPOINT_TABLE;
use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use rand::{CryptoRng, RngCore};

/// The secret key of one input: the randomness `r` its public key is
/// encrypted under, and the discrete log `r1` of its key image.
#[derive(Clone)]
pub struct SecretKey {
    pub r: Scalar,
    pub r1: Scalar,
}

impl SecretKey {
    pub fn new(r: Scalar, r1: Scalar) -> SecretKey {
        SecretKey { r, r1 }
    }

    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> SecretKey {
        SecretKey {
            r: Scalar::random(rng),
            r1: Scalar::random(rng),
        }
    }

    /// The key image, `r1*G`. Spending the same key twice reveals the same
    /// key image.
    pub fn key_image(&self) -> RistrettoPoint {
        &self.r1 * &RISTRETTO_BASEPOINT_TABLE
    }

    /// The public key, an encryption of the key image under `r`.
    pub fn public_key(&self, gens: &PedersenGens) -> PairedCommitment {
        gens.encrypt(&self.key_image(), &self.r)
    }
}

/// A spendable output with a random key and mask.
#[derive(Clone)]
pub struct Output {
    pub sk: SecretKey,
    pub ki: RistrettoPoint,
    pub pk: PairedCommitment,
    pub amount: u64,
    pub mask: Scalar,
    /// `amount*G + mask*H`
    pub co: RistrettoPoint,
}

impl Output {
    pub fn random<R: RngCore + CryptoRng>(amount: u64, gens: &PedersenGens, rng: &mut R) -> Output {
        let sk = SecretKey::random(rng);
        let mask = Scalar::random(rng);
        Output {
            ki: sk.key_image(),
            pk: sk.public_key(gens),
            co: gens.commit(&Scalar::from(amount), &mask),
            sk,
            amount,
            mask,
        }
    }
}
