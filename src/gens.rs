#![allow(non_snake_case)]
use crate::commitment::PairedCommitment;
use crate::errors::{ProofError, ProofResult};
use alloc::vec::Vec;
use core::convert::TryFrom;
use core::ops::Mul;
use curve25519_dalek::constants;
use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::traits::Identity;
use sha3::Sha3_512;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest supported decomposition exponent.
pub const MAX_EXPONENT: usize = 32;

/// Largest supported number of vector commitment generators, `base * exponent`.
pub const MAX_GENERATORS: usize = 1 << 12;

/// The pair of independent generators used for amount commitments and for
/// the paired commitments which encrypt key images.
///
/// `G` is the Ristretto base point and `H = hash(G)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PedersenGens {
    pub G: RistrettoPoint,
    pub H: RistrettoPoint,
}

impl Default for PedersenGens {
    fn default() -> Self {
        let G = constants::RISTRETTO_BASEPOINT_POINT;
        let H = RistrettoPoint::hash_from_bytes::<Sha3_512>(G.compress().as_bytes());
        PedersenGens { G, H }
    }
}

impl PedersenGens {
    /// Create a pedersen commitment, with value `v` and blinding factor `r`.
    pub fn commit(&self, v: &Scalar, r: &Scalar) -> RistrettoPoint {
        v * self.G + r * self.H
    }

    /// Encrypt the point `X` under the randomness `r`: `(X + r*H, r*G)`.
    pub fn encrypt(&self, X: &RistrettoPoint, r: &Scalar) -> PairedCommitment {
        PairedCommitment::new(X + r * self.H, r * self.G)
    }

    /// Encrypt the identity under `r`. Such a commitment opens to zero, and
    /// is what the one-of-many proof proves knowledge of.
    pub fn encrypt_zero(&self, r: &Scalar) -> PairedCommitment {
        self.encrypt(&RistrettoPoint::identity(), r)
    }
}

/// A collection of generator points that can be used to compute various
/// proofs in this crate. To create an instance of [`ProofGens`] call
/// ProofGens::new(`base`, `exponent`); proofs computed with these generators
/// cover sets of exactly `base^exponent` members.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProofGens {
    pub base: usize,
    pub exponent: usize,
    pub pedersen: PedersenGens,
    H_vec: Vec<RistrettoPoint>,
}

impl ProofGens {
    /// Create a new instance of [`ProofGens`] with enough generator points to
    /// commit to an `exponent x base` matrix.
    ///
    /// ```
    /// # use bootle_ruffing::gens::ProofGens;
    /// // Support proofs over rings of 4^3 = 64 members
    /// let gens = ProofGens::new(4, 3).unwrap();
    /// assert_eq!(gens.ring_size(), 64);
    /// ```
    pub fn new(base: usize, exponent: usize) -> ProofResult<ProofGens> {
        check_parameters(base, exponent)?;
        let len = generator_count(base, exponent)?;

        // Vector commitment generators, chained from H:
        //
        // H_vec[0]   = hash(H)
        // H_vec[1]   = hash(H_vec[0])
        //  .            .
        // H_vec[n*m-1] = hash(H_vec[n*m-2])
        let pedersen = PedersenGens::default();
        let mut H_vec = Vec::with_capacity(len);
        let mut prev = pedersen.H;
        for _ in 0..len {
            prev = RistrettoPoint::hash_from_bytes::<Sha3_512>(prev.compress().as_bytes());
            H_vec.push(prev);
        }

        Ok(ProofGens {
            base,
            exponent,
            pedersen,
            H_vec,
        })
    }

    /// Returns the number of members, `base^exponent`, that every set proven
    /// over with these generators must have.
    pub fn ring_size(&self) -> usize {
        // Checked in `new()`
        self.base.pow(self.exponent as u32)
    }

    /// Commit to an `exponent x base` matrix of scalars, with blinding factor
    /// `r`: `r*G + sum(m[j][i]*H_vec[j*base + i])`.
    pub(crate) fn commit_matrix<'a, I>(&self, rows: I, r: &Scalar) -> ProofResult<RistrettoPoint>
    where
        I: IntoIterator<Item = &'a Vec<Scalar>>,
    {
        let mut rows_seen = 0;
        let mut flat = Vec::with_capacity(self.H_vec.len());
        for row in rows {
            if row.len() != self.base {
                return Err(ProofError::ShapeMismatch);
            }
            flat.extend_from_slice(row);
            rows_seen += 1;
        }
        if rows_seen != self.exponent {
            return Err(ProofError::ShapeMismatch);
        }
        flat.into_iter().commit(self, r)
    }
}

/// Validates decomposition parameters and returns the ring size they
/// describe.
pub(crate) fn check_parameters(base: usize, exponent: usize) -> ProofResult<usize> {
    if base < 2 || exponent < 1 {
        return Err(ProofError::SetIsTooSmall);
    }
    if exponent > MAX_EXPONENT {
        return Err(ProofError::SetIsTooLarge);
    }
    generator_count(base, exponent)?;
    ring_size(base, exponent)
}

/// Computes `base * exponent`, failing above [`MAX_GENERATORS`].
fn generator_count(base: usize, exponent: usize) -> ProofResult<usize> {
    match base.checked_mul(exponent) {
        Some(len) if len <= MAX_GENERATORS => Ok(len),
        _ => Err(ProofError::SetIsTooLarge),
    }
}

/// Computes `base^exponent`, failing if it overflows.
pub(crate) fn ring_size(base: usize, exponent: usize) -> ProofResult<usize> {
    let exp = u32::try_from(exponent).map_err(|_| ProofError::SetIsTooLarge)?;
    base.checked_pow(exp).ok_or(ProofError::SetIsTooLarge)
}

pub(crate) trait VectorCommit {
    fn commit(self, gens: &ProofGens, r: &Scalar) -> ProofResult<RistrettoPoint>;
}

impl<I, T> VectorCommit for I
where
    I: Iterator<Item = T>,
    T: Mul<RistrettoPoint, Output = RistrettoPoint>,
{
    fn commit(self, gens: &ProofGens, r: &Scalar) -> ProofResult<RistrettoPoint> {
        let mut c = r * gens.pedersen.G;
        for (i, v) in self.enumerate() {
            if i >= gens.H_vec.len() {
                return Err(ProofError::SetIsTooLarge);
            }
            c += v * gens.H_vec[i];
        }
        Ok(c)
    }
}
