//! Paired commitments: two group elements that add, subtract and scale
//! component-wise. They encode public keys as well as the folded
//! commitments consumed by the one-of-many proof.
#![allow(non_snake_case)]
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub};
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::traits::Identity;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Length of a compressed paired commitment in bytes.
pub const PAIRED_COMMITMENT_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PairedCommitment {
    pub P1: RistrettoPoint,
    pub P2: RistrettoPoint,
}

/// Wire form of a [`PairedCommitment`]. Neither point is checked for
/// validity until it is decompressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompressedPairedCommitment {
    pub P1: CompressedRistretto,
    pub P2: CompressedRistretto,
}

impl PairedCommitment {
    pub fn new(P1: RistrettoPoint, P2: RistrettoPoint) -> PairedCommitment {
        PairedCommitment { P1, P2 }
    }

    pub fn identity() -> PairedCommitment {
        PairedCommitment {
            P1: RistrettoPoint::identity(),
            P2: RistrettoPoint::identity(),
        }
    }

    pub fn compress(&self) -> CompressedPairedCommitment {
        CompressedPairedCommitment {
            P1: self.P1.compress(),
            P2: self.P2.compress(),
        }
    }

    pub fn to_bytes(&self) -> [u8; PAIRED_COMMITMENT_LEN] {
        self.compress().to_bytes()
    }
}

impl CompressedPairedCommitment {
    /// Returns `None` if either point is not a valid group element.
    pub fn decompress(&self) -> Option<PairedCommitment> {
        Some(PairedCommitment {
            P1: self.P1.decompress()?,
            P2: self.P2.decompress()?,
        })
    }

    pub fn to_bytes(&self) -> [u8; PAIRED_COMMITMENT_LEN] {
        let mut bytes = [0u8; PAIRED_COMMITMENT_LEN];
        bytes[..32].copy_from_slice(self.P1.as_bytes());
        bytes[32..].copy_from_slice(self.P2.as_bytes());
        bytes
    }
}

impl Default for PairedCommitment {
    fn default() -> PairedCommitment {
        PairedCommitment::identity()
    }
}

impl Add for PairedCommitment {
    type Output = PairedCommitment;

    fn add(self, rhs: PairedCommitment) -> PairedCommitment {
        PairedCommitment {
            P1: self.P1 + rhs.P1,
            P2: self.P2 + rhs.P2,
        }
    }
}

impl AddAssign for PairedCommitment {
    fn add_assign(&mut self, rhs: PairedCommitment) {
        self.P1 += rhs.P1;
        self.P2 += rhs.P2;
    }
}

impl Sub for PairedCommitment {
    type Output = PairedCommitment;

    fn sub(self, rhs: PairedCommitment) -> PairedCommitment {
        PairedCommitment {
            P1: self.P1 - rhs.P1,
            P2: self.P2 - rhs.P2,
        }
    }
}

impl Neg for PairedCommitment {
    type Output = PairedCommitment;

    fn neg(self) -> PairedCommitment {
        PairedCommitment {
            P1: -self.P1,
            P2: -self.P2,
        }
    }
}

impl Mul<Scalar> for PairedCommitment {
    type Output = PairedCommitment;

    fn mul(self, rhs: Scalar) -> PairedCommitment {
        PairedCommitment {
            P1: self.P1 * rhs,
            P2: self.P2 * rhs,
        }
    }
}

impl Mul<PairedCommitment> for Scalar {
    type Output = PairedCommitment;

    fn mul(self, rhs: PairedCommitment) -> PairedCommitment {
        rhs * self
    }
}

impl MulAssign<Scalar> for PairedCommitment {
    fn mul_assign(&mut self, rhs: Scalar) {
        self.P1 *= rhs;
        self.P2 *= rhs;
    }
}

impl Sum for PairedCommitment {
    fn sum<I: Iterator<Item = PairedCommitment>>(iter: I) -> PairedCommitment {
        iter.fold(PairedCommitment::identity(), |acc, c| acc + c)
    }
}
