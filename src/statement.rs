//! The public inputs of a spend, and their reduction to a single set of
//! paired commitments for the one-of-many proof.
#![allow(non_snake_case)]
use crate::commitment::PairedCommitment;
use crate::errors::{ProofError, ProofResult};
use crate::transcript::{TranscriptProtocol, PROTOCOL_LABEL};
use alloc::vec::Vec;
use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::traits::Identity;
use merlin::Transcript;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A ring of `N` members spent by `L` inputs.
///
/// Column `i` of the ring holds one public key per input, `public_keys[j][i]`,
/// and a single amount commitment `commitments[i]`. A spender owns every key
/// in exactly one column.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ring {
    key_images: Vec<RistrettoPoint>,
    public_keys: Vec<Vec<PairedCommitment>>,
    commitments: Vec<RistrettoPoint>,
}

impl Ring {
    /// Build a ring from `L` key images, an `L x N` matrix of public keys and
    /// `N` commitments. Fails with [`ProofError::ShapeMismatch`] if the ring
    /// is empty or the shapes disagree.
    pub fn new(
        key_images: Vec<RistrettoPoint>,
        public_keys: Vec<Vec<PairedCommitment>>,
        commitments: Vec<RistrettoPoint>,
    ) -> ProofResult<Ring> {
        if key_images.is_empty()
            || commitments.is_empty()
            || key_images.len() > u32::MAX as usize
            || public_keys.len() != key_images.len()
            || public_keys.iter().any(|row| row.len() != commitments.len())
        {
            return Err(ProofError::ShapeMismatch);
        }
        Ok(Ring {
            key_images,
            public_keys,
            commitments,
        })
    }

    /// Number of inputs, `L`.
    pub fn inputs(&self) -> usize {
        self.key_images.len()
    }

    /// Number of ring members, `N`.
    pub fn len(&self) -> usize {
        self.commitments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commitments.is_empty()
    }

    pub fn key_images(&self) -> &[RistrettoPoint] {
        &self.key_images
    }

    pub fn public_keys(&self) -> &[Vec<PairedCommitment>] {
        &self.public_keys
    }

    pub fn commitments(&self) -> &[RistrettoPoint] {
        &self.commitments
    }
}

/// Everything a spend signature is bound to: the ring, the output
/// commitment `co1` and the message.
#[derive(Debug, Clone, Copy)]
pub struct RingStatement<'a> {
    pub ring: &'a Ring,
    pub co1: RistrettoPoint,
    pub message: &'a [u8],
}

/// The reduced ring: one paired commitment per member, and the weight given
/// to each input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction {
    pub commitments: Vec<PairedCommitment>,
    pub weights: Vec<Scalar>,
}

impl<'a> RingStatement<'a> {
    pub fn new(ring: &'a Ring, co1: RistrettoPoint, message: &'a [u8]) -> Self {
        RingStatement { ring, co1, message }
    }

    /// Canonical encoding: key images, public keys row by row, commitments,
    /// `co1`, then the message.
    pub fn to_bytes(&self) -> Vec<u8> {
        let ring = self.ring;
        let mut out = Vec::with_capacity(
            32 * (ring.inputs() + ring.len() + 1)
                + 64 * ring.inputs() * ring.len()
                + self.message.len(),
        );
        for ki in &ring.key_images {
            out.extend_from_slice(ki.compress().as_bytes());
        }
        for pk in ring.public_keys.iter().flatten() {
            out.extend_from_slice(&pk.to_bytes());
        }
        for co in &ring.commitments {
            out.extend_from_slice(co.compress().as_bytes());
        }
        out.extend_from_slice(self.co1.compress().as_bytes());
        out.extend_from_slice(self.message);
        out
    }

    /// Fold the `L` rows of public keys into a single row of paired
    /// commitments:
    ///
    /// `c[i] = (co[i], co1) + sum_j (pk[j][i] - (ki[j], 0)) * f[j]`
    ///
    /// where `f[j]` is a hash of `ki[j]`, the whole statement and `j`. If the
    /// spender owns column `i`, `c[i]` encrypts the identity under
    /// `s + sum_j r_j * f[j]`.
    pub fn reduce(&self) -> Reduction {
        let encoded = self.to_bytes();
        let ring = self.ring;

        let weights = ring
            .key_images
            .iter()
            .enumerate()
            .map(|(j, ki)| {
                let mut transcript = Transcript::new(PROTOCOL_LABEL);
                transcript.input_weight_domain_sep(j as u32);
                transcript.append_point(b"ki", &ki.compress());
                transcript.append_message(b"F", &encoded);
                transcript.challenge_scalar(b"input-weight")
            })
            .collect::<Vec<Scalar>>();

        // Key images as paired commitments, (ki[j], 0)
        let images = ring
            .key_images
            .iter()
            .map(|&ki| PairedCommitment::new(ki, RistrettoPoint::identity()))
            .collect::<Vec<PairedCommitment>>();

        let member = |i: usize| {
            let mut c = PairedCommitment::new(ring.commitments[i], self.co1);
            for ((pk_j, &image), &f) in ring.public_keys.iter().zip(&images).zip(&weights) {
                c += (pk_j[i] - image) * f;
            }
            c
        };

        #[cfg(feature = "parallel")]
        let commitments = (0..ring.len()).into_par_iter().map(member).collect();
        #[cfg(not(feature = "parallel"))]
        let commitments = (0..ring.len()).map(member).collect();

        Reduction {
            commitments,
            weights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gens::PedersenGens;
    use crate::keys::SecretKey;
    use rand::rngs::OsRng;

    fn random_points(n: usize) -> Vec<RistrettoPoint> {
        (0..n).map(|_| RistrettoPoint::random(&mut OsRng)).collect()
    }

    fn random_paired(n: usize) -> Vec<PairedCommitment> {
        (0..n)
            .map(|_| {
                PairedCommitment::new(
                    RistrettoPoint::random(&mut OsRng),
                    RistrettoPoint::random(&mut OsRng),
                )
            })
            .collect()
    }

    #[test]
    fn ring_shapes() {
        assert!(Ring::new(random_points(2), vec![random_paired(4), random_paired(4)], random_points(4)).is_ok());

        // Empty
        assert_eq!(
            Ring::new(vec![], vec![], random_points(4)).unwrap_err(),
            ProofError::ShapeMismatch
        );
        assert_eq!(
            Ring::new(random_points(1), vec![vec![]], vec![]).unwrap_err(),
            ProofError::ShapeMismatch
        );
        // Rows disagree with key images or commitments
        assert_eq!(
            Ring::new(random_points(2), vec![random_paired(4)], random_points(4)).unwrap_err(),
            ProofError::ShapeMismatch
        );
        assert_eq!(
            Ring::new(random_points(2), vec![random_paired(4), random_paired(3)], random_points(4))
                .unwrap_err(),
            ProofError::ShapeMismatch
        );
    }

    #[test]
    fn encoding_layout() {
        let ring = Ring::new(random_points(2), vec![random_paired(3), random_paired(3)], random_points(3)).unwrap();
        let co1 = RistrettoPoint::random(&mut OsRng);
        let bytes = RingStatement::new(&ring, co1, b"msg").to_bytes();

        assert_eq!(bytes.len(), 32 * 2 + 64 * 6 + 32 * 3 + 32 + 3);
        assert_eq!(&bytes[..32], ring.key_images()[0].compress().as_bytes());
        assert_eq!(&bytes[64..128], &ring.public_keys()[0][0].to_bytes()[..]);
        assert_eq!(&bytes[bytes.len() - 35..bytes.len() - 3], co1.compress().as_bytes());
        assert_eq!(&bytes[bytes.len() - 3..], b"msg");
    }

    #[test]
    fn reduces_owned_column_to_zero() {
        let gens = PedersenGens::default();
        let (L, N, l) = (2, 4, 1);
        let sks = (0..L).map(|_| SecretKey::random(&mut OsRng)).collect::<Vec<SecretKey>>();
        let s = Scalar::random(&mut OsRng);

        let mut public_keys = (0..L).map(|_| random_paired(N)).collect::<Vec<_>>();
        for (row, sk) in public_keys.iter_mut().zip(&sks) {
            row[l] = sk.public_key(&gens);
        }
        let mut commitments = random_points(N);
        commitments[l] = s * gens.H;
        let key_images = sks.iter().map(SecretKey::key_image).collect();
        let ring = Ring::new(key_images, public_keys, commitments).unwrap();

        let reduction = RingStatement::new(&ring, s * gens.G, b"message").reduce();
        assert_eq!(reduction.commitments.len(), N);
        assert_eq!(reduction.weights.len(), L);

        let s1 = s + sks
            .iter()
            .zip(&reduction.weights)
            .map(|(sk, f)| sk.r * f)
            .sum::<Scalar>();
        assert_eq!(reduction.commitments[l], gens.encrypt_zero(&s1));
        assert_ne!(reduction.commitments[0], gens.encrypt_zero(&s1));
    }

    #[test]
    fn weights_bind_the_statement() {
        let ring = Ring::new(random_points(2), vec![random_paired(2), random_paired(2)], random_points(2)).unwrap();
        let co1 = RistrettoPoint::random(&mut OsRng);
        let a = RingStatement::new(&ring, co1, b"one").reduce();
        let b = RingStatement::new(&ring, co1, b"two").reduce();
        assert_eq!(a, RingStatement::new(&ring, co1, b"one").reduce());
        assert_ne!(a.weights, b.weights);
        assert_ne!(a.weights[0], a.weights[1]);
    }
}
