#![allow(non_snake_case)]
use crate::coefficients::ring_coefficients;
use crate::commitment::{CompressedPairedCommitment, PairedCommitment};
use crate::digits::{decompose, one_hot_matrix};
use crate::encoding::ByteCursor;
use crate::errors::{ProofError, ProofResult, Rejection};
use crate::gens::ProofGens;
use crate::transcript::{TranscriptProtocol, PROTOCOL_LABEL};
use alloc::vec::Vec;
use curve25519_dalek::ristretto::CompressedRistretto;
use curve25519_dalek::scalar::Scalar;
use merlin::Transcript;
use polynomials::Polynomial;
use rand::{CryptoRng, RngCore};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A digit commitment proof. This is used as part of a [`OneOfManyProof`]
/// and not meant for use on its own. A zero knowledge proof that the prover
/// knows the opening of a commitment `B` to an `exponent x base` matrix which
/// holds exactly one `1` in every row, and zeros elsewhere.
///
/// The first response of every row is implied by the others and the
/// challenge, so it is not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DigitProof {
    A: CompressedRistretto,
    C: CompressedRistretto,
    D: CompressedRistretto,
    f_trimmed: Vec<Vec<Scalar>>,
    z_A: Scalar,
    z_C: Scalar,
}

/// Prover-only blinding data for a [`DigitProof`]. It is drawn before the
/// challenge and never leaves the prover.
pub(crate) struct DigitWitness {
    /// The blinding matrix; every row sums to zero.
    pub(crate) a: Vec<Vec<Scalar>>,
    r_A: Scalar,
    r_C: Scalar,
    r_D: Scalar,
}

impl DigitWitness {
    pub(crate) fn random<R>(base: usize, exponent: usize, rng: &mut R) -> DigitWitness
    where
        R: RngCore + CryptoRng,
    {
        let a = (0..exponent)
            .map(|_| {
                let mut a_j = Vec::with_capacity(base);
                a_j.push(Scalar::zero());
                a_j.extend((1..base).map(|_| Scalar::random(rng)));
                a_j[0] = -a_j[1..].iter().sum::<Scalar>();
                a_j
            })
            .collect();

        DigitWitness {
            a,
            r_A: Scalar::random(rng),
            r_C: Scalar::random(rng),
            r_D: Scalar::random(rng),
        }
    }
}

/// A zero knowledge proof of membership in a set. A prover can convince a
/// verifier that it knows the index of a paired commitment to zero within a
/// set of paired commitments, and its opening, without revealing any
/// information about the commitment or its location within the set.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OneOfManyProof {
    B: CompressedRistretto,
    digit_proof: DigitProof,
    G_k: Vec<CompressedPairedCommitment>,
    z: Scalar,
}

impl ProofGens {
    /// Commit to the one-hot `exponent x base` matrix `b` with blinding
    /// factor `r_B`, and prove that the commitment `B = COMb(b; r_B)` opens
    /// to such a matrix.
    ///
    /// Everything appended to `transcript` beforehand is bound into the
    /// challenge. This function returns `B`, the [`DigitProof`] and the
    /// challenge scalar `x`.
    pub(crate) fn commit_digits(
        &self,
        transcript: &mut Transcript,
        b: &[Vec<Scalar>],
        r_B: &Scalar,
        witness: &DigitWitness,
    ) -> ProofResult<(CompressedRistretto, DigitProof, Scalar)> {
        if b.len() != self.exponent || b.iter().any(|row| row.len() != self.base) {
            return Err(ProofError::ShapeMismatch);
        }
        let a = &witness.a;

        transcript.digit_proof_domain_sep(self.base as u64, self.exponent as u64);

        let c = a
            .iter()
            .zip(b)
            .map(|(a_j, b_j)| {
                a_j.iter()
                    .zip(b_j)
                    .map(|(a, b)| a * (Scalar::one() - Scalar::from(2u32) * b))
                    .collect()
            })
            .collect::<Vec<Vec<Scalar>>>();
        let d = a
            .iter()
            .map(|a_j| a_j.iter().map(|a| -(a * a)).collect())
            .collect::<Vec<Vec<Scalar>>>();

        let B = self.commit_matrix(b, r_B)?.compress();
        let A = self.commit_matrix(a, &witness.r_A)?.compress();
        let C = self.commit_matrix(&c, &witness.r_C)?.compress();
        let D = self.commit_matrix(&d, &witness.r_D)?.compress();

        transcript.append_point(b"B", &B);
        transcript.append_point(b"A", &A);
        transcript.append_point(b"C", &C);
        transcript.append_point(b"D", &D);

        let x = transcript.challenge_scalar(b"digit-proof-challenge");

        // Column 0 is recomputed by the verifier from the row sum
        let f_trimmed = a
            .iter()
            .zip(b)
            .map(|(a_j, b_j)| {
                a_j.iter()
                    .zip(b_j)
                    .skip(1)
                    .map(|(a, b)| b * x + a)
                    .collect()
            })
            .collect();
        let z_A = r_B * x + witness.r_A;
        let z_C = witness.r_C * x + witness.r_D;

        Ok((
            B,
            DigitProof {
                A,
                C,
                D,
                f_trimmed,
                z_A,
                z_C,
            },
            x,
        ))
    }

    /// Verify a digit commitment proof against the commitment `B`, with a
    /// transcript in the same state as the prover's.
    ///
    /// On success this returns the challenge `x` and the full response
    /// matrix `f`, including the reconstructed first column.
    pub(crate) fn verify_digits(
        &self,
        transcript: &mut Transcript,
        B: &CompressedRistretto,
        proof: &DigitProof,
    ) -> ProofResult<(Scalar, Vec<Vec<Scalar>>)> {
        // Verify proof size
        if proof.f_trimmed.len() != self.exponent
            || proof.f_trimmed.iter().any(|f_j| f_j.len() != self.base - 1)
        {
            return Err(ProofError::rejected(Rejection::MalformedProof));
        }

        // Verify all scalars are canonical
        if proof.f_trimmed.iter().flatten().any(|f| !f.is_canonical())
            || !proof.z_A.is_canonical()
            || !proof.z_C.is_canonical()
        {
            return Err(ProofError::rejected(Rejection::MalformedProof));
        }

        transcript.digit_proof_domain_sep(self.base as u64, self.exponent as u64);
        let B = transcript.validate_and_append_point(b"B", B)?;
        let A = transcript.validate_and_append_point(b"A", &proof.A)?;
        let C = transcript.validate_and_append_point(b"C", &proof.C)?;
        let D = transcript.validate_and_append_point(b"D", &proof.D)?;

        let x = transcript.challenge_scalar(b"digit-proof-challenge");

        let f = proof.inflate_responses(&x);

        // Verify relation x*B + A == COMb(f; z_A)
        if x * B + A != self.commit_matrix(&f, &proof.z_A)? {
            return Err(ProofError::rejected(Rejection::DigitCommitment));
        }

        // Verify relation x*C + D == COMb(f*(x - f); z_C)
        let f1 = f
            .iter()
            .map(|f_j| f_j.iter().map(|f| f * (x - f)).collect())
            .collect::<Vec<Vec<Scalar>>>();
        if x * C + D != self.commit_matrix(&f1, &proof.z_C)? {
            return Err(ProofError::rejected(Rejection::DigitSquare));
        }

        Ok((x, f))
    }
}

impl DigitProof {
    /// Rebuild the full response matrix from the trimmed one, using the
    /// fact that every row sums to the challenge:
    /// `f[j][0] = x - f[j][1] - ... - f[j][base-1]`.
    pub(crate) fn inflate_responses(&self, x: &Scalar) -> Vec<Vec<Scalar>> {
        self.f_trimmed
            .iter()
            .map(|f_j| {
                let mut row = Vec::with_capacity(f_j.len() + 1);
                row.push(x - f_j.iter().sum::<Scalar>());
                row.extend_from_slice(f_j);
                row
            })
            .collect()
    }

    pub(crate) fn write_bytes(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.A.as_bytes());
        out.extend_from_slice(self.C.as_bytes());
        out.extend_from_slice(self.D.as_bytes());
        for f in self.f_trimmed.iter().flatten() {
            out.extend_from_slice(f.as_bytes());
        }
        out.extend_from_slice(self.z_A.as_bytes());
        out.extend_from_slice(self.z_C.as_bytes());
    }

    pub(crate) fn read_bytes(
        cursor: &mut ByteCursor<'_>,
        base: usize,
        exponent: usize,
    ) -> ProofResult<DigitProof> {
        let A = cursor.read_point()?;
        let C = cursor.read_point()?;
        let D = cursor.read_point()?;
        let f_trimmed = cursor.read_scalar_matrix(exponent, base - 1)?;
        let z_A = cursor.read_scalar()?;
        let z_C = cursor.read_scalar()?;
        Ok(DigitProof {
            A,
            C,
            D,
            f_trimmed,
            z_A,
            z_C,
        })
    }
}

impl OneOfManyProof {
    /// Canonical encoding: the digit proof, `B`, `G_k` and `z`, in that
    /// order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_bytes(&mut out);
        out
    }

    pub(crate) fn write_bytes(&self, out: &mut Vec<u8>) {
        self.digit_proof.write_bytes(out);
        out.extend_from_slice(self.B.as_bytes());
        for g in &self.G_k {
            out.extend_from_slice(&g.to_bytes());
        }
        out.extend_from_slice(self.z.as_bytes());
    }

    pub(crate) fn read_bytes(
        cursor: &mut ByteCursor<'_>,
        base: usize,
        exponent: usize,
    ) -> ProofResult<OneOfManyProof> {
        let digit_proof = DigitProof::read_bytes(cursor, base, exponent)?;
        let B = cursor.read_point()?;
        let mut G_k = Vec::new();
        for _ in 0..exponent {
            G_k.push(cursor.read_paired_commitment()?);
        }
        let z = cursor.read_scalar()?;
        Ok(OneOfManyProof {
            B,
            digit_proof,
            G_k,
            z,
        })
    }
}

pub trait OneOfManyProofs {
    //! Trait for computing and verifying OneOfMany zero-knowledge membership
    //! proofs over a set of [`PairedCommitment`]s. A prover should know the
    //! index of a commitment to zero within the set, and the randomness it
    //! was encrypted under.
    //!
    //! ```
    //! # use rand::rngs::OsRng;
    //! # use bootle_ruffing::commitment::PairedCommitment;
    //! # use bootle_ruffing::gens::ProofGens;
    //! # use bootle_ruffing::proofs::OneOfManyProofs;
    //! # use curve25519_dalek::scalar::Scalar;
    //! # use curve25519_dalek::ristretto::RistrettoPoint;
    //! #
    //! // Set up proof generators for sets of 2^3 = 8 members
    //! let gens = ProofGens::new(2, 3).unwrap();
    //!
    //! // Create the prover's commitment to zero
    //! let l: usize = 5; // The prover's commitment will be sixth in the set
    //! let r = Scalar::random(&mut OsRng);
    //! let C_l = gens.pedersen.encrypt_zero(&r);
    //!
    //! // Build a random set containing the prover's commitment at index `l`
    //! let mut set = (1..gens.ring_size())
    //!     .map(|_| {
    //!         PairedCommitment::new(
    //!             RistrettoPoint::random(&mut OsRng),
    //!             RistrettoPoint::random(&mut OsRng),
    //!         )
    //!     })
    //!     .collect::<Vec<PairedCommitment>>();
    //! set.insert(l, C_l);
    //!
    //! // Compute a `OneOfMany` membership proof for this commitment
    //! let proof = set.prove(&gens, l, &r, &mut OsRng).unwrap();
    //!
    //! // Verify this membership proof, without any knowledge of `l` or `r`.
    //! assert!(set.verify(&gens, &proof).is_ok());
    //! ```

    /// Prove knowledge of a commitment to zero. The prover must provide the
    /// index `l` of a commitment within the set that encrypts the identity,
    /// and also its randomness, `r`.
    fn prove<R>(
        &self,
        gens: &ProofGens,
        l: usize,
        r: &Scalar,
        rng: &mut R,
    ) -> ProofResult<OneOfManyProof>
    where
        R: RngCore + CryptoRng;

    /// Verify a proof of knowledge of a commitment to zero. This
    /// verification will only succeed if the proven commitment encrypts the
    /// identity.
    fn verify(&self, gens: &ProofGens, proof: &OneOfManyProof) -> ProofResult<()>;
}

impl OneOfManyProofs for [PairedCommitment] {
    fn prove<R>(
        &self,
        gens: &ProofGens,
        l: usize,
        r: &Scalar,
        rng: &mut R,
    ) -> ProofResult<OneOfManyProof>
    where
        R: RngCore + CryptoRng,
    {
        let ring_size = gens.ring_size();
        if l >= ring_size {
            return Err(ProofError::IndexOutOfBounds);
        }
        check_set_size(self.len(), ring_size)?;

        let mut transcript = Transcript::new(PROTOCOL_LABEL);
        transcript.one_of_many_proof_domain_sep(gens.base as u64, gens.exponent as u64);

        // Create a `TranscriptRng` from the high-level witness data
        //
        // The prover wants to rekey the RNG with its witness data (`l` and `r`).
        let mut rng = {
            let mut builder = transcript.build_rng();

            // Commit to witness data
            builder = builder.rekey_with_witness_bytes(b"l", Scalar::from(l as u64).as_bytes());
            builder = builder.rekey_with_witness_bytes(b"r", r.as_bytes());

            builder.finalize(rng)
        };

        let u_k = (0..gens.exponent)
            .map(|_| Scalar::random(&mut rng))
            .collect::<Vec<Scalar>>();
        let r_B = Scalar::random(&mut rng);
        let witness = DigitWitness::random(gens.base, gens.exponent, &mut rng);

        // Fold the set into `exponent` commitments:
        // G_k = ENC(0; u_k) + sum(C_i * p_i[k])
        let coefs = ring_coefficients(&witness.a, l);
        let mut G_k = u_k
            .iter()
            .map(|u| gens.pedersen.encrypt_zero(u))
            .collect::<Vec<PairedCommitment>>();
        for (&C_i, p_i) in self.iter().zip(coefs.iter()) {
            for (G, &p) in G_k.iter_mut().zip(p_i.iter()) {
                *G += C_i * p;
            }
        }
        let G_k = G_k
            .iter()
            .map(PairedCommitment::compress)
            .collect::<Vec<CompressedPairedCommitment>>();
        for G in &G_k {
            transcript.append_paired_commitment(b"G_k", G);
        }

        // The one-of-many proof shares its challenge with the digit proof
        let d = one_hot_matrix(gens.base, l, gens.exponent);
        let (B, digit_proof, x) = gens.commit_digits(&mut transcript, &d, &r_B, &witness)?;

        let u_x = Polynomial::from(u_k)
            .eval(x)
            .ok_or(ProofError::SetIsTooSmall)?;
        let z = r * scalar_exp(x, gens.exponent) - u_x;

        Ok(OneOfManyProof {
            B,
            digit_proof,
            G_k,
            z,
        })
    }

    fn verify(&self, gens: &ProofGens, proof: &OneOfManyProof) -> ProofResult<()> {
        check_set_size(self.len(), gens.ring_size())?;

        if proof.G_k.len() != gens.exponent {
            return Err(ProofError::rejected(Rejection::MalformedProof));
        }
        if !proof.z.is_canonical() {
            return Err(ProofError::rejected(Rejection::MalformedProof));
        }

        let mut transcript = Transcript::new(PROTOCOL_LABEL);
        transcript.one_of_many_proof_domain_sep(gens.base as u64, gens.exponent as u64);
        let G_k = proof
            .G_k
            .iter()
            .map(|G| transcript.validate_and_append_paired_commitment(b"G_k", G))
            .collect::<ProofResult<Vec<PairedCommitment>>>()?;

        let (x, f) = gens.verify_digits(&mut transcript, &proof.B, &proof.digit_proof)?;

        // Each member is weighted by prod_j f[j][i_j], which is the
        // prover's polynomial p_i evaluated at x.
        let weighted = |(i, &C_i): (usize, &PairedCommitment)| {
            let p_i = decompose(gens.base, i, gens.exponent)
                .into_iter()
                .zip(f.iter())
                .map(|(i_j, f_j)| f_j[i_j])
                .product::<Scalar>();
            C_i * p_i
        };

        #[cfg(feature = "parallel")]
        let C = self
            .par_iter()
            .enumerate()
            .map(weighted)
            .reduce(PairedCommitment::identity, |a, b| a + b);
        #[cfg(not(feature = "parallel"))]
        let C = self
            .iter()
            .enumerate()
            .map(weighted)
            .sum::<PairedCommitment>();

        let G = Polynomial::from(G_k)
            .eval(x)
            .ok_or_else(|| ProofError::rejected(Rejection::MalformedProof))?;
        let E = gens.pedersen.encrypt_zero(&proof.z);

        if C - G != E {
            return Err(ProofError::rejected(Rejection::RingRelation));
        }

        Ok(())
    }
}

fn check_set_size(len: usize, ring_size: usize) -> ProofResult<()> {
    if len < ring_size {
        Err(ProofError::SetIsTooSmall)
    } else if len > ring_size {
        Err(ProofError::SetIsTooLarge)
    } else {
        Ok(())
    }
}

fn scalar_exp(base: Scalar, exp: usize) -> Scalar {
    let mut res = Scalar::one();
    for _ in 0..exp {
        res *= base;
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve25519_dalek::ristretto::RistrettoPoint;
    use rand::rngs::OsRng;

    fn random_set(gens: &ProofGens, l: usize, r: &Scalar) -> Vec<PairedCommitment> {
        let mut set = (1..gens.ring_size())
            .map(|_| {
                PairedCommitment::new(
                    RistrettoPoint::random(&mut OsRng),
                    RistrettoPoint::random(&mut OsRng),
                )
            })
            .collect::<Vec<PairedCommitment>>();
        set.insert(l, gens.pedersen.encrypt_zero(r));
        set
    }

    fn digit_transcript() -> Transcript {
        Transcript::new(b"digit-proof-test")
    }

    #[test]
    fn digit_commitments() {
        let gens = ProofGens::new(4, 3).unwrap();
        let l = 45;
        let b = one_hot_matrix(gens.base, l, gens.exponent);
        let r_B = Scalar::random(&mut OsRng);
        let witness = DigitWitness::random(gens.base, gens.exponent, &mut OsRng);
        assert!(witness
            .a
            .iter()
            .all(|a_j| a_j.iter().sum::<Scalar>() == Scalar::zero()));

        let (B, proof, x) = gens
            .commit_digits(&mut digit_transcript(), &b, &r_B, &witness)
            .unwrap();
        assert_eq!(B, gens.commit_matrix(&b, &r_B).unwrap().compress());

        let (x_v, f) = gens
            .verify_digits(&mut digit_transcript(), &B, &proof)
            .unwrap();
        assert_eq!(x, x_v);
        assert_eq!(f.len(), gens.exponent);

        // Wrong commitment
        let other = gens.commit_matrix(&b, &Scalar::random(&mut OsRng)).unwrap();
        assert_eq!(
            gens.verify_digits(&mut digit_transcript(), &other.compress(), &proof)
                .unwrap_err(),
            ProofError::Rejected(Rejection::DigitCommitment)
        );

        // Transcript in a different state
        let mut t = digit_transcript();
        t.append_message(b"extra", b"data");
        assert!(gens.verify_digits(&mut t, &B, &proof).is_err());

        // Wrong shape
        let short = one_hot_matrix(gens.base, l, gens.exponent - 1);
        assert_eq!(
            gens.commit_digits(&mut digit_transcript(), &short, &r_B, &witness)
                .unwrap_err(),
            ProofError::ShapeMismatch
        );
    }

    #[test]
    fn row_sums_reconstruct() {
        let gens = ProofGens::new(3, 4).unwrap();
        let b = one_hot_matrix(gens.base, 70, gens.exponent);
        let r_B = Scalar::random(&mut OsRng);
        let witness = DigitWitness::random(gens.base, gens.exponent, &mut OsRng);
        let (_, proof, x) = gens
            .commit_digits(&mut digit_transcript(), &b, &r_B, &witness)
            .unwrap();

        let f = proof.inflate_responses(&x);
        for (f_j, trimmed_j) in f.iter().zip(proof.f_trimmed.iter()) {
            assert_eq!(f_j.len(), gens.base);
            assert_eq!(&f_j[1..], &trimmed_j[..]);
            assert_eq!(f_j[0], x - trimmed_j.iter().sum::<Scalar>());
            assert_eq!(f_j.iter().sum::<Scalar>(), x);
        }
    }

    #[test]
    fn rejects_non_binary_matrix() {
        // A row with two ones is not a valid digit decomposition
        let gens = ProofGens::new(2, 2).unwrap();
        let b = vec![
            vec![Scalar::one(), Scalar::one()],
            vec![Scalar::one(), Scalar::zero()],
        ];
        let r_B = Scalar::random(&mut OsRng);
        let witness = DigitWitness::random(gens.base, gens.exponent, &mut OsRng);
        let (B, proof, _) = gens
            .commit_digits(&mut digit_transcript(), &b, &r_B, &witness)
            .unwrap();
        assert!(gens
            .verify_digits(&mut digit_transcript(), &B, &proof)
            .is_err());
    }

    #[test]
    fn rejects_folded_commitments_chosen_after_challenge() {
        // Nobody knows an opening of any member of this set. Compute an
        // honest digit proof for index 0, then solve for G_0 from the
        // challenge so the ring relation holds for a random z.
        let gens = ProofGens::new(2, 3).unwrap();
        let set = (0..gens.ring_size())
            .map(|_| {
                PairedCommitment::new(
                    RistrettoPoint::random(&mut OsRng),
                    RistrettoPoint::random(&mut OsRng),
                )
            })
            .collect::<Vec<PairedCommitment>>();

        let mut G_k = (0..gens.exponent)
            .map(|_| {
                PairedCommitment::new(
                    RistrettoPoint::random(&mut OsRng),
                    RistrettoPoint::random(&mut OsRng),
                )
                .compress()
            })
            .collect::<Vec<CompressedPairedCommitment>>();

        let mut transcript = Transcript::new(PROTOCOL_LABEL);
        transcript.one_of_many_proof_domain_sep(gens.base as u64, gens.exponent as u64);
        for G in &G_k {
            transcript.append_paired_commitment(b"G_k", G);
        }
        let d = one_hot_matrix(gens.base, 0, gens.exponent);
        let r_B = Scalar::random(&mut OsRng);
        let witness = DigitWitness::random(gens.base, gens.exponent, &mut OsRng);
        let (B, digit_proof, x) = gens
            .commit_digits(&mut transcript, &d, &r_B, &witness)
            .unwrap();

        let f = digit_proof.inflate_responses(&x);
        let C = set
            .iter()
            .enumerate()
            .map(|(i, &C_i)| {
                let p_i = decompose(gens.base, i, gens.exponent)
                    .into_iter()
                    .zip(f.iter())
                    .map(|(i_j, f_j)| f_j[i_j])
                    .product::<Scalar>();
                C_i * p_i
            })
            .sum::<PairedCommitment>();
        let z = Scalar::random(&mut OsRng);
        let mut x_t = Scalar::one();
        let mut G_0 = C - gens.pedersen.encrypt_zero(&z);
        for G in &G_k[1..] {
            x_t *= x;
            G_0 = G_0 - G.decompress().unwrap() * x_t;
        }
        G_k[0] = G_0.compress();

        let forged = OneOfManyProof {
            B,
            digit_proof,
            G_k,
            z,
        };

        // The relation holds at the challenge the forger saw
        let G = forged
            .G_k
            .iter()
            .rev()
            .fold(PairedCommitment::identity(), |acc, G| {
                acc * x + G.decompress().unwrap()
            });
        assert_eq!(C - G, gens.pedersen.encrypt_zero(&z));

        // But G_0 is bound into the challenge, so the verifier's differs
        assert!(set.verify(&gens, &forged).is_err());
    }

    #[test]
    fn prove_single() {
        let gens = ProofGens::new(2, 3).unwrap();
        let l: usize = 5;
        let r = Scalar::random(&mut OsRng);
        let mut set = random_set(&gens, l, &r);

        let proof = set.prove(&gens, l, &r, &mut OsRng).unwrap();
        assert!(set.verify(&gens, &proof).is_ok());

        // Check error if index out of bounds
        assert_eq!(
            set.prove(&gens, gens.ring_size(), &r, &mut OsRng)
                .unwrap_err(),
            ProofError::IndexOutOfBounds
        );

        // Wrong index or wrong randomness
        assert_eq!(
            set.verify(&gens, &set.prove(&gens, 4, &r, &mut OsRng).unwrap())
                .unwrap_err(),
            ProofError::Rejected(Rejection::RingRelation)
        );
        let wrong_r = r + Scalar::one();
        assert_eq!(
            set.verify(&gens, &set.prove(&gens, l, &wrong_r, &mut OsRng).unwrap())
                .unwrap_err(),
            ProofError::Rejected(Rejection::RingRelation)
        );

        // Prove should fail if set too small or too large
        let removed = set.pop().unwrap();
        assert_eq!(
            set.prove(&gens, l, &r, &mut OsRng).unwrap_err(),
            ProofError::SetIsTooSmall
        );
        assert_eq!(
            set.verify(&gens, &proof).unwrap_err(),
            ProofError::SetIsTooSmall
        );
        set.push(removed);
        set.push(removed);
        assert_eq!(
            set.prove(&gens, l, &r, &mut OsRng).unwrap_err(),
            ProofError::SetIsTooLarge
        );
        set.pop();

        // Verify should fail if a member has been replaced
        set[l] = gens.pedersen.encrypt_zero(&Scalar::random(&mut OsRng));
        assert_eq!(
            set.verify(&gens, &proof).unwrap_err(),
            ProofError::Rejected(Rejection::RingRelation)
        );
    }

    #[test]
    fn prove_every_index() {
        let gens = ProofGens::new(3, 2).unwrap();
        for l in 0..gens.ring_size() {
            let r = Scalar::random(&mut OsRng);
            let set = random_set(&gens, l, &r);
            let proof = set.prove(&gens, l, &r, &mut OsRng).unwrap();
            assert!(set.verify(&gens, &proof).is_ok());
        }
    }

    #[test]
    fn fresh_randomness() {
        let gens = ProofGens::new(2, 2).unwrap();
        let r = Scalar::random(&mut OsRng);
        let set = random_set(&gens, 1, &r);
        let p1 = set.prove(&gens, 1, &r, &mut OsRng).unwrap();
        let p2 = set.prove(&gens, 1, &r, &mut OsRng).unwrap();
        assert_ne!(p1, p2);
        assert_ne!(p1.digit_proof.A, p2.digit_proof.A);
    }

    #[test]
    fn tampered_proofs() {
        let gens = ProofGens::new(2, 3).unwrap();
        let l = 2;
        let r = Scalar::random(&mut OsRng);
        let set = random_set(&gens, l, &r);
        let proof = set.prove(&gens, l, &r, &mut OsRng).unwrap();

        let mut bad = proof.clone();
        bad.z += Scalar::one();
        assert_eq!(
            set.verify(&gens, &bad).unwrap_err(),
            ProofError::Rejected(Rejection::RingRelation)
        );

        let mut bad = proof.clone();
        bad.digit_proof.f_trimmed[1][0] += Scalar::one();
        assert!(set.verify(&gens, &bad).is_err());

        let mut bad = proof.clone();
        bad.digit_proof.z_C += Scalar::one();
        assert_eq!(
            set.verify(&gens, &bad).unwrap_err(),
            ProofError::Rejected(Rejection::DigitSquare)
        );

        let mut bad = proof.clone();
        bad.z = Scalar::from_bits([0xffu8; 32]);
        assert_eq!(
            set.verify(&gens, &bad).unwrap_err(),
            ProofError::Rejected(Rejection::MalformedProof)
        );

        let mut bad = proof.clone();
        bad.digit_proof.z_A = Scalar::from_bits([0xffu8; 32]);
        assert_eq!(
            set.verify(&gens, &bad).unwrap_err(),
            ProofError::Rejected(Rejection::MalformedProof)
        );

        let mut bad = proof.clone();
        bad.G_k.swap(0, 1);
        assert!(set.verify(&gens, &bad).is_err());

        let mut bad = proof.clone();
        bad.G_k.pop();
        assert_eq!(
            set.verify(&gens, &bad).unwrap_err(),
            ProofError::Rejected(Rejection::MalformedProof)
        );

        let mut bad = proof.clone();
        bad.digit_proof.f_trimmed[0].push(Scalar::one());
        assert_eq!(
            set.verify(&gens, &bad).unwrap_err(),
            ProofError::Rejected(Rejection::MalformedProof)
        );

        let mut bad = proof.clone();
        bad.B = CompressedRistretto([0xffu8; 32]);
        assert_eq!(
            set.verify(&gens, &bad).unwrap_err(),
            ProofError::Rejected(Rejection::InvalidPoint)
        );

        let mut bad = proof;
        bad.G_k[0].P2 = CompressedRistretto([0xffu8; 32]);
        assert_eq!(
            set.verify(&gens, &bad).unwrap_err(),
            ProofError::Rejected(Rejection::InvalidPoint)
        );
    }

    #[test]
    fn byte_encoding() {
        let gens = ProofGens::new(3, 2).unwrap();
        let l = 7;
        let r = Scalar::random(&mut OsRng);
        let set = random_set(&gens, l, &r);
        let proof = set.prove(&gens, l, &r, &mut OsRng).unwrap();

        let bytes = proof.to_bytes();
        // A, C, D, 2x2 responses, z_A, z_C, B, 2 paired commitments, z
        assert_eq!(bytes.len(), 32 * 3 + 32 * 4 + 32 * 2 + 32 + 64 * 2 + 32);

        let mut cursor = ByteCursor::new(&bytes);
        let decoded = OneOfManyProof::read_bytes(&mut cursor, gens.base, gens.exponent).unwrap();
        assert!(cursor.finish().is_ok());
        assert_eq!(decoded, proof);
        assert!(set.verify(&gens, &decoded).is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde() {
        let gens = ProofGens::new(2, 4).unwrap();
        let l = 9;
        let r = Scalar::random(&mut OsRng);
        let set = random_set(&gens, l, &r);

        let proofs = (0..4)
            .map(|_| set.prove(&gens, l, &r, &mut OsRng).unwrap())
            .collect::<Vec<OneOfManyProof>>();
        let serialized = serde_cbor::to_vec(&proofs).unwrap();
        let proofs: Vec<OneOfManyProof> = serde_cbor::from_slice(&serialized[..]).unwrap();
        for proof in &proofs {
            assert!(set.verify(&gens, proof).is_ok());
        }
    }
}
