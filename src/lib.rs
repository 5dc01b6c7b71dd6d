//! Linkable ring signatures built on the
//! [One-out-of-Many](https://eprint.iacr.org/2014/764) proofs of Groth and
//! Kohlweiss, generalized to n-ary digits by Bootle et al. and made linkable
//! with key images as in Ruffing's RingCT 3.0.
//!
//! A ring has `N = base^exponent` members. A spender owns one column of the
//! ring: a public key per input, each an encryption of the input's key
//! image, and a commitment that opens to zero after the spent amount is
//! moved to a new output. The signature proves ownership of some column
//! without revealing which, and signs with every key image so that spending
//! the same key twice can be detected.
//!
//! # Examples
//! Spend two inputs from a ring of `3^2 = 9` members:
//! ```
//! # use rand::rngs::OsRng; // You should use a more secure RNG
//! # use bootle_ruffing::gens::ProofGens;
//! # use bootle_ruffing::keys::Output;
//! # use bootle_ruffing::spend::{spend, SpendSignature};
//! # use bootle_ruffing::statement::Ring;
//! #
//! // Set up proof generators for rings of 3^2 members
//! let gens = ProofGens::new(3, 2).unwrap();
//!
//! // Every column of the ring holds two outputs
//! let columns = (0..gens.ring_size())
//!     .map(|_| {
//!         vec![
//!             Output::random(30, &gens.pedersen, &mut OsRng),
//!             Output::random(12, &gens.pedersen, &mut OsRng),
//!         ]
//!     })
//!     .collect::<Vec<Vec<Output>>>();
//!
//! // The signer owns column `l`, and moves its first amount to a new output
//! let l: usize = 4;
//! let new = Output::random(30, &gens.pedersen, &mut OsRng);
//! let s = columns[l][0].mask - new.mask;
//!
//! let ring = Ring::new(
//!     columns[l].iter().map(|o| o.ki).collect(),
//!     (0..2)
//!         .map(|j| columns.iter().map(|col| col[j].pk).collect())
//!         .collect(),
//!     columns.iter().map(|col| col[0].co - new.co).collect(),
//! )
//! .unwrap();
//!
//! // Sign a message anonymously
//! let keys = columns[l].iter().map(|o| o.sk.clone()).collect::<Vec<_>>();
//! let sig = spend(&gens, &ring, b"Hello, World!", &keys, l, &s, &mut OsRng).unwrap();
//!
//! // Anyone holding the ring can verify the signature, without learning `l`
//! let sig = SpendSignature::from_bytes(&sig.to_bytes()).unwrap();
//! assert!(sig.verify(&ring, b"Hello, World!").is_ok());
//! assert!(sig.verify(&ring, b"Goodbye, World!").is_err());
//! ```
//!
//! The underlying membership proof can also be used directly, see
//! [`proofs::OneOfManyProofs`].
//!
//! # Performance
//! The proof(s) provided by this crate depend heavily on the
//! [curve25519-dalek](https://docs.rs/curve25519-dalek) for elliptic curve operations on the
//! ristretto255 curve group. The `parallel` feature spreads the per-member work of proving,
//! verifying and ring reduction over a [rayon](https://docs.rs/rayon) thread pool.
//!
//! Benchmarks are run using [criterion.rs](https://docs.rs/criterion):
//! ```bash
//! cargo bench
//! ```
//!
//! # References
//! * [One-out-of-Many Proofs: Or How to Leak a Secret and Spend a Coin](https://eprint.iacr.org/2014/764)
//! * [Short Accountable Ring Signatures Based on DDH](https://eprint.iacr.org/2015/643)
//! * [RingCT 3.0 for Blockchain Confidential Transaction](https://eprint.iacr.org/2019/508)
//! * [Simple Schnorr Multi-Signatures with Applications to Bitcoin](https://eprint.iacr.org/2018/068)

#![no_std]

//-----------------------------------------------------------------------------
// External dependencies:
//-----------------------------------------------------------------------------
extern crate curve25519_dalek;
extern crate polynomials;

#[cfg_attr(test, macro_use)]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

//-----------------------------------------------------------------------------
// Public modules
//-----------------------------------------------------------------------------
pub mod commitment;
pub mod errors;
pub mod gens;
pub mod keys;
pub mod multisig;
pub mod proofs;
pub mod spend;
pub mod statement;

//-----------------------------------------------------------------------------
// Internal modules
//-----------------------------------------------------------------------------
pub(crate) mod coefficients;
pub(crate) mod digits;
pub(crate) mod encoding;
pub(crate) mod transcript;
