//! Coefficients of the per-member polynomials that let a one-of-many proof
//! fold `N` commitments into `exponent` commitments.
//!
//! For ring member `k` with digits `k_j`, the prover's blinding matrix `a`
//! and secret index `l` with digits `l_j`, the verifier will evaluate
//!
//! `p_k(x) = prod_j (a[j][k_j] + delta(l_j, k_j)*x)`
//!
//! at the challenge. The leading coefficient, of `x^exponent`, is one for
//! `k == l` and zero otherwise, so it is implied and trimmed.
use crate::digits::{decompose, delta};
use alloc::vec::Vec;
use curve25519_dalek::scalar::Scalar;
use polynomials::Polynomial;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Computes the trimmed coefficients of `p_k` for every `k` in
/// `0..base^exponent`, where `a` is an `exponent x base` matrix.
pub(crate) fn ring_coefficients(a: &[Vec<Scalar>], l: usize) -> Vec<Vec<Scalar>> {
    let exponent = a.len();
    assert!(exponent > 0, "blinding matrix has no rows");
    let base = a[0].len();
    assert!(
        a.iter().all(|row| row.len() == base),
        "blinding matrix rows differ in length"
    );
    let ring_size = base.pow(exponent as u32);
    assert!(l < ring_size, "secret index lies outside the ring");
    let l_digits = decompose(base, l, exponent);

    let coefficients = |k: usize| {
        let k_digits = decompose(base, k, exponent);
        let p_k = member_polynomial(&k_digits, &l_digits, a);
        trim_implied(p_k, exponent, delta(k, l))
    };

    #[cfg(feature = "parallel")]
    let coefs = (0..ring_size).into_par_iter().map(coefficients).collect();
    #[cfg(not(feature = "parallel"))]
    let coefs = (0..ring_size).map(coefficients).collect();

    coefs
}

/// Multiplies out `prod_j (a[j][k_j] + delta(l_j, k_j)*X)`, one row at a
/// time. The result has at least `exponent + 1` coefficients, lowest degree
/// first.
pub(crate) fn member_polynomial(
    k_digits: &[usize],
    l_digits: &[usize],
    a: &[Vec<Scalar>],
) -> Vec<Scalar> {
    let exponent = a.len();
    let mut p = Polynomial::from(Vec::with_capacity(exponent + 1));
    p.push(Scalar::one());

    for j in 0..exponent {
        let mut f = Polynomial::new();
        f.push(a[j][k_digits[j]]);
        f.push(delta(l_digits[j], k_digits[j]));
        p *= f;
    }

    let mut v: Vec<Scalar> = p.into();
    if v.len() < exponent + 1 {
        v.resize(exponent + 1, Scalar::zero());
    }
    v
}

/// Drops every coefficient from index `len` upwards, after asserting that
/// the one at `len` equals `implied` and all higher ones are zero. Any
/// other value means the polynomial was built from inconsistent inputs.
fn trim_implied(mut coefs: Vec<Scalar>, len: usize, implied: Scalar) -> Vec<Scalar> {
    for (i, c) in coefs.iter().enumerate().skip(len) {
        if i == len {
            assert!(
                *c == implied,
                "attempt to trim coefficient {} which differs from its implied value",
                i
            );
        } else {
            assert!(*c == Scalar::zero(), "attempt to trim non-zero coefficient {}", i);
        }
    }
    coefs.truncate(len);
    coefs
}
