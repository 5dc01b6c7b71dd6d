//! Simple n-ary decomposition utilities
use alloc::vec::Vec;
use curve25519_dalek::scalar::Scalar;

/// Decompose `v` into `exponent` base-`base` digits, least significant
/// digit first. Digits beyond `exponent` are discarded, so callers must check
/// `v < base^exponent` themselves.
pub(crate) fn decompose(base: usize, v: usize, exponent: usize) -> Vec<usize> {
    let mut rem = v;
    let mut digits = Vec::with_capacity(exponent);
    for _ in 0..exponent {
        digits.push(rem % base);
        rem /= base;
    }
    digits
}

/// The one-hot matrix of the digits of `v`: row `j` holds a single one, in
/// column `digit(v, j)`.
pub(crate) fn one_hot_matrix(base: usize, v: usize, exponent: usize) -> Vec<Vec<Scalar>> {
    decompose(base, v, exponent)
        .into_iter()
        .map(|digit| (0..base).map(|i| delta(digit, i)).collect())
        .collect()
}

pub(crate) fn delta(a: usize, b: usize) -> Scalar {
    if a == b {
        Scalar::one()
    } else {
        Scalar::zero()
    }
}
