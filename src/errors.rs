//! Errors which can occur while building, encoding or verifying proofs.
use core::fmt;

/// Identifies the check that caused a proof or signature to be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A transmitted point does not decompress to a valid group element.
    InvalidPoint,
    /// A transmitted vector or matrix does not have the shape implied by the
    /// proof parameters, or a transmitted scalar is not canonical.
    MalformedProof,
    /// The ring does not contain exactly `base^exponent` members.
    RingSizeMismatch,
    /// `x*B + A != COMb(f; z_A)`
    DigitCommitment,
    /// `x*C + D != COMb(f*(x - f); z_C)`
    DigitSquare,
    /// The folded one-of-many equation does not hold.
    RingRelation,
    /// The multisignature over the proof and statement does not verify.
    Multisignature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofError {
    /// The decomposition parameters describe a ring that is too small, or
    /// fewer commitments were supplied than the parameters require.
    SetIsTooSmall,
    /// The decomposition parameters describe a ring that is too large, or
    /// more commitments were supplied than the parameters require.
    SetIsTooLarge,
    /// The secret index does not lie within the ring.
    IndexOutOfBounds,
    /// Inputs disagree about the number of ring inputs or ring members.
    ShapeMismatch,
    /// The encoded bytes ended before the structure was complete.
    Truncated,
    /// The encoded bytes continue past the end of the structure.
    TrailingBytes,
    /// An encoded scalar is not reduced modulo the group order.
    InvalidScalar,
    /// An encoded varint is overlong or does not fit the target integer type.
    InvalidVarInt,
    /// The proof was well formed but failed verification.
    Rejected(Rejection),
}

pub type ProofResult<T> = core::result::Result<T, ProofError>;

impl ProofError {
    /// Builds a rejection error, reporting the failed check when tracing is
    /// enabled.
    pub(crate) fn rejected(reason: Rejection) -> ProofError {
        #[cfg(feature = "tracing")]
        tracing::debug!(?reason, "proof rejected");

        ProofError::Rejected(reason)
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Rejection::InvalidPoint => "point is not a valid group element",
            Rejection::MalformedProof => "proof shape does not match its parameters",
            Rejection::RingSizeMismatch => "ring size does not match decomposition parameters",
            Rejection::DigitCommitment => "digit commitment relation failed",
            Rejection::DigitSquare => "digit square relation failed",
            Rejection::RingRelation => "one-of-many ring relation failed",
            Rejection::Multisignature => "multisignature verification failed",
        };
        f.write_str(msg)
    }
}

impl fmt::Display for ProofError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProofError::SetIsTooSmall => f.write_str("set is too small"),
            ProofError::SetIsTooLarge => f.write_str("set is too large"),
            ProofError::IndexOutOfBounds => f.write_str("index out of bounds"),
            ProofError::ShapeMismatch => f.write_str("input shapes do not agree"),
            ProofError::Truncated => f.write_str("unexpected end of input"),
            ProofError::TrailingBytes => f.write_str("unexpected trailing bytes"),
            ProofError::InvalidScalar => f.write_str("non-canonical scalar"),
            ProofError::InvalidVarInt => f.write_str("malformed varint"),
            ProofError::Rejected(reason) => write!(f, "verification failed: {}", reason),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ProofError {}
