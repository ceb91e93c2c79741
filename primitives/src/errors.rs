use thiserror::Error;

// Need to explicitly import alloc for the String payloads.
extern crate alloc;
use alloc::string::String;

/// Errors related to KZG primitive operations.
///
/// The `KzgError` enum covers decoding of compressed points, framing of
/// blobs and polynomials, structured hashing and the arithmetic guards of
/// barycentric evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KzgError {
    /// Two sequences that must line up have different lengths.
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Bytes that do not encode a valid compressed point, or have the wrong width.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// The structured (SSZ) hash of the inputs could not be computed.
    #[error("hashing failure: {0}")]
    HashingFailure(String),

    /// Error indicating an invalid denominator scenario, typically in mathematical operations.
    #[error("invalid denominator")]
    InvalidDenominator,

    /// The evaluation domain cannot be built for the requested size.
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    #[error("MSM error: {0}")]
    MsmError(String),

    /// The trusted setup could not be read or is not usable.
    #[error("setup error: {0}")]
    SetupError(String),
}
