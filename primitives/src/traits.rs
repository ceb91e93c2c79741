use ark_bls12_381::{g1, g2};
use ark_ec::{short_weierstrass::Affine, AffineRepr};
use ark_serialize::CanonicalDeserialize;

extern crate alloc;
use alloc::format;

use crate::{
    consts::{SIZE_OF_G1_AFFINE_COMPRESSED, SIZE_OF_G2_AFFINE_COMPRESSED},
    errors::KzgError,
};

/// Decoding of compressed curve points in the ZCash/IETF encoding.
///
/// Implementations reject inputs of the wrong width, off-curve points and
/// points outside the prime-order subgroup.
pub trait ReadPointFromBytes: AffineRepr {
    const COMPRESSED_SIZE: usize;

    fn read_point_from_bytes_compressed(bytes: &[u8]) -> Result<Self, KzgError>;
}

fn read_compressed<P: CanonicalDeserialize>(bytes: &[u8], expected: usize) -> Result<P, KzgError> {
    if bytes.len() != expected {
        return Err(KzgError::InvalidEncoding(format!(
            "expected {} bytes for a compressed point, got {}",
            expected,
            bytes.len()
        )));
    }
    // deserialize_compressed validates curve and subgroup membership.
    P::deserialize_compressed(bytes).map_err(|e| KzgError::InvalidEncoding(format!("{}", e)))
}

// `G1Affine` and `G2Affine` are aliases through `Bls12Config` associated
// types, which coherence cannot tell apart; name the configs directly.
impl ReadPointFromBytes for Affine<g1::Config> {
    const COMPRESSED_SIZE: usize = SIZE_OF_G1_AFFINE_COMPRESSED;

    fn read_point_from_bytes_compressed(bytes: &[u8]) -> Result<Self, KzgError> {
        read_compressed(bytes, Self::COMPRESSED_SIZE)
    }
}

impl ReadPointFromBytes for Affine<g2::Config> {
    const COMPRESSED_SIZE: usize = SIZE_OF_G2_AFFINE_COMPRESSED;

    fn read_point_from_bytes_compressed(bytes: &[u8]) -> Result<Self, KzgError> {
        read_compressed(bytes, Self::COMPRESSED_SIZE)
    }
}
