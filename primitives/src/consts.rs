pub const BYTES_PER_FIELD_ELEMENT: usize = 32;
pub const SIZE_OF_G1_AFFINE_COMPRESSED: usize = 48; // in bytes
pub const SIZE_OF_G2_AFFINE_COMPRESSED: usize = 96; // in bytes

/// Decimal form of the BLS12-381 scalar field modulus.
pub const BLS_MODULUS_STR: &str =
    "52435875175126190479447740508185965837690552500527637822603658699938581184513";

pub const FIELD_ELEMENTS_PER_BLOB: usize = 4096;
pub const MAX_BLOBS_PER_BLOCK: usize = 16;

/// Largest power of two dividing r - 1 for the BLS12-381 scalar field.
pub const MAX_DOMAIN_LOG2: u32 = 32;
