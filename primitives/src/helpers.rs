use ark_bls12_381::{Bls12_381, G1Affine, G2Affine};
use ark_ec::pairing::Pairing;
use ark_poly::{EvaluationDomain, Radix2EvaluationDomain};
use ark_std::Zero;

extern crate alloc;
use alloc::{format, string::ToString, vec::Vec};

use crate::{consts::MAX_DOMAIN_LOG2, errors::KzgError, field::FieldElement};

/// Computes powers of a field element up to a given exponent.
///
/// For a given field element x, computes [1, x, x², x³, ..., x^(count-1)]
///
/// # Arguments
/// * `base` - The field element to compute powers of
/// * `count` - The number of powers to compute (0 to count-1)
///
/// # Returns
/// * Vector of field elements containing powers: [x⁰, x¹, x², ..., x^(count-1)]
pub fn compute_powers(base: &FieldElement, count: usize) -> Vec<FieldElement> {
    let mut powers = Vec::with_capacity(count);

    // Start with x⁰ = 1
    let mut current = FieldElement::one();

    for _ in 0..count {
        powers.push(current);
        current = current.mul_mod(base);
    }

    powers
}

/// Reduces a hash digest, read big-endian, into the scalar field.
pub fn hash_to_field_element(digest: &[u8]) -> FieldElement {
    FieldElement::from_bytes_reduced(digest)
}

/// Returns the multiplicative subgroup of order `size` in natural order,
/// `[1, ω, ω², ..., ω^(size-1)]`.
///
/// `size` must be a non-zero power of two no larger than the two-adicity of
/// the scalar field allows.
pub fn calculate_roots_of_unity(size: usize) -> Result<Vec<FieldElement>, KzgError> {
    if size == 0 || !size.is_power_of_two() {
        return Err(KzgError::InvalidDomain(format!(
            "domain size {} is not a non-zero power of two",
            size
        )));
    }
    if size.trailing_zeros() > MAX_DOMAIN_LOG2 {
        return Err(KzgError::InvalidDomain(
            "domain size exceeds the two-adicity of the scalar field".to_string(),
        ));
    }

    let domain = Radix2EvaluationDomain::<ark_bls12_381::Fr>::new(size).ok_or_else(|| {
        KzgError::InvalidDomain(format!("failed to construct domain of size {}", size))
    })?;

    Ok(domain.elements().map(FieldElement::from).collect())
}

/// Checks `e(a1, a2) == e(b1, b2)` with a single multi-pairing.
pub fn pairings_verify(a1: G1Affine, a2: G2Affine, b1: G1Affine, b2: G2Affine) -> bool {
    let neg_b1 = -b1;
    let p = [a1, neg_b1];
    let q = [a2, b2];
    let result = Bls12_381::multi_pairing(p, q);
    result.is_zero()
}
