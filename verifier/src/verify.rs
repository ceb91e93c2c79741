use ark_bls12_381::{G1Affine, G2Affine};
use ark_ec::{AffineRepr, CurveGroup};
use kzg_sidecar_primitives::{
    commitment::{KzgCommitment, KzgProof},
    errors::KzgError,
    field::FieldElement,
    helpers,
};

use crate::setup::SetupParameters;

/// This function performs verification of a KZG opening proof where the
/// commitment and proof are provided in compressed form. Both are decoded
/// before any pairing is computed, so a malformed encoding surfaces as
/// [`KzgError::InvalidEncoding`].
///
/// # Returns
///
/// * `Ok(true)` - If the proof is valid
/// * `Ok(false)` - If the proof is invalid but well-formed
/// * `Err(KzgError)` - If either point fails to decode
pub fn verify_kzg_proof(
    commitment: &KzgCommitment,
    z: &FieldElement,
    y: &FieldElement,
    proof: &KzgProof,
    params: &SetupParameters,
) -> Result<bool, KzgError> {
    let commitment = commitment.decode()?;
    let proof = proof.decode()?;
    Ok(verify_proof_impl(commitment, proof, *y, *z, params.g2_tau()))
}

/// Checks that `commitment` opens to `value` at `z`:
///
/// ```text
/// e(C - [value]·G1, H) == e(proof, [s]·H - [z]·H)
/// ```
///
/// Points are expected to be decoded (and therefore validated) already.
pub fn verify_proof_impl(
    commitment: G1Affine,
    proof: G1Affine,
    value: FieldElement,
    z: FieldElement,
    g2_tau: G2Affine,
) -> bool {
    // Compute [value]*G1
    let value_g1 = G1Affine::generator() * value.as_fr();

    // [C - value*G1] is the quotient times (X - z) if the claim holds
    let commit_minus_value = (commitment.into_group() - value_g1).into_affine();

    // Compute [τ - z]*G2
    let z_g2 = G2Affine::generator() * z.as_fr();
    let tau_minus_z = (g2_tau.into_group() - z_g2).into_affine();

    helpers::pairings_verify(
        commit_minus_value,
        G2Affine::generator(),
        proof,
        tau_minus_z,
    )
}
