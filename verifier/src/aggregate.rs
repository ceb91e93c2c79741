use ark_bls12_381::G1Affine;
use kzg_sidecar_primitives::{
    blob::Blob, commitment::KzgCommitment, errors::KzgError, field::FieldElement, helpers,
    polynomial::PolynomialEvalForm, ssz,
};
use rayon::prelude::*;

use crate::setup::SetupParameters;

/// Fiat–Shamir weight `r` binding the aggregation to every blob and
/// commitment: the SSZ root of `BlobsWithCommitments`, reduced into the field.
pub fn compute_challenge(
    blobs: &[Blob],
    commitments: &[KzgCommitment],
    params: &SetupParameters,
) -> Result<FieldElement, KzgError> {
    let root = ssz::blobs_with_commitments_root(
        blobs,
        commitments,
        params.field_elements_per_blob(),
        params.max_blobs_per_block(),
    )?;
    Ok(helpers::hash_to_field_element(&root))
}

/// Evaluation point `x`: the SSZ root of `AggregatedPoly`, reduced into the field.
pub fn compute_evaluation_point(
    aggregated_poly: &PolynomialEvalForm,
    aggregated_commitment: &KzgCommitment,
    params: &SetupParameters,
) -> Result<FieldElement, KzgError> {
    let root = ssz::aggregated_poly_root(
        aggregated_poly.evaluations(),
        aggregated_commitment,
        params.field_elements_per_blob(),
    )?;
    Ok(helpers::hash_to_field_element(&root))
}

/// Converts each blob to its field elements, one blob per rayon task.
pub fn blobs_to_field_elements(blobs: &[Blob]) -> Vec<Vec<FieldElement>> {
    blobs.par_iter().map(Blob::to_field_elements).collect()
}

/// Weighted sum of polynomials in evaluation form:
/// `result[j] = Σ_i weights[i] · polys[i][j]`.
///
/// Every polynomial must be non-empty and of the same length; an empty batch,
/// an empty polynomial or a ragged batch is a [`KzgError::LengthMismatch`].
pub fn combine_polynomials(
    polys: &[Vec<FieldElement>],
    weights: &[FieldElement],
) -> Result<Vec<FieldElement>, KzgError> {
    if polys.len() != weights.len() {
        return Err(KzgError::LengthMismatch {
            expected: polys.len(),
            actual: weights.len(),
        });
    }

    // an empty batch or empty polynomial has no domain to aggregate over
    let width = polys.first().map(Vec::len).unwrap_or(0);
    if width == 0 {
        return Err(KzgError::LengthMismatch {
            expected: 1,
            actual: 0,
        });
    }
    if let Some(ragged) = polys.iter().find(|poly| poly.len() != width) {
        return Err(KzgError::LengthMismatch {
            expected: width,
            actual: ragged.len(),
        });
    }

    Ok((0..width)
        .into_par_iter()
        .map(|j| {
            polys
                .iter()
                .zip(weights)
                .fold(FieldElement::zero(), |acc, (poly, weight)| {
                    acc + weight.mul_mod(&poly[j])
                })
        })
        .collect())
}

/// `Σ_i weights[i] · commitments[i]`, see [`KzgCommitment::linear_combination`].
pub fn combine_commitments(
    commitments: &[KzgCommitment],
    weights: &[FieldElement],
) -> Result<KzgCommitment, KzgError> {
    KzgCommitment::linear_combination(commitments, weights)
}

/// Reduces a batch of blobs and their commitments to one polynomial and one
/// commitment, weighted by the powers of the Fiat–Shamir challenge.
///
/// A prover must build its aggregated proof against exactly this pair.
pub fn compute_aggregated_poly_and_commitment(
    blobs: &[Blob],
    commitments: &[KzgCommitment],
    params: &SetupParameters,
) -> Result<(PolynomialEvalForm, KzgCommitment), KzgError> {
    let r = compute_challenge(blobs, commitments, params)?;
    let (aggregated_poly, aggregated_point) = aggregate_with_challenge(blobs, commitments, &r)?;
    Ok((aggregated_poly, KzgCommitment::from_point(&aggregated_point)?))
}

/// Aggregates with a known weight `r`. The commitment stays a decoded point
/// so the pairing check can use it as is.
pub(crate) fn aggregate_with_challenge(
    blobs: &[Blob],
    commitments: &[KzgCommitment],
    r: &FieldElement,
) -> Result<(PolynomialEvalForm, G1Affine), KzgError> {
    let r_powers = helpers::compute_powers(r, commitments.len());

    let polys = blobs_to_field_elements(blobs);
    let aggregated_poly = combine_polynomials(&polys, &r_powers)?;
    let aggregated_point = KzgCommitment::linear_combination_point(commitments, &r_powers)?;

    Ok((PolynomialEvalForm::new(aggregated_poly), aggregated_point))
}
