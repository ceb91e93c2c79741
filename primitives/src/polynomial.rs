use ark_bls12_381::Fr;
use ark_ff::batch_inversion;
use ark_std::Zero;

extern crate alloc;
use alloc::{string::ToString, vec::Vec};

use crate::{consts::BYTES_PER_FIELD_ELEMENT, errors::KzgError, field::FieldElement};

/// A polynomial given by its values over the evaluation domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolynomialEvalForm {
    evaluations: Vec<FieldElement>,
}

impl PolynomialEvalForm {
    /// Unlike a coefficient vector, evaluations are not padded: the length
    /// must already equal the domain size it will be evaluated over.
    pub fn new(evaluations: Vec<FieldElement>) -> Self {
        Self { evaluations }
    }

    pub fn evaluations(&self) -> &[FieldElement] {
        &self.evaluations
    }

    pub fn len(&self) -> usize {
        self.evaluations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }

    pub fn get_evaluation(&self, i: usize) -> Option<&FieldElement> {
        self.evaluations.get(i)
    }

    /// Concatenated canonical big-endian encoding of the evaluations.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len() * BYTES_PER_FIELD_ELEMENT);
        for element in &self.evaluations {
            bytes.extend_from_slice(&element.to_bytes());
        }
        bytes
    }

    /// Evaluates the polynomial at `x`. See [`evaluate_polynomial_in_evaluation_form`].
    pub fn evaluate(
        &self,
        x: &FieldElement,
        domain: &[FieldElement],
    ) -> Result<FieldElement, KzgError> {
        evaluate_polynomial_in_evaluation_form(&self.evaluations, x, domain)
    }

    pub fn into_evaluations(self) -> Vec<FieldElement> {
        self.evaluations
    }
}

impl From<Vec<FieldElement>> for PolynomialEvalForm {
    fn from(evaluations: Vec<FieldElement>) -> Self {
        Self::new(evaluations)
    }
}

/// Evaluates a polynomial in evaluation form at an arbitrary point using the
/// barycentric formula over a roots-of-unity domain of size N:
///
/// ```text
/// p(x) = (x^N - 1) / N · Σ_j domain[j] · poly[j] / (x - domain[j])
/// ```
///
/// When `x` is itself a domain point the formula would divide by zero, so the
/// stored evaluation is returned directly.
pub fn evaluate_polynomial_in_evaluation_form(
    poly: &[FieldElement],
    x: &FieldElement,
    domain: &[FieldElement],
) -> Result<FieldElement, KzgError> {
    if poly.len() != domain.len() {
        return Err(KzgError::LengthMismatch {
            expected: domain.len(),
            actual: poly.len(),
        });
    }

    let width = poly.len();
    if width == 0 {
        return Err(KzgError::InvalidDomain(
            "empty polynomial domain".to_string(),
        ));
    }

    if let Some(index) = domain.iter().position(|domain_i| domain_i == x) {
        return Ok(poly[index]);
    }

    let inverse_width = FieldElement::from_u64(width as u64)
        .inverse()
        .ok_or(KzgError::InvalidDenominator)?;

    // x is not in the domain, so none of these is zero.
    let mut denominators: Vec<Fr> = domain.iter().map(|d| x.sub_mod(d).as_fr()).collect();
    if denominators.iter().any(Zero::is_zero) {
        return Err(KzgError::InvalidDenominator);
    }
    batch_inversion(&mut denominators);

    let sum = poly
        .iter()
        .zip(domain)
        .zip(denominators)
        .fold(FieldElement::zero(), |acc, ((f_i, domain_i), inv)| {
            acc + f_i.mul_mod(domain_i).mul_mod(&FieldElement::from(inv))
        });

    let r = x.pow(width as u64).sub_mod(&FieldElement::one());

    Ok(sum.mul_mod(&r).mul_mod(&inverse_width))
}
