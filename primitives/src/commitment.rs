use ark_bls12_381::{Fr, G1Affine, G1Projective};
use ark_ec::{CurveGroup, VariableBaseMSM};
use ark_serialize::CanonicalSerialize;
use core::fmt;

extern crate alloc;
use alloc::{format, string::ToString, vec::Vec};

use crate::{
    consts::SIZE_OF_G1_AFFINE_COMPRESSED, errors::KzgError, field::FieldElement,
    traits::ReadPointFromBytes,
};

/// A KZG commitment: a 48-byte compressed G1 point.
///
/// The bytes are kept exactly as received. Nothing is checked until
/// [`KzgCommitment::decode`] is called, which is where malformed encodings
/// are rejected.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct KzgCommitment(pub [u8; SIZE_OF_G1_AFFINE_COMPRESSED]);

/// Opening proofs share the commitment encoding.
pub type KzgProof = KzgCommitment;

impl KzgCommitment {
    pub fn new(bytes: [u8; SIZE_OF_G1_AFFINE_COMPRESSED]) -> Self {
        Self(bytes)
    }

    /// Copies a byte slice into a commitment, rejecting any width other than 48.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KzgError> {
        let array: [u8; SIZE_OF_G1_AFFINE_COMPRESSED] = bytes.try_into().map_err(|_| {
            KzgError::InvalidEncoding(format!(
                "commitment must be {} bytes, got {}",
                SIZE_OF_G1_AFFINE_COMPRESSED,
                bytes.len()
            ))
        })?;
        Ok(Self(array))
    }

    /// Compresses a G1 point.
    pub fn from_point(point: &G1Affine) -> Result<Self, KzgError> {
        let mut bytes = Vec::with_capacity(SIZE_OF_G1_AFFINE_COMPRESSED);
        point
            .serialize_compressed(&mut bytes)
            .map_err(|e| KzgError::InvalidEncoding(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIZE_OF_G1_AFFINE_COMPRESSED] {
        &self.0
    }

    /// Decodes the compressed point. Fails with [`KzgError::InvalidEncoding`]
    /// for malformed flag bits, off-curve points and points outside the
    /// prime-order subgroup. The point at infinity is accepted.
    pub fn decode(&self) -> Result<G1Affine, KzgError> {
        G1Affine::read_point_from_bytes_compressed(&self.0)
    }

    /// Computes `Σ scalars[i] · commitments[i]` with a multi-scalar
    /// multiplication over G1 and returns it compressed.
    pub fn linear_combination(
        commitments: &[KzgCommitment],
        scalars: &[FieldElement],
    ) -> Result<KzgCommitment, KzgError> {
        Self::from_point(&Self::linear_combination_point(commitments, scalars)?)
    }

    /// As [`KzgCommitment::linear_combination`], returning the point itself.
    pub fn linear_combination_point(
        commitments: &[KzgCommitment],
        scalars: &[FieldElement],
    ) -> Result<G1Affine, KzgError> {
        if commitments.len() != scalars.len() {
            return Err(KzgError::LengthMismatch {
                expected: commitments.len(),
                actual: scalars.len(),
            });
        }

        let points = commitments
            .iter()
            .map(KzgCommitment::decode)
            .collect::<Result<Vec<G1Affine>, KzgError>>()?;
        let scalars: Vec<Fr> = scalars.iter().map(FieldElement::as_fr).collect();

        g1_lincomb(&points, &scalars)
    }
}

/// Computes a linear combination of G1 points weighted by scalar coefficients.
///
/// Given points P₁, P₂, ..., Pₙ and scalars s₁, s₂, ..., sₙ
/// Computes: s₁P₁ + s₂P₂ + ... + sₙPₙ
pub fn g1_lincomb(points: &[G1Affine], scalars: &[Fr]) -> Result<G1Affine, KzgError> {
    let lincomb =
        G1Projective::msm(points, scalars).map_err(|e| KzgError::MsmError(e.to_string()))?;
    Ok(lincomb.into_affine())
}

/// Copies raw byte strings into commitments, rejecting entries that are not
/// exactly 48 bytes wide.
pub fn kzgs_from_bytes_array<T: AsRef<[u8]>>(kzgs: &[T]) -> Result<Vec<KzgCommitment>, KzgError> {
    kzgs.iter()
        .map(|kzg| KzgCommitment::from_slice(kzg.as_ref()))
        .collect()
}

impl From<[u8; SIZE_OF_G1_AFFINE_COMPRESSED]> for KzgCommitment {
    fn from(bytes: [u8; SIZE_OF_G1_AFFINE_COMPRESSED]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for KzgCommitment {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for KzgCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KzgCommitment(0x")?;
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}
