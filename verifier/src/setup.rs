use ark_bls12_381::G2Affine;
use ark_ec::AffineRepr;
use kzg_sidecar_primitives::{
    consts::{FIELD_ELEMENTS_PER_BLOB, MAX_BLOBS_PER_BLOCK, SIZE_OF_G2_AFFINE_COMPRESSED},
    errors::KzgError,
    field::FieldElement,
    helpers,
    traits::ReadPointFromBytes,
};
use std::{fs, path::Path};
use tracing::debug;

/// Immutable verification parameters: the blob geometry, the evaluation
/// domain derived from it and the trusted-setup point `[s]·H` in G2.
///
/// Built once by the embedding process and handed to
/// [`crate::sidecar::SidecarVerifier::new`]; nothing here is global, so
/// tests can use toy-sized domains and a setup whose secret they know.
#[derive(Debug, PartialEq, Clone)]
pub struct SetupParameters {
    field_elements_per_blob: usize,
    max_blobs_per_block: usize,
    domain: Vec<FieldElement>,
    g2_tau: G2Affine,
}

impl SetupParameters {
    /// Validates the geometry and the setup point, then computes the domain.
    ///
    /// # Arguments
    ///
    /// * `field_elements_per_blob` - The domain size; a non-zero power of two.
    /// * `max_blobs_per_block` - The list limit used when hashing a batch.
    /// * `g2_tau` - `[s]·H`, where `H` is the G2 generator and `s` the setup secret.
    pub fn new(
        field_elements_per_blob: usize,
        max_blobs_per_block: usize,
        g2_tau: G2Affine,
    ) -> Result<Self, KzgError> {
        if max_blobs_per_block == 0 {
            return Err(KzgError::SetupError(
                "max blobs per block must be non-zero".to_string(),
            ));
        }

        if g2_tau.is_zero() {
            return Err(KzgError::SetupError(
                "G2 setup point cannot be the point at infinity".to_string(),
            ));
        }
        if !g2_tau.is_on_curve() || !g2_tau.is_in_correct_subgroup_assuming_on_curve() {
            return Err(KzgError::SetupError(
                "G2 setup point is not a valid subgroup point".to_string(),
            ));
        }

        let domain = helpers::calculate_roots_of_unity(field_elements_per_blob)?;
        debug!(
            field_elements_per_blob,
            max_blobs_per_block, "verification parameters ready"
        );

        Ok(Self {
            field_elements_per_blob,
            max_blobs_per_block,
            domain,
            g2_tau,
        })
    }

    /// Protocol geometry with the given setup point.
    pub fn with_protocol_sizes(g2_tau: G2Affine) -> Result<Self, KzgError> {
        Self::new(FIELD_ELEMENTS_PER_BLOB, MAX_BLOBS_PER_BLOCK, g2_tau)
    }

    pub fn from_compressed_g2(
        field_elements_per_blob: usize,
        max_blobs_per_block: usize,
        g2_tau: &[u8; SIZE_OF_G2_AFFINE_COMPRESSED],
    ) -> Result<Self, KzgError> {
        let g2_tau = G2Affine::read_point_from_bytes_compressed(g2_tau)?;
        Self::new(field_elements_per_blob, max_blobs_per_block, g2_tau)
    }

    /// Reads the 96-byte compressed `[s]·H` point from a file.
    pub fn load<P: AsRef<Path>>(
        path: P,
        field_elements_per_blob: usize,
        max_blobs_per_block: usize,
    ) -> Result<Self, KzgError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            KzgError::SetupError(format!("unable to read {}: {}", path.display(), e))
        })?;
        let g2_tau: [u8; SIZE_OF_G2_AFFINE_COMPRESSED] =
            bytes.as_slice().try_into().map_err(|_| {
                KzgError::SetupError(format!(
                    "{} holds {} bytes, expected a {}-byte compressed G2 point",
                    path.display(),
                    bytes.len(),
                    SIZE_OF_G2_AFFINE_COMPRESSED
                ))
            })?;
        Self::from_compressed_g2(field_elements_per_blob, max_blobs_per_block, &g2_tau)
    }

    pub fn field_elements_per_blob(&self) -> usize {
        self.field_elements_per_blob
    }

    pub fn max_blobs_per_block(&self) -> usize {
        self.max_blobs_per_block
    }

    /// Roots of unity of order `field_elements_per_blob`, in natural order.
    pub fn domain(&self) -> &[FieldElement] {
        &self.domain
    }

    pub fn g2_tau(&self) -> G2Affine {
        self.g2_tau
    }
}
