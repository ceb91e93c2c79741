use core::fmt;
use kzg_sidecar_primitives::{
    blob::Blob,
    commitment::{KzgCommitment, KzgProof},
};
use tracing::{debug, trace, warn};

use crate::{aggregate, errors::SidecarError, setup::SetupParameters, verify};

/// Slot number of a beacon block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(pub u64);

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Slot {
    fn from(slot: u64) -> Self {
        Slot(slot)
    }
}

pub type Root = [u8; 32];

/// The blobs of one beacon block, with the proof that opens their
/// aggregated commitment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlobsSidecar {
    pub beacon_block_root: Root,
    pub beacon_block_slot: Slot,
    pub blobs: Vec<Blob>,
    pub kzg_aggregated_proof: KzgProof,
}

/// Stages of [`SidecarVerifier::verify_blobs_sidecar`], in order. A failure
/// at any stage ends verification with that stage's error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerificationStage {
    Init,
    ChecksPassed,
    ChallengeDerived,
    PolynomialAggregated,
    PointEvaluated,
    ProofVerified,
}

impl fmt::Display for VerificationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VerificationStage::Init => "init",
            VerificationStage::ChecksPassed => "checks_passed",
            VerificationStage::ChallengeDerived => "challenge_derived",
            VerificationStage::PolynomialAggregated => "polynomial_aggregated",
            VerificationStage::PointEvaluated => "point_evaluated",
            VerificationStage::ProofVerified => "proof_verified",
        };
        f.write_str(name)
    }
}

/// Verifies blob sidecars against a fixed set of [`SetupParameters`].
///
/// Verification borrows the parameters immutably and keeps no state between
/// calls, so one verifier can serve any number of threads.
#[derive(Debug, Clone)]
pub struct SidecarVerifier {
    params: SetupParameters,
}

impl SidecarVerifier {
    pub fn new(params: SetupParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SetupParameters {
        &self.params
    }

    /// Checks that `sidecar` belongs to the block at `slot`/`beacon_block_root`
    /// and that its blobs match `expected_kzgs`, using one aggregated opening.
    ///
    /// Slot, root and length checks run before any cryptographic work.
    pub fn verify_blobs_sidecar(
        &self,
        slot: Slot,
        beacon_block_root: &Root,
        expected_kzgs: &[KzgCommitment],
        sidecar: &BlobsSidecar,
    ) -> Result<(), SidecarError> {
        let stage = VerificationStage::Init;

        if slot != sidecar.beacon_block_slot {
            return Err(reject(
                stage,
                SidecarError::SlotMismatch {
                    expected: slot,
                    actual: sidecar.beacon_block_slot,
                },
            ));
        }
        if beacon_block_root != &sidecar.beacon_block_root {
            return Err(reject(stage, SidecarError::RootMismatch));
        }
        let blobs = &sidecar.blobs;
        if expected_kzgs.len() != blobs.len() {
            return Err(reject(
                stage,
                SidecarError::LengthMismatch {
                    expected: expected_kzgs.len(),
                    actual: blobs.len(),
                },
            ));
        }
        let field_elements_per_blob = self.params.field_elements_per_blob();
        if let Some(blob) = blobs
            .iter()
            .find(|blob| blob.num_field_elements() != field_elements_per_blob)
        {
            return Err(reject(
                stage,
                SidecarError::LengthMismatch {
                    expected: field_elements_per_blob,
                    actual: blob.num_field_elements(),
                },
            ));
        }

        let stage = VerificationStage::ChecksPassed;
        debug!(slot = %slot, blobs = blobs.len(), %stage, "sidecar preconditions hold");

        let r = aggregate::compute_challenge(blobs, expected_kzgs, &self.params)
            .map_err(|e| reject(stage, e.into()))?;
        let stage = VerificationStage::ChallengeDerived;
        trace!(%stage, "derived aggregation weight");

        let (aggregated_poly, aggregated_point) =
            aggregate::aggregate_with_challenge(blobs, expected_kzgs, &r)
                .map_err(|e| reject(stage, e.into()))?;
        let aggregated_commitment =
            KzgCommitment::from_point(&aggregated_point).map_err(|e| reject(stage, e.into()))?;
        let stage = VerificationStage::PolynomialAggregated;
        trace!(%stage, commitment = ?aggregated_commitment, "aggregated blobs");

        let x = aggregate::compute_evaluation_point(
            &aggregated_poly,
            &aggregated_commitment,
            &self.params,
        )
        .map_err(|e| reject(stage, e.into()))?;
        let y = aggregated_poly
            .evaluate(&x, self.params.domain())
            .map_err(|e| reject(stage, e.into()))?;
        let stage = VerificationStage::PointEvaluated;
        trace!(%stage, "evaluated aggregated polynomial");

        let proof = sidecar
            .kzg_aggregated_proof
            .decode()
            .map_err(|e| reject(stage, e.into()))?;
        if !verify::verify_proof_impl(aggregated_point, proof, y, x, self.params.g2_tau()) {
            return Err(reject(stage, SidecarError::ProofInvalid));
        }

        debug!(slot = %slot, stage = %VerificationStage::ProofVerified, "sidecar verified");
        Ok(())
    }
}

fn reject(stage: VerificationStage, err: SidecarError) -> SidecarError {
    if err.is_routine() {
        debug!(%stage, error = %err, "sidecar rejected");
    } else {
        warn!(%stage, error = %err, "sidecar rejected");
    }
    err
}
