//! Verification of blob sidecars with a single aggregated KZG opening.
//!
//! Instead of checking every blob against its commitment, the verifier
//! derives a Fiat–Shamir weight `r` from all blobs and commitments, folds
//! both into one polynomial and one commitment with the powers of `r`,
//! derives an evaluation point `x` from that pair, evaluates the polynomial
//! at `x` and checks the supplied proof with one pairing equation.
//!
//! ```rust,no_run
//! use kzg_sidecar_verifier::{
//!     setup::SetupParameters,
//!     sidecar::{BlobsSidecar, SidecarVerifier, Slot},
//! };
//! # fn run(sidecar: BlobsSidecar, kzgs: Vec<kzg_sidecar_primitives::commitment::KzgCommitment>) {
//! let params = SetupParameters::load("trusted_setup.g2", 4096, 16).unwrap();
//! let verifier = SidecarVerifier::new(params);
//! let root = [0u8; 32];
//! verifier
//!     .verify_blobs_sidecar(Slot(1), &root, &kzgs, &sidecar)
//!     .unwrap();
//! # }
//! ```

pub mod aggregate;
pub mod errors;
pub mod setup;
pub mod sidecar;
pub mod verify;
