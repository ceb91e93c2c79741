//! ## Library Design / Architecture
//!
//! Building blocks for verifying a blob sidecar: a list of blobs together
//! with their KZG commitments over BLS12-381, opened at a single point by one
//! aggregated proof.
//!
//! ### Data Types
//!
//! The data pipeline goes:
//! > raw chunks -> [blob::Blob] -> [field::FieldElement]s ->
//! > [polynomial::PolynomialEvalForm] -> evaluation at a challenge point
//!
//! - Blob: 32-byte chunks, one per point of the evaluation domain
//! - FieldElement: a BLS12-381 scalar, always reduced; chunk values above the
//!   modulus wrap
//! - PolynomialEvalForm: the values of a polynomial over the roots of unity
//!   of order N, evaluated anywhere with the barycentric formula
//! - KzgCommitment: a 48-byte compressed G1 point, decoded and combined
//!   linearly with an MSM
//!
//! The [ssz] module computes the structured hashes that seed the Fiat–Shamir
//! challenges, and [helpers] holds the power, domain and pairing helpers
//! shared with the verifier crate.

pub mod blob;
pub mod commitment;
pub mod consts;
pub mod errors;
pub mod field;
pub mod helpers;
pub mod polynomial;
pub mod ssz;
pub mod traits;
