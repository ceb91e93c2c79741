//! SSZ Merkleization of the containers hashed by the sidecar Fiat–Shamir
//! transform.
//!
//! Only the shapes needed here are implemented: fixed vectors of 32-byte
//! chunks, 48-byte commitments and bounded lists of either.

use sha2::{Digest, Sha256};

extern crate alloc;
use alloc::{format, vec::Vec};

use crate::{
    blob::Blob,
    commitment::KzgCommitment,
    consts::{BYTES_PER_FIELD_ELEMENT, SIZE_OF_G1_AFFINE_COMPRESSED},
    errors::KzgError,
    field::FieldElement,
};

pub type Chunk = [u8; BYTES_PER_FIELD_ELEMENT];

pub const ZERO_CHUNK: Chunk = [0u8; BYTES_PER_FIELD_ELEMENT];

pub fn hash_pair(left: &Chunk, right: &Chunk) -> Chunk {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// Merkleizes `chunks` as the leaves of a tree with `limit.next_power_of_two()`
/// leaves, the missing ones being zero chunks.
pub fn merkleize(chunks: &[Chunk], limit: usize) -> Result<Chunk, KzgError> {
    if chunks.len() > limit {
        return Err(KzgError::HashingFailure(format!(
            "{} chunks exceed the limit of {}",
            chunks.len(),
            limit
        )));
    }

    let depth = limit.next_power_of_two().trailing_zeros();
    let mut layer: Vec<Chunk> = chunks.to_vec();
    let mut zero = ZERO_CHUNK;

    for _ in 0..depth {
        if layer.len() % 2 == 1 {
            layer.push(zero);
        }
        layer = layer
            .chunks_exact(2)
            .map(|pair| hash_pair(&pair[0], &pair[1]))
            .collect();
        zero = hash_pair(&zero, &zero);
    }

    Ok(layer.first().copied().unwrap_or(zero))
}

/// Mixes the length of a list into its root.
pub fn mix_in_length(root: &Chunk, length: usize) -> Chunk {
    let mut length_chunk = ZERO_CHUNK;
    length_chunk[..8].copy_from_slice(&(length as u64).to_le_bytes());
    hash_pair(root, &length_chunk)
}

/// Root of a `Vector[Bytes32, length]`.
pub fn vector_root(chunks: &[Chunk], length: usize) -> Result<Chunk, KzgError> {
    if chunks.len() != length {
        return Err(KzgError::HashingFailure(format!(
            "vector holds {} chunks, expected {}",
            chunks.len(),
            length
        )));
    }
    merkleize(chunks, length)
}

/// Root of a `Bytes48`: its two chunks, the second right-padded with zeros.
pub fn bytes48_root(bytes: &[u8; SIZE_OF_G1_AFFINE_COMPRESSED]) -> Chunk {
    let mut left = ZERO_CHUNK;
    let mut right = ZERO_CHUNK;
    left.copy_from_slice(&bytes[..BYTES_PER_FIELD_ELEMENT]);
    right[..SIZE_OF_G1_AFFINE_COMPRESSED - BYTES_PER_FIELD_ELEMENT]
        .copy_from_slice(&bytes[BYTES_PER_FIELD_ELEMENT..]);
    hash_pair(&left, &right)
}

/// Root of a `List[T, limit]` given the roots of its elements.
pub fn list_root(element_roots: &[Chunk], limit: usize) -> Result<Chunk, KzgError> {
    let root = merkleize(element_roots, limit)?;
    Ok(mix_in_length(&root, element_roots.len()))
}

pub fn blob_root(blob: &Blob, field_elements_per_blob: usize) -> Result<Chunk, KzgError> {
    vector_root(&blob.to_chunk_array(), field_elements_per_blob)
}

/// Root of `BlobsWithCommitments { blobs: List[Blob, max], kzgs: List[Bytes48, max] }`.
pub fn blobs_with_commitments_root(
    blobs: &[Blob],
    commitments: &[KzgCommitment],
    field_elements_per_blob: usize,
    max_blobs_per_block: usize,
) -> Result<Chunk, KzgError> {
    let blob_roots = blobs
        .iter()
        .map(|blob| blob_root(blob, field_elements_per_blob))
        .collect::<Result<Vec<Chunk>, KzgError>>()?;
    let commitment_roots: Vec<Chunk> = commitments
        .iter()
        .map(|commitment| bytes48_root(commitment.as_bytes()))
        .collect();

    let blobs_root = list_root(&blob_roots, max_blobs_per_block)?;
    let kzgs_root = list_root(&commitment_roots, max_blobs_per_block)?;
    Ok(hash_pair(&blobs_root, &kzgs_root))
}

/// Root of `AggregatedPoly { aggregated_poly: Vector[Bytes32, N], aggregated_poly_commitment: Bytes48 }`.
pub fn aggregated_poly_root(
    poly: &[FieldElement],
    commitment: &KzgCommitment,
    field_elements_per_blob: usize,
) -> Result<Chunk, KzgError> {
    let chunks: Vec<Chunk> = poly.iter().map(FieldElement::to_bytes).collect();
    let poly_root = vector_root(&chunks, field_elements_per_blob)?;
    Ok(hash_pair(&poly_root, &bytes48_root(commitment.as_bytes())))
}
