use crate::{consts::BYTES_PER_FIELD_ELEMENT, errors::KzgError, field::FieldElement};

// Need to explicitly import alloc because we keep this module allocation-only.
extern crate alloc;
use alloc::format;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// A blob: an ordered sequence of 32-byte chunks, one per evaluation-domain
/// point.
///
/// Chunks are framed at construction time (the byte length must be a
/// multiple of [`BYTES_PER_FIELD_ELEMENT`]); their values are not checked
/// against the field modulus and are reduced when converted to field
/// elements.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Blob {
    /// The binary data contained within the blob.
    blob_data: Vec<u8>,
}

fn check_framing(data: &[u8]) -> Result<(), KzgError> {
    if data.len() % BYTES_PER_FIELD_ELEMENT != 0 {
        return Err(KzgError::InvalidEncoding(format!(
            "blob length {} is not a multiple of {}",
            data.len(),
            BYTES_PER_FIELD_ELEMENT
        )));
    }
    Ok(())
}

impl Blob {
    /// Creates a new `Blob` from already chunked data.
    pub fn new(blob_data: &[u8]) -> Result<Self, KzgError> {
        check_framing(blob_data)?;
        Ok(Blob {
            blob_data: blob_data.to_vec(),
        })
    }

    pub fn from_chunks(chunks: &[[u8; BYTES_PER_FIELD_ELEMENT]]) -> Self {
        Blob {
            blob_data: chunks.concat(),
        }
    }

    /// Builds a blob holding the canonical encoding of each field element.
    pub fn from_field_elements(elements: &[FieldElement]) -> Self {
        Self::from_chunks(&field_elements_to_bytes(elements))
    }

    /// Returns the blob data
    pub fn data(&self) -> &[u8] {
        &self.blob_data
    }

    /// Returns the length of the blob data in bytes.
    pub fn len(&self) -> usize {
        self.blob_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blob_data.is_empty()
    }

    /// Number of chunks, which is also the number of field elements.
    pub fn num_field_elements(&self) -> usize {
        self.blob_data.len() / BYTES_PER_FIELD_ELEMENT
    }

    pub fn chunks(&self) -> impl Iterator<Item = &[u8]> {
        self.blob_data.chunks_exact(BYTES_PER_FIELD_ELEMENT)
    }

    /// The chunks as fixed-width arrays, in order.
    pub fn to_chunk_array(&self) -> Vec<[u8; BYTES_PER_FIELD_ELEMENT]> {
        self.chunks()
            .map(|chunk| {
                let mut array = [0u8; BYTES_PER_FIELD_ELEMENT];
                array.copy_from_slice(chunk);
                array
            })
            .collect()
    }

    pub fn to_field_elements(&self) -> Vec<FieldElement> {
        self.chunks().map(FieldElement::from_bytes_reduced).collect()
    }
}

/// Maps every chunk of the blob through [`FieldElement::from_bytes_reduced`],
/// preserving order and count.
pub fn blob_to_field_elements(blob: &Blob) -> Vec<FieldElement> {
    blob.to_field_elements()
}

/// Canonical big-endian byte form of each element. Elements are already
/// reduced, so nothing is reduced again here.
pub fn field_elements_to_bytes(elements: &[FieldElement]) -> Vec<[u8; BYTES_PER_FIELD_ELEMENT]> {
    elements.iter().map(FieldElement::to_bytes).collect()
}

impl TryFrom<Vec<u8>> for Blob {
    type Error = KzgError;

    fn try_from(blob_data: Vec<u8>) -> Result<Self, KzgError> {
        check_framing(&blob_data)?;
        Ok(Blob { blob_data })
    }
}

impl From<Blob> for Vec<u8> {
    fn from(blob: Blob) -> Self {
        blob.blob_data
    }
}
