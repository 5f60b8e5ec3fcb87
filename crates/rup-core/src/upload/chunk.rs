//! Chunk planning: split a byte buffer or file into fixed-size chunks.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::checksum::sha256_hex;
use crate::error::UploadError;

/// One contiguous byte range of the file being uploaded.
///
/// Created once at chunking time; boundaries never change afterwards.
/// `uploaded` is the only mutable field and only ever flips false -> true.
#[derive(Debug, Clone)]
pub struct UploadChunk {
    /// 0-based position of this chunk.
    pub chunk_index: usize,
    /// Total number of chunks in the upload.
    pub total_chunks: usize,
    /// The chunk's bytes.
    pub payload: Vec<u8>,
    /// Hex SHA-256 of `payload`, computed once at chunking time.
    pub checksum: String,
    /// Whether this chunk has been confirmed uploaded.
    pub uploaded: bool,
}

/// Splits `data` into `ceil(len / chunk_size)` contiguous chunks in order.
///
/// All chunks are exactly `chunk_size` bytes except possibly the last.
/// Empty input yields no chunks; a zero chunk size is rejected.
pub fn create_chunks(data: &[u8], chunk_size: usize) -> Result<Vec<UploadChunk>, UploadError> {
    if chunk_size == 0 {
        return Err(UploadError::InvalidChunkSize);
    }
    let total_chunks = data.len().div_ceil(chunk_size);
    let mut chunks = Vec::with_capacity(total_chunks);
    for (chunk_index, part) in data.chunks(chunk_size).enumerate() {
        chunks.push(UploadChunk {
            chunk_index,
            total_chunks,
            checksum: sha256_hex(part),
            payload: part.to_vec(),
            uploaded: false,
        });
    }
    Ok(chunks)
}

/// Reads `path` into the same chunk structure, one chunk at a time.
///
/// Equivalent to [`create_chunks`] over the file's bytes, without holding a
/// second full copy of the file while chunking.
pub fn create_chunks_from_file(
    path: &Path,
    chunk_size: usize,
) -> Result<Vec<UploadChunk>, UploadError> {
    if chunk_size == 0 {
        return Err(UploadError::InvalidChunkSize);
    }
    let mut file = File::open(path)?;
    let file_size = file.metadata()?.len() as usize;
    let total_chunks = file_size.div_ceil(chunk_size);

    let mut chunks = Vec::with_capacity(total_chunks);
    let mut remaining = file_size;
    for chunk_index in 0..total_chunks {
        let len = remaining.min(chunk_size);
        let mut payload = vec![0u8; len];
        file.read_exact(&mut payload)?;
        remaining -= len;
        chunks.push(UploadChunk {
            chunk_index,
            total_chunks,
            checksum: sha256_hex(&payload),
            payload,
            uploaded: false,
        });
    }
    Ok(chunks)
}
