//! Raw PCM byte decoding
//!
//! Request bodies carry bare little-endian float32 samples with no header
//! and no declared channel count or sample rate. The decoder makes no
//! attempt to validate sample range or count; callers pass whatever comes
//! off the wire straight to the model.

/// Decode a raw byte buffer into little-endian f32 samples.
///
/// Trailing bytes that do not form a complete 4-byte group are dropped.
/// Zero-length input yields an empty vector.
pub fn decode_f32le(body: &[u8]) -> Vec<f32> {
    body.chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}
