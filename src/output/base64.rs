//! Incremental base64 encoding.
//!
//! Output is produced one 4-character quantum at a time as each 3-byte
//! input group completes, so arbitrarily long streams are encoded in
//! constant memory. A partial group is only emitted, padded, by
//! [`Base64Encoder::finish`].

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const PAD: u8 = b'=';

/// Streaming encoder for the standard base64 alphabet.
#[derive(Debug, Clone, Default)]
pub struct Base64Encoder {
    pending: [u8; 3],
    len: usize,
}

impl Base64Encoder {
    /// Creates an encoder with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a byte, returning an encoded quantum when a group completes.
    pub fn push(&mut self, byte: u8) -> Option<[u8; 4]> {
        self.pending[self.len] = byte;
        self.len += 1;

        if self.len < 3 {
            return None;
        }

        self.len = 0;
        Some(encode_group(self.pending, 3))
    }

    /// Encodes any trailing partial group with padding.
    pub fn finish(self) -> Option<[u8; 4]> {
        if self.len == 0 {
            return None;
        }

        let mut group = [0u8; 3];
        group[..self.len].copy_from_slice(&self.pending[..self.len]);
        Some(encode_group(group, self.len))
    }
}

/// Encodes `len` (1 to 3) significant bytes of `group`.
fn encode_group(group: [u8; 3], len: usize) -> [u8; 4] {
    let n = (u32::from(group[0]) << 16) | (u32::from(group[1]) << 8) | u32::from(group[2]);

    let mut quantum = [PAD; 4];
    for (i, out) in quantum.iter_mut().enumerate().take(len + 1) {
        let index = (n >> (18 - 6 * i)) & 0x3F;
        *out = ALPHABET[index as usize];
    }
    quantum
}
