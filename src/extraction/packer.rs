//! Packing bits into bytes.

use super::bits::Bit;
use crate::error::FilterError;

/// Packs groups of 8 bits into bytes, most significant bit first.
///
/// The first bit of a group contributes `0x80`, the last `0x01`.
/// A trailing group of fewer than 8 bits is dropped, never padded.
pub struct BytePacker<I> {
    bits: I,
}

impl<I> BytePacker<I> {
    /// Wraps a bit sequence.
    pub fn new(bits: I) -> Self {
        Self { bits }
    }

    /// Consumes the packer, returning the underlying bit sequence.
    pub fn into_inner(self) -> I {
        self.bits
    }
}

impl<I> Iterator for BytePacker<I>
where
    I: Iterator<Item = Result<Bit, FilterError>>,
{
    type Item = Result<u8, FilterError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut byte = 0u8;
        for _ in 0..8 {
            match self.bits.next()? {
                Ok(bit) => byte = (byte << 1) | u8::from(bit),
                Err(e) => return Some(Err(e)),
            }
        }
        Some(Ok(byte))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(pattern: &str) -> impl Iterator<Item = Result<Bit, FilterError>> + '_ {
        pattern.chars().map(|c| Ok(if c == '1' { Bit::One } else { Bit::Zero }))
    }

    fn pack(pattern: &str) -> Vec<u8> {
        BytePacker::new(bits(pattern))
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_msb_first() {
        assert_eq!(pack("10000000"), vec![0x80]);
        assert_eq!(pack("00000001"), vec![0x01]);
        assert_eq!(pack("1010010111110000"), vec![0xA5, 0xF0]);
    }

    #[test]
    fn test_partial_group_dropped() {
        assert_eq!(pack("1111111"), Vec::<u8>::new());
        assert_eq!(pack("11111111").len(), 1);
        assert_eq!(pack("111111110101"), vec![0xFF]);
    }

    #[test]
    fn test_error_propagates() {
        let source = vec![Ok(Bit::One), Err(FilterError::EstimatorNotReady)].into_iter();
        let mut packer = BytePacker::new(source);
        assert!(matches!(packer.next(), Some(Err(_))));
    }
}
