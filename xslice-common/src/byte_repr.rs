use crate::error::{Error, Result};
use bytemuck::Pod;
use smallvec::SmallVec;
use std::io;
use std::mem::size_of;

/// ByteRepr is implemented by fixed-width element types that can live in
/// a raw array.
///
/// The zero value of the type is its all-zero bit pattern, which is what
/// freshly allocated memory holds.
pub trait ByteRepr: Pod {
    /// Width of one element in bytes.
    #[inline]
    fn width() -> usize {
        size_of::<Self>()
    }

    #[inline]
    fn zero() -> Self {
        <Self as bytemuck::Zeroable>::zeroed()
    }

    #[inline]
    fn to_bytes(&self) -> SmallVec<[u8; 16]> {
        SmallVec::from_slice(bytemuck::bytes_of(self))
    }

    /// Parse one element from native-endian bytes.
    #[inline]
    fn from_bytes(bs: &[u8]) -> Result<Self> {
        if bs.len() != size_of::<Self>() {
            return Err(Error::InvalidFormat(format!(
                "expect {} bytes, got {}",
                size_of::<Self>(),
                bs.len()
            )));
        }
        Ok(bytemuck::pod_read_unaligned(bs))
    }

    #[inline]
    fn write_bytes(&self, buf: &mut [u8]) {
        buf.copy_from_slice(bytemuck::bytes_of(self));
    }

    #[inline]
    fn write_all<W: io::Write>(writer: &mut W, src: &[Self]) -> io::Result<usize> {
        let src: &[u8] = bytemuck::cast_slice(src);
        writer.write_all(src)?;
        Ok(src.len())
    }
}

macro_rules! impl_byte_repr {
    ($($ty:ty),*) => {
        $(
            impl ByteRepr for $ty {}
        )*
    };
}

impl_byte_repr!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_width() {
        assert_eq!(0i32, i32::zero());
        assert_eq!(0.0f64, f64::zero());
        assert_eq!(4, i32::width());
        assert_eq!(1, u8::width());
    }

    #[test]
    fn test_bytes_i32() {
        let bs = 42i32.to_bytes();
        assert_eq!(&42i32.to_ne_bytes()[..], &bs[..]);
        assert_eq!(42, i32::from_bytes(&bs).unwrap());
        let mut buf = [0u8; 4];
        (-7i32).write_bytes(&mut buf);
        assert_eq!((-7i32).to_ne_bytes(), buf);
        assert!(i32::from_bytes(&bs[..3]).is_err());
    }

    #[test]
    fn test_write_all() {
        let mut out = vec![];
        let n = u16::write_all(&mut out, &[1, 2, 3]).unwrap();
        assert_eq!(6, n);
        let mut expected = vec![];
        for v in [1u16, 2, 3] {
            expected.extend(v.to_ne_bytes());
        }
        assert_eq!(expected, out);
    }
}
