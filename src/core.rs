use std::io::{Read, Write};

use thiserror::Error;

use crate::io::{read_unum, write_unum, ReadError, WriteError};
use crate::{raw, MAX_LEN};

/// Errors that may occur when encoding a value.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum EncodeError {
    /// The value does not fit in the widest length class of the family.
    #[error("value {value} is out of range, must be less than {bound}")]
    ValueTooLarge { value: u64, bound: u64 },
    /// The destination is shorter than the minimal encoding of the value.
    ///
    /// Nothing is written to the destination when this is returned.
    #[error("buffer too small: need {required} bytes, have {available}")]
    BufferTooSmall { required: usize, available: usize },
}

/// Errors that may occur when decoding a value from a buffer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum DecodeError {
    /// Attempted to decode an empty buffer.
    #[error("buffer is empty")]
    BufferEmpty,
    /// The tag declares more bytes than the buffer holds.
    #[error("truncated encoding: tag declares {expected} bytes, have {available}")]
    InvalidEncoding { expected: usize, available: usize },
    /// The value was encoded with a longer length class than necessary.
    ///
    /// Only returned by `Family::decode_canonical()`.
    #[error("non-canonical encoding: {len} bytes used where {minimal} suffice")]
    NonCanonical { len: usize, minimal: usize },
}

/// Base integer trait for family values. Provides internal APIs to shuffle values to and from the
/// raw u64 representation used by the `raw` routines.
pub trait Int: Sized + Copy {
    fn to_unum_raw(self) -> u64;
    /// Narrows a raw value. Callers only pass values below the family's `VALUE_BOUND`, which always
    /// fit the family's value type.
    fn from_unum_raw(raw: u64) -> Self;
}

macro_rules! impl_int {
    ($int:ty) => {
        impl Int for $int {
            #[inline(always)]
            fn to_unum_raw(self) -> u64 {
                u64::from(self)
            }
            #[inline(always)]
            fn from_unum_raw(raw: u64) -> Self {
                raw as $int
            }
        }
    };
}
impl_int!(u16);
impl_int!(u32);
impl_int!(u64);

mod sealed {
    pub trait Sealed {}
}

/// Returns the `(tag, len)` of the minimal length class holding `raw`.
#[inline]
fn class_of<F: Family>(raw: u64) -> Result<(usize, usize), EncodeError> {
    raw::min_tag(raw, F::LENGTHS, F::TAG_BITS)
        .map(|tag| (tag, F::LENGTHS[tag]))
        .ok_or(EncodeError::ValueTooLarge {
            value: raw,
            bound: F::VALUE_BOUND,
        })
}

/// Reassembles the value of the `len` byte encoding at the start of `buf`.
///
/// The caller guarantees `len == F::len_from_tag(buf[0])` and `buf.len() >= len`.
#[inline]
pub(crate) fn unpack_value<F: Family>(buf: &[u8], len: usize) -> F::Value {
    F::Value::from_unum_raw(raw::unpack(buf, len, F::TAG_BITS))
}

/// A tagged encoding layout: a tag width plus a `tag -> length` table.
///
/// All coding operations are provided methods generic over the descriptor, so every family
/// shares one implementation. The trait is sealed; the families are `Unum16`, `Unum32` and
/// `Unum64`.
pub trait Family: sealed::Sealed + Sized {
    /// Native integer type of values in this family.
    type Value: Int;

    /// Number of high bits of the first byte used by the tag.
    const TAG_BITS: u32;

    /// Encoded length indexed by tag, in ascending order.
    const LENGTHS: &'static [usize];

    /// Length of the widest encoding in the family.
    const MAX_LEN: usize;

    /// Exclusive upper bound of encodable values.
    const VALUE_BOUND: u64 = raw::class_bound(Self::MAX_LEN, Self::TAG_BITS);

    /// Returns the total length of an encoding given only its first byte.
    #[inline]
    fn len_from_tag(first: u8) -> usize {
        Self::LENGTHS[raw::tag(first, Self::TAG_BITS)]
    }

    /// Returns the number of bytes required to encode `v`.
    #[inline]
    fn encoded_len(v: Self::Value) -> Result<usize, EncodeError> {
        class_of::<Self>(v.to_unum_raw()).map(|(_, len)| len)
    }

    /// Encode `v` to the start of `buf` and return the number of bytes written.
    ///
    /// Always produces the minimal encoding. Fails without writing if `v` is out of range or if
    /// `buf` is too short.
    #[inline]
    fn encode(buf: &mut [u8], v: Self::Value) -> Result<usize, EncodeError> {
        let raw = v.to_unum_raw();
        let (tag, len) = class_of::<Self>(raw)?;
        if buf.len() < len {
            return Err(EncodeError::BufferTooSmall {
                required: len,
                available: buf.len(),
            });
        }
        raw::pack(raw, tag, len, Self::TAG_BITS, buf);
        Ok(len)
    }

    /// Decode a value from the start of `buf` and return the value and number of bytes consumed.
    ///
    /// Bytes past the declared length are ignored. Non-minimal encodings are accepted; use
    /// `decode_canonical()` to reject them.
    #[inline]
    fn decode(buf: &[u8]) -> Result<(Self::Value, usize), DecodeError> {
        let first = *buf.first().ok_or(DecodeError::BufferEmpty)?;
        let len = Self::len_from_tag(first);
        if buf.len() < len {
            return Err(DecodeError::InvalidEncoding {
                expected: len,
                available: buf.len(),
            });
        }
        Ok((unpack_value::<Self>(buf, len), len))
    }

    /// Like `decode()`, but fails with `NonCanonical` if a shorter encoding of the value exists.
    fn decode_canonical(buf: &[u8]) -> Result<(Self::Value, usize), DecodeError> {
        let (v, len) = Self::decode(buf)?;
        let minimal = class_of::<Self>(v.to_unum_raw()).map_or(len, |(_, minimal)| minimal);
        if minimal < len {
            Err(DecodeError::NonCanonical { len, minimal })
        } else {
            Ok((v, len))
        }
    }

    /// Encode `v` to an owned stack buffer and return it.
    /// Use `as_slice()` to access the encoded bytes.
    #[inline]
    fn to_bytes(v: Self::Value) -> Result<EncodedUnum, EncodeError> {
        EncodedUnum::new::<Self>(v)
    }

    /// Read one value from `r`. See `read_unum()`.
    #[inline]
    fn read_from<R: Read + ?Sized>(r: &mut R) -> Result<(Self::Value, usize), ReadError> {
        read_unum::<Self, R>(r)
    }

    /// Write `v` to `w`. See `write_unum()`.
    #[inline]
    fn write_to<W: Write + ?Sized>(w: &mut W, v: Self::Value) -> Result<usize, WriteError> {
        write_unum::<Self, W>(w, v)
    }
}

/// Narrow family: 1 bit tag, lengths {1, 2}, values below 2^15.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Unum16;

/// Medium family: 2 bit tag, lengths {1, 2, 3, 4}, values below 2^30.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Unum32;

/// Wide family: 2 bit tag, lengths {1, 2, 4, 8}, values below 2^62.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Unum64;

impl sealed::Sealed for Unum16 {}
impl sealed::Sealed for Unum32 {}
impl sealed::Sealed for Unum64 {}

impl Family for Unum16 {
    type Value = u16;
    const TAG_BITS: u32 = 1;
    const LENGTHS: &'static [usize] = &[1, 2];
    const MAX_LEN: usize = 2;
}

impl Family for Unum32 {
    type Value = u32;
    const TAG_BITS: u32 = 2;
    const LENGTHS: &'static [usize] = &[1, 2, 3, 4];
    const MAX_LEN: usize = 4;
}

impl Family for Unum64 {
    type Value = u64;
    const TAG_BITS: u32 = 2;
    const LENGTHS: &'static [usize] = &[1, 2, 4, 8];
    const MAX_LEN: usize = 8;
}

/// A single encoded value created with `Family::to_bytes()`.
#[derive(Copy, Clone, Debug)]
pub struct EncodedUnum {
    buf: [u8; MAX_LEN],
    len: u8,
}

#[allow(clippy::len_without_is_empty)]
impl EncodedUnum {
    fn new<F: Family>(v: F::Value) -> Result<Self, EncodeError> {
        let mut enc = Self::default();
        enc.len = F::encode(&mut enc.buf, v)? as u8;
        Ok(enc)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len()]
    }

    /// Returns the number of bytes used to encode the value.
    pub fn len(&self) -> usize {
        self.len as usize
    }
}

impl Default for EncodedUnum {
    fn default() -> Self {
        Self {
            buf: [0u8; MAX_LEN],
            len: 0,
        }
    }
}

impl AsRef<[u8]> for EncodedUnum {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}
