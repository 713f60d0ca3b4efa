//! Traits that allow writing/reading tagged values on `bytes::{BufMut,Buf}`.

use crate::{DecodeError, EncodeError, Family, MAX_LEN};

use bytes::{Buf, BufMut};

/// Extension for `buf::BufMut` to write values of any `Family`.
pub trait UnumBufMut {
    /// Writes `v` to the buffer and returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns `ValueTooLarge` if `v` is out of range for `F`, or `BufferTooSmall` if the buffer
    /// cannot grow to hold the encoding. Nothing is written in either case.
    fn put_unum<F: Family>(&mut self, v: F::Value) -> Result<usize, EncodeError>;
}

impl<Inner: BufMut> UnumBufMut for Inner {
    #[inline]
    fn put_unum<F: Family>(&mut self, v: F::Value) -> Result<usize, EncodeError> {
        let enc = F::to_bytes(v)?;
        if self.remaining_mut() < enc.len() {
            return Err(EncodeError::BufferTooSmall {
                required: enc.len(),
                available: self.remaining_mut(),
            });
        }
        self.put_slice(enc.as_slice());
        Ok(enc.len())
    }
}

/// Extension for `buf::Buf` to read values of any `Family`.
pub trait UnumBuf {
    /// Reads a value from the buffer. After a successful read, the buffer will be advanced by the
    /// number of bytes read.
    ///
    /// # Examples
    ///
    /// ```
    /// use unum::{Unum32, UnumBuf, UnumBufMut};
    ///
    /// let to_encode = [1, 2, 400, 70_000];
    /// let mut buf = vec![];
    /// for v in &to_encode {
    ///    buf.put_unum::<Unum32>(*v).unwrap();
    /// }
    ///
    /// let mut buf = &buf[..];
    /// for v in &to_encode {
    ///   let decoded = buf.get_unum::<Unum32>().unwrap();
    ///   assert_eq!(decoded, *v);
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `BufferEmpty` if the buffer is empty, or `InvalidEncoding` if the buffer is not long
    /// enough to contain the full encoded value. The buffer is not advanced on error.
    fn get_unum<F: Family>(&mut self) -> Result<F::Value, DecodeError>;

    /// Returns an iterator over values in the buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use unum::{Unum16, UnumBuf, UnumBufMut};
    ///
    /// let to_encode = [1, 2, 300, 24_000];
    /// let mut buf = vec![];
    /// for n in to_encode.iter() {
    ///     buf.put_unum::<Unum16>(*n).unwrap();
    /// }
    /// let mut result = vec![];
    /// let mut decode_data = buf.as_slice();
    /// for decoded in decode_data.iter_unum::<Unum16>() {
    ///     result.push(decoded.unwrap());
    /// }
    /// assert_eq!(to_encode, result.as_slice());
    /// ```
    fn iter_unum<F: Family>(&mut self) -> UnumIter<'_, Self, F>
    where
        Self: Sized,
    {
        UnumIter::new(self)
    }
}

impl<Inner: Buf> UnumBuf for Inner {
    #[inline]
    fn get_unum<F: Family>(&mut self) -> Result<F::Value, DecodeError> {
        if !self.has_remaining() {
            return Err(DecodeError::BufferEmpty);
        }

        // Contiguous fast path; `decode` reports truncation against the whole chunk.
        let chunk = self.chunk();
        let len = F::len_from_tag(chunk[0]);
        if chunk.len() >= len {
            let (v, len) = F::decode(chunk)?;
            self.advance(len);
            return Ok(v);
        }

        if self.remaining() < len {
            return Err(DecodeError::InvalidEncoding {
                expected: len,
                available: self.remaining(),
            });
        }
        let mut ibuf = [0u8; MAX_LEN];
        self.copy_to_slice(&mut ibuf[..len]);
        F::decode(&ibuf[..len]).map(|(v, _)| v)
    }
}

/// An iterator over values of a `Family` in a `Buf`.
///
/// Stops after the buffer is exhausted. A truncated value at the end is yielded as an error and
/// ends iteration.
pub struct UnumIter<'a, B, F> {
    buf: &'a mut B,
    failed: bool,
    _marker: std::marker::PhantomData<F>,
}

impl<'a, B, F> UnumIter<'a, B, F> {
    /// Creates a new `UnumIter`.
    pub fn new(buf: &'a mut B) -> Self {
        Self {
            buf,
            failed: false,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<'a, B, F> Iterator for UnumIter<'a, B, F>
where
    B: Buf,
    F: Family,
{
    type Item = Result<F::Value, DecodeError>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || !self.buf.has_remaining() {
            return None;
        }
        let next = self.buf.get_unum::<F>();
        self.failed = next.is_err();
        Some(next)
    }
}
