//! Adapters for reading/writing tagged values on `std::io` streams.
use std::io::{self, BufRead, ErrorKind, Read, Write};

use thiserror::Error;

use crate::core::unpack_value;
use crate::{DecodeError, EncodeError, Family, MAX_LEN};

/// Errors that may occur when reading a value from a stream.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The stream ended before the first byte of a value.
    #[error("stream is empty")]
    StreamEmpty,
    /// The stream ended partway through a value.
    #[error("truncated encoding: read {read} of {expected} bytes")]
    InvalidEncoding { read: usize, expected: usize },
    /// The underlying stream failed.
    #[error("stream error after {read} bytes")]
    Io {
        read: usize,
        #[source]
        source: io::Error,
    },
}

impl ReadError {
    /// Number of bytes consumed from the stream before the failure.
    pub fn bytes_read(&self) -> usize {
        match self {
            ReadError::StreamEmpty => 0,
            ReadError::InvalidEncoding { read, .. } | ReadError::Io { read, .. } => *read,
        }
    }
}

/// Errors that may occur when writing a value to a stream.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The value could not be encoded. Nothing was written.
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// The underlying stream failed.
    #[error("stream error after {written} bytes")]
    Io {
        written: usize,
        #[source]
        source: io::Error,
    },
}

impl WriteError {
    /// Number of bytes accepted by the stream before the failure.
    pub fn bytes_written(&self) -> usize {
        match self {
            WriteError::Encode(_) => 0,
            WriteError::Io { written, .. } => *written,
        }
    }
}

impl From<EncodeError> for io::Error {
    fn from(value: EncodeError) -> Self {
        let kind = match value {
            EncodeError::ValueTooLarge { .. } => ErrorKind::InvalidInput,
            EncodeError::BufferTooSmall { .. } => ErrorKind::WriteZero,
        };
        io::Error::new(kind, value)
    }
}

impl From<DecodeError> for io::Error {
    fn from(value: DecodeError) -> Self {
        let kind = match value {
            DecodeError::BufferEmpty | DecodeError::InvalidEncoding { .. } => {
                ErrorKind::UnexpectedEof
            }
            DecodeError::NonCanonical { .. } => ErrorKind::InvalidData,
        };
        io::Error::new(kind, value)
    }
}

impl From<ReadError> for io::Error {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::Io { source, .. } => source,
            e => io::Error::new(ErrorKind::UnexpectedEof, e),
        }
    }
}

impl From<WriteError> for io::Error {
    fn from(value: WriteError) -> Self {
        match value {
            WriteError::Io { source, .. } => source,
            WriteError::Encode(e) => e.into(),
        }
    }
}

/// Reads until `buf` is full or the stream ends, retrying interrupted reads.
///
/// Returns the number of bytes read; the error, if any, did not come from end-of-stream.
fn read_full<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> (usize, Option<io::Error>) {
    let mut n = 0;
    while n < buf.len() {
        match r.read(&mut buf[n..]) {
            Ok(0) => break,
            Ok(m) => n += m,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return (n, Some(e)),
        }
    }
    (n, None)
}

/// Writes all of `buf`, retrying interrupted writes.
///
/// On failure returns the number of bytes accepted before the error.
fn write_full<W: Write + ?Sized>(w: &mut W, buf: &[u8]) -> Result<(), (usize, io::Error)> {
    let mut n = 0;
    while n < buf.len() {
        match w.write(&buf[n..]) {
            Ok(0) => {
                return Err((
                    n,
                    io::Error::new(ErrorKind::WriteZero, "failed to write whole value"),
                ))
            }
            Ok(m) => n += m,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err((n, e)),
        }
    }
    Ok(())
}

/// Encode `v` and write it to `w`. Returns the number of bytes written.
#[inline]
pub fn write_unum<F: Family, W: Write + ?Sized>(
    w: &mut W,
    v: F::Value,
) -> Result<usize, WriteError> {
    let enc = F::to_bytes(v)?;
    write_full(w, enc.as_slice())
        .map_err(|(written, source)| WriteError::Io { written, source })?;
    Ok(enc.len())
}

/// Read and decode a value from `r`, returning the value and number of bytes read.
///
/// Reads the tag byte, then exactly the number of continuation bytes the tag declares. Never
/// reads past the end of the value.
///
/// Prefer `read_unum_buf()` wherever possible as it should be more efficient.
pub fn read_unum<F: Family, R: Read + ?Sized>(r: &mut R) -> Result<(F::Value, usize), ReadError> {
    let mut buf = [0u8; MAX_LEN];
    match read_full(r, &mut buf[..1]) {
        (_, Some(source)) => return Err(ReadError::Io { read: 0, source }),
        (0, None) => return Err(ReadError::StreamEmpty),
        _ => {}
    }

    let len = F::len_from_tag(buf[0]);
    if len > 1 {
        let (n, err) = read_full(r, &mut buf[1..len]);
        let read = n + 1;
        if let Some(source) = err {
            return Err(ReadError::Io { read, source });
        }
        if read < len {
            return Err(ReadError::InvalidEncoding {
                read,
                expected: len,
            });
        }
    }

    Ok((unpack_value::<F>(&buf, len), len))
}

/// Read and decode a value from `r`, returning the value and number of bytes read.
///
/// When the reader's buffer already holds the whole value it is decoded in place.
pub fn read_unum_buf<F: Family, R: BufRead + ?Sized>(
    r: &mut R,
) -> Result<(F::Value, usize), ReadError> {
    loop {
        let buf = match r.fill_buf() {
            Ok(buf) => buf,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(source) => return Err(ReadError::Io { read: 0, source }),
        };
        let Some(&first) = buf.first() else {
            return Err(ReadError::StreamEmpty);
        };
        let len = F::len_from_tag(first);
        if buf.len() < len {
            return read_unum::<F, R>(r);
        }
        let v = unpack_value::<F>(buf, len);
        r.consume(len);
        return Ok((v, len));
    }
}
