//! This module implements a tagged variable length coding scheme for unsigned integers.
//!
//! Each encoded value carries a tag in the high bits of its first byte that declares the total
//! length of the encoding, followed by the big endian payload in the remaining bits. A decoder
//! learns how many bytes to consume from the first byte alone, so no external length field is
//! needed and streams never have to be read ahead.
//!
//! Three families are provided, differing only in tag width and length table:
//!
//! | family   | tag bits | bytes        | values      |
//! |----------|----------|--------------|-------------|
//! | `Unum16` | 1        | 1, 2         | `[0, 2^15)` |
//! | `Unum32` | 2        | 1, 2, 3, 4   | `[0, 2^30)` |
//! | `Unum64` | 2        | 1, 2, 4, 8   | `[0, 2^62)` |
//!
//! The encoder always produces the minimal encoding. The decoder accepts any encoding whose
//! declared length is available, including non-minimal ones; `Family::decode_canonical()` rejects
//! those.
//!
//! `Family` includes methods to code values directly to/from byte slices, `read_unum()` and
//! `write_unum()` handle values on `std::io::{Read,Write}`, and with the `bytes` feature (on by
//! default) traits are provided to extend `bytes::{Buf,BufMut}`.
//!
//! ```
//! use unum::{Family, Unum64};
//!
//! // value_buf is the maximum size needed to encode a value.
//! let mut value_buf = [0u8; unum::MAX_LEN];
//! assert_eq!(Unum64::encode(&mut value_buf, 167894).unwrap(), 4);
//! assert_eq!((167894u64, 4), Unum64::decode(&value_buf).unwrap());
//!
//! let mut stream = vec![];
//! for v in (0..100).step_by(3) {
//!   Unum64::write_to(&mut stream, v).unwrap();
//! }
//!
//! let mut src = stream.as_slice();
//! while let Ok((v, _)) = Unum64::read_from(&mut src) {
//!   assert_eq!(v % 3, 0);
//! }
//! assert!(src.is_empty());
//! ```
#[cfg(feature = "bytes")]
mod bytes;
pub(crate) mod core;
mod io;
mod raw;

#[cfg(feature = "bytes")]
pub use crate::bytes::{UnumBuf, UnumBufMut, UnumIter};
pub use crate::core::{DecodeError, EncodeError, EncodedUnum, Family, Unum16, Unum32, Unum64};
pub use crate::io::{read_unum, read_unum_buf, write_unum, ReadError, WriteError};

/// Maximum number of bytes a single encoded value of any family will occupy.
pub const MAX_LEN: usize = 8;
