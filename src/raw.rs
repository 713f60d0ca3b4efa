//! Bit-field routines for working with raw (u64) tagged values.
//!
//! Family types shuffle their values to/from raw values using the `core::Int` trait and describe
//! their layout with a tag width plus a `tag -> length` table. Everything here is parameterized
//! on those two things so the families never carry their own packing code.

/// Number of payload bits available in a `len` byte encoding with a `tag_bits` wide tag.
#[inline(always)]
pub(crate) const fn payload_bits(len: usize, tag_bits: u32) -> u32 {
    (len as u32) * 8 - tag_bits
}

/// Exclusive upper bound of the payload in a `len` byte encoding.
#[inline(always)]
pub(crate) const fn class_bound(len: usize, tag_bits: u32) -> u64 {
    1u64 << payload_bits(len, tag_bits)
}

/// Mask selecting the payload bits of a `len` byte encoding once it is loaded into a u64.
#[inline(always)]
const fn payload_mask(len: usize, tag_bits: u32) -> u64 {
    class_bound(len, tag_bits) - 1
}

/// Extract the tag from the first byte of an encoding.
#[inline(always)]
pub(crate) const fn tag(first: u8, tag_bits: u32) -> usize {
    (first >> (8 - tag_bits)) as usize
}

/// Returns the smallest tag whose length class can hold `v`, or `None` if no class can.
///
/// `lengths` must be sorted in ascending order, which holds for every family table.
#[inline]
pub(crate) fn min_tag(v: u64, lengths: &[usize], tag_bits: u32) -> Option<usize> {
    lengths
        .iter()
        .position(|&len| v < class_bound(len, tag_bits))
}

/// Writes `v` tagged with `tag` as a `len` byte big endian field into `out[..len]`.
///
/// The caller guarantees `out.len() >= len` and that `v` fits in the payload of the class.
#[inline]
pub(crate) fn pack(v: u64, tag: usize, len: usize, tag_bits: u32, out: &mut [u8]) {
    debug_assert!(v < class_bound(len, tag_bits));
    let tagged = ((tag as u64) << payload_bits(len, tag_bits)) | v;
    out[..len].copy_from_slice(&tagged.to_be_bytes()[8 - len..]);
}

/// Reassembles the payload of the `len` byte encoding at the start of `buf`.
///
/// The caller guarantees `buf.len() >= len`.
#[inline]
pub(crate) fn unpack(buf: &[u8], len: usize, tag_bits: u32) -> u64 {
    let mut be = [0u8; 8];
    be[8 - len..].copy_from_slice(&buf[..len]);
    u64::from_be_bytes(be) & payload_mask(len, tag_bits)
}
