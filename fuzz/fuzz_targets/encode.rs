#![no_main]

use libfuzzer_sys::fuzz_target;
use unum::{Family, Unum16, Unum32, Unum64, UnumBuf, UnumBufMut};

fuzz_target!(|data: &[u8]| {
    let mut dst = vec![];
    for chunk in data.chunks_exact(8) {
        let mut buf = [0; 8];
        buf.copy_from_slice(chunk);
        let n = u64::from_le_bytes(buf);
        match dst.put_unum::<Unum64>(n) {
            Ok(len) => assert_eq!(Unum64::encoded_len(n), Ok(len)),
            Err(_) => assert!(n >= Unum64::VALUE_BOUND),
        }
        let _ = dst.put_unum::<Unum32>(n as u32);
        let _ = dst.put_unum::<Unum16>(n as u16);
    }

    let mut src = &dst[..];
    for chunk in data.chunks_exact(8) {
        let mut buf = [0; 8];
        buf.copy_from_slice(chunk);
        let n = u64::from_le_bytes(buf);
        if n < Unum64::VALUE_BOUND {
            assert_eq!(src.get_unum::<Unum64>().unwrap(), n);
        }
        if u64::from(n as u32) < Unum32::VALUE_BOUND {
            assert_eq!(src.get_unum::<Unum32>().unwrap(), n as u32);
        }
        if u64::from(n as u16) < Unum16::VALUE_BOUND {
            assert_eq!(src.get_unum::<Unum16>().unwrap(), n as u16);
        }
    }
    assert!(src.is_empty());
});
