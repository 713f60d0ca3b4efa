#![no_main]

use libfuzzer_sys::fuzz_target;
use unum::{read_unum, read_unum_buf, Unum32};

fuzz_target!(|data: &[u8]| {
    // attempts to decode all the data as a Unum32; errors are ok, panics are not
    let mut src = data;
    while !src.is_empty() {
        if read_unum::<Unum32, _>(&mut src).is_err() {
            break;
        }
    }

    // do buffered reader
    let mut src = data;
    let mut src = std::io::BufReader::new(&mut src);
    while read_unum_buf::<Unum32, _>(&mut src).is_ok() {}
});
