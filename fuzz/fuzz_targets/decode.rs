#![no_main]

use libfuzzer_sys::fuzz_target;
use unum::{Family, Unum16, Unum32, Unum64};

fn check<F: Family>(data: &[u8]) {
    // attempts to decode all the data; errors are ok, panics are not
    let mut src = data;
    while let Ok((_, len)) = F::decode(src) {
        assert_eq!(len, F::len_from_tag(src[0]));
        src = &src[len..];
    }
}

fuzz_target!(|data: &[u8]| {
    check::<Unum16>(data);
    check::<Unum32>(data);
    check::<Unum64>(data);
});
