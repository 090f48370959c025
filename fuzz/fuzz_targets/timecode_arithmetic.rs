#![no_main]

use libfuzzer_sys::fuzz_target;

use clockity_core::{RawTime, TimeCode};

fuzz_target!(|input: (u32, u32, String)| {
    let (a, b, digits) = input;
    let a = TimeCode::from_deciseconds(a as u64);
    let b = TimeCode::from_deciseconds(b as u64);
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };

    let diff = TimeCode::difference(hi, lo);
    assert_eq!(lo + diff, hi);

    let mut stepped = hi;
    stepped.increment();
    stepped.decrement().unwrap();
    assert_eq!(stepped, hi);

    if let Ok(raw) = TimeCode::parse_digits(&digits) {
        let once = raw.normalize_overflow();
        assert_eq!(RawTime::from(once).normalize_overflow(), once);
    }
});
