#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for line in devis::pdf::wrap_notes(s, devis::pdf::NOTES_WRAP_WIDTH) {
            assert!(line.chars().count() <= devis::pdf::NOTES_WRAP_WIDTH);
        }
    }
});
