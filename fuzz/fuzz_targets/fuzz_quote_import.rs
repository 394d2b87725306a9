#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Malformed records may error, never panic.
        if let Ok((_, lines)) = devis::record::parse_quote_str(s) {
            for line in &lines {
                let _ = line.total_ex_tax();
            }
        }
    }
});
