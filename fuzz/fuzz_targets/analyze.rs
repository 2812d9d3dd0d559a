#![no_main]

use libfuzzer_sys::fuzz_target;
use vigenere::analysis::{analyze_bytes, AnalysisConfig};
use vigenere::cipher::{decrypt_bytes, encrypt_bytes, Key};

fuzz_target!(|data: &[u8]| {
    // Analysis must not panic on any byte sequence
    if let Ok(report) = analyze_bytes(data, &AnalysisConfig::default()) {
        let _ = report.decrypt_bytes(data);
    }

    // Round trip with a key derived from the input's letters
    let letters: String = data
        .iter()
        .filter(|b| b.is_ascii_alphabetic())
        .take(16)
        .map(|&b| char::from(b))
        .collect();
    if let Ok(key) = Key::new(&letters) {
        assert_eq!(decrypt_bytes(&encrypt_bytes(data, &key), &key), data);
    }
});
