#![no_main]
use libfuzzer_sys::fuzz_target;
use xml2tree::parse;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(root) = parse(s) {
            let _ = root.to_encoded_text();
        }
    }
});
