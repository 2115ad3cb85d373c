#![no_main]
use libfuzzer_sys::fuzz_target;
use xml2tree::{EventKind, Parser, StructuralEvent};

// Arbitrary event sequences must be rejected or built, never panic
fuzz_target!(|data: &[u8]| {
    let events: Vec<StructuralEvent> = data
        .iter()
        .map(|b| match b % 3 {
            0 => StructuralEvent::open("a"),
            1 => StructuralEvent::close("a"),
            _ => StructuralEvent::bare(EventKind::Complete),
        })
        .collect();
    let _ = Parser::new().build(events);
});
