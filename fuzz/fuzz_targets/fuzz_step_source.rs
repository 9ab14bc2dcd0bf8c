#![no_main]

use std::collections::HashSet;

use coachmark_core::parse_steps;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 4096 {
        return;
    }

    // Parsing must never panic; accepted lists must satisfy validation.
    let Ok(steps) = parse_steps(text) else {
        return;
    };
    assert!(!steps.is_empty(), "accepted an empty step list");
    let mut ids = HashSet::new();
    for step in &steps {
        assert!(ids.insert(step.id.as_str()), "duplicate id {:?}", step.id);
        assert!(!step.target_key.trim().is_empty(), "empty target key");
    }
});
