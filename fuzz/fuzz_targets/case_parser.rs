#![no_main]

use libfuzzer_sys::fuzz_target;
use lerad::dataset::{parse_cases, AttributeSchema};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Schema from the first line, cases from the rest
        let (head, rest) = input.split_once('\n').unwrap_or((input, ""));
        if let Ok(schema) = AttributeSchema::parse(head, "fuzz-schema") {
            let _ = parse_cases(rest, &schema, "fuzz-cases");
        }
    }
});
