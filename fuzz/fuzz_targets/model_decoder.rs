#![no_main]

use libfuzzer_sys::fuzz_target;
use lerad::dataset::AttributeSchema;
use lerad::model_store::ModelEncoding;

fuzz_target!(|data: &[u8]| {
    // Decoding and rule validation must reject bad input, never panic
    let schema = AttributeSchema::new(["protocol", "service", "flag", "class"]);
    for encoding in [ModelEncoding::Json, ModelEncoding::MessagePack] {
        if let Ok(model) = encoding.decode(data) {
            let _ = model.into_rule_set(Some(&schema));
        }
    }
});
