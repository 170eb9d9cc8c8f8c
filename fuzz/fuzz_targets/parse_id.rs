#![no_main]

use libfuzzer_sys::fuzz_target;

use lambda_core::{matches_grammar, LambdaId, RawParts};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    let parsed = LambdaId::parse(s);
    assert_eq!(parsed.is_ok(), matches_grammar(s));

    if let Ok(id) = parsed {
        assert_eq!(id.as_str(), s);
        let parts = RawParts::split(s).expect("grammar-valid IDs split");
        assert_eq!(parts.timestamp_hash, id.timestamp_hash());
        assert_eq!(parts.entropy_hash, id.entropy_hash());
        assert_eq!(parts.symbol.chars().next(), Some(id.symbol()));
    } else {
        let _ = RawParts::split(s);
    }
});
