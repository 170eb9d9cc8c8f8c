#![no_main]

use libfuzzer_sys::fuzz_target;

use lambda_entropy::analyze_entropy;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let a = analyze_entropy(&s);
    let b = analyze_entropy(&s);
    assert_eq!(a.total_score.to_bits(), b.total_score.to_bits());

    for score in [
        a.normalized_entropy,
        a.character_diversity,
        a.pattern_score,
        a.randomness_score,
        a.total_score,
    ] {
        assert!((0.0..=1.0).contains(&score), "{score} out of range for {s:?}");
    }
    assert!(a.shannon_entropy >= 0.0);
});
