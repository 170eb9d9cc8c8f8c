//! Statistical randomness tests over a character sequence

use std::collections::BTreeMap;

/// Character frequency table. Ordered so that every fold over it is
/// deterministic.
pub type Frequencies = BTreeMap<char, usize>;

pub fn frequencies(chars: &[char]) -> Frequencies {
    let mut freq = Frequencies::new();
    for &c in chars {
        *freq.entry(c).or_insert(0) += 1;
    }
    freq
}

/// Shannon entropy in bits per character
pub fn shannon_entropy(freq: &Frequencies, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let n = total as f64;
    let h: f64 = freq
        .values()
        .map(|&count| {
            let p = count as f64 / n;
            -p * p.log2()
        })
        .sum();
    // -0.0 for a single repeated character
    h.max(0.0)
}

/// Chi-squared uniformity of the observed distribution, scaled to `[0,1]`.
///
/// `1.0` means every distinct character occurs equally often. The statistic
/// is divided by its maximum, `n·(k-1)`.
pub fn uniformity_score(freq: &Frequencies, total: usize) -> f64 {
    let k = freq.len();
    if total == 0 || k <= 1 {
        return 0.0;
    }
    let n = total as f64;
    let expected = n / k as f64;
    let chi2: f64 = freq
        .values()
        .map(|&count| {
            let diff = count as f64 - expected;
            diff * diff / expected
        })
        .sum();
    (1.0 - chi2 / (n * (k as f64 - 1.0))).clamp(0.0, 1.0)
}

/// Number of maximal runs of identical consecutive characters
pub fn count_runs(chars: &[char]) -> usize {
    if chars.is_empty() {
        return 0;
    }
    1 + chars.windows(2).filter(|w| w[0] != w[1]).count()
}

/// Expected number of runs for `n` characters over an alphabet of `k`
pub fn expected_runs(n: usize, k: usize) -> f64 {
    if n == 0 || k == 0 {
        return 0.0;
    }
    1.0 + (n as f64 - 1.0) * (1.0 - 1.0 / k as f64)
}

/// Runs test. Fewer runs than expected means characters cluster; that is
/// penalized proportionally. Reaching the expected count scores `1.0`.
/// A single-symbol alphabet scores `0.0`.
pub fn runs_score(chars: &[char], alphabet: usize) -> f64 {
    if alphabet <= 1 {
        return 0.0;
    }
    let expected = expected_runs(chars.len(), alphabet);
    if expected <= 0.0 {
        return 0.0;
    }
    let observed = count_runs(chars) as f64;
    if observed >= expected {
        1.0
    } else {
        (observed / expected).clamp(0.0, 1.0)
    }
}

/// Equal-weight combination of the uniformity and runs tests
pub fn randomness_score(chars: &[char], freq: &Frequencies) -> f64 {
    if chars.is_empty() {
        return 0.0;
    }
    let uniformity = uniformity_score(freq, chars.len());
    let runs = runs_score(chars, freq.len());
    0.5 * uniformity + 0.5 * runs
}
