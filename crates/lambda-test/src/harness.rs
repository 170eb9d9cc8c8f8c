//! Generation load drivers

use std::collections::HashSet;
use std::thread;

use lambda_core::TierLevel;
use lambda_runtime::{GenerationError, LambdaEngine};

/// What a load run produced
#[derive(Clone, Debug, Default)]
pub struct UniquenessReport {
    /// Every issued ID, in no particular order
    pub issued: Vec<String>,
    /// Calls that returned an error
    pub errors: Vec<GenerationError>,
    /// IDs issued more than once
    pub duplicates: usize,
}

impl UniquenessReport {
    fn from_runs(runs: Vec<(Vec<String>, Vec<GenerationError>)>) -> Self {
        let mut report = UniquenessReport::default();
        for (issued, errors) in runs {
            report.issued.extend(issued);
            report.errors.extend(errors);
        }

        let mut seen = HashSet::with_capacity(report.issued.len());
        report.duplicates = report.issued.iter().filter(|id| !seen.insert(id.as_str())).count();
        report
    }

    pub fn all_unique(&self) -> bool {
        self.duplicates == 0
    }

    pub fn attempted(&self) -> usize {
        self.issued.len() + self.errors.len()
    }
}

fn run(engine: &LambdaEngine, tier: TierLevel, count: usize) -> (Vec<String>, Vec<GenerationError>) {
    let mut issued = Vec::with_capacity(count);
    let mut errors = Vec::new();
    for _ in 0..count {
        match engine.generate(tier, None, None) {
            Ok(id) => issued.push(id.into_string()),
            Err(err) => errors.push(err),
        }
    }
    (issued, errors)
}

/// Generate `count` IDs on the calling thread
pub fn sequential_generate(engine: &LambdaEngine, tier: TierLevel, count: usize) -> UniquenessReport {
    UniquenessReport::from_runs(vec![run(engine, tier, count)])
}

/// Generate `per_thread` IDs on each of `threads` scoped threads sharing
/// one engine
pub fn concurrent_generate(
    engine: &LambdaEngine,
    tier: TierLevel,
    threads: usize,
    per_thread: usize,
) -> UniquenessReport {
    let runs = thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|_| scope.spawn(|| run(engine, tier, per_thread)))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    });

    UniquenessReport::from_runs(runs)
}
