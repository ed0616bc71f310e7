//! Readiness scoring.
//!
//! `100 - 5*deps - 3*instructions - 2*linked files - 1*type changes`,
//! clamped to `[0, 100]`. A table is ready at 70 or above.

/// Penalty per counted item.
pub mod weights {
    pub const DEPENDENCY: i64 = 5;
    pub const INSTRUCTION: i64 = 3;
    pub const LINKED_FILE: i64 = 2;
    pub const TYPE_CHANGE: i64 = 1;
}

pub const MAX_SCORE: u8 = 100;

/// Minimum score for a table to count as ready.
pub const READY_THRESHOLD: u8 = 70;

/// Counts feeding the readiness score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadinessInputs {
    pub dependencies: usize,
    pub instructions: usize,
    pub linked_files: usize,
    pub type_changes: usize,
}

impl ReadinessInputs {
    pub fn score(&self) -> u8 {
        let penalty = [
            (weights::DEPENDENCY, self.dependencies),
            (weights::INSTRUCTION, self.instructions),
            (weights::LINKED_FILE, self.linked_files),
            (weights::TYPE_CHANGE, self.type_changes),
        ]
        .into_iter()
        .fold(0i64, |acc, (weight, n)| {
            acc.saturating_add(weight.saturating_mul(count(n)))
        });

        let max = i64::from(MAX_SCORE);
        u8::try_from(max.saturating_sub(penalty).clamp(0, max)).unwrap_or(0)
    }
}

fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

pub fn is_ready(score: u8) -> bool {
    score >= READY_THRESHOLD
}
