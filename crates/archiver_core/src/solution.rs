use std::collections::HashSet;

use sha2::{Digest, Sha256};

/// One recorded submission for a challenge.
///
/// Identity is the code alone: two solutions with the same source text are
/// equal even if their timestamp or language differ.
#[derive(Debug, Clone)]
pub struct Solution {
    /// ISO-8601 completion instant, passed to the commit date unmodified.
    pub timestamp: String,
    pub language: String,
    pub code: String,
}

impl Solution {
    pub fn new(
        timestamp: impl Into<String>,
        language: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            language: language.into(),
            code: code.into(),
        }
    }

    fn digest(&self) -> [u8; 32] {
        Sha256::digest(self.code.as_bytes()).into()
    }
}

impl PartialEq for Solution {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Solution {}

/// A challenge as listed on one page, with its unique solutions in page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeRecord {
    /// Link relative to the site root.
    pub url: String,
    pub title: String,
    pub solutions: Vec<Solution>,
    /// Listed solutions dropped because an earlier one had the same code.
    pub duplicates: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UniqueSolutions {
    pub solutions: Vec<Solution>,
    pub duplicates: usize,
}

/// Single pass keeping the first occurrence of each distinct code, in order.
pub fn dedupe_solutions(listed: impl IntoIterator<Item = Solution>) -> UniqueSolutions {
    let mut seen = HashSet::new();
    let mut unique = UniqueSolutions::default();
    for solution in listed {
        if seen.insert(solution.digest()) {
            unique.solutions.push(solution);
        } else {
            unique.duplicates += 1;
        }
    }
    unique
}
