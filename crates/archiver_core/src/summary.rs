use std::fmt;

use crate::{ArchiveCounters, ArchiveState};

/// Final report of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub counters: ArchiveCounters,
    /// Commits in the resulting history; `None` when version control was skipped.
    pub history_commits: Option<u64>,
}

impl ArchiveSummary {
    pub fn from_state(state: &ArchiveState) -> Self {
        Self {
            counters: state.counters(),
            history_commits: state.history_commits(),
        }
    }
}

impl fmt::Display for ArchiveSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.counters;
        write!(
            f,
            "Archived {} challenges with {} solutions in total ({} duplicates skipped)",
            c.challenges_archived, c.solutions_archived, c.duplicates_skipped
        )?;
        if let Some(commits) = self.history_commits {
            write!(f, " and created {commits} commits")?;
        }
        Ok(())
    }
}
