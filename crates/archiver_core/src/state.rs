/// Where the archive run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchivePhase {
    #[default]
    Init,
    Paging,
    Finalizing,
    Done,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArchiveCounters {
    pub challenges_archived: usize,
    pub solutions_archived: usize,
    pub duplicates_skipped: usize,
    pub commits_created: usize,
}

/// Non-fatal observations recorded during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveWarning {
    /// No extension mapping for the language; the identifier was used instead.
    UnknownLanguage { language: String, title: String },
}

/// Run-scoped state, owned by the orchestrator and advanced only through `update`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArchiveState {
    phase: ArchivePhase,
    page: u32,
    counters: ArchiveCounters,
    warnings: Vec<ArchiveWarning>,
    history_commits: Option<u64>,
}

impl ArchiveState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ArchivePhase {
        self.phase
    }

    /// Index of the page currently being fetched or archived.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn counters(&self) -> ArchiveCounters {
        self.counters
    }

    pub fn warnings(&self) -> &[ArchiveWarning] {
        &self.warnings
    }

    /// Commit count reported by version control after finalizing, if it was queried.
    pub fn history_commits(&self) -> Option<u64> {
        self.history_commits
    }

    pub(crate) fn set_phase(&mut self, phase: ArchivePhase) {
        self.phase = phase;
    }

    pub(crate) fn advance_page(&mut self) -> u32 {
        self.page += 1;
        self.page
    }

    pub(crate) fn counters_mut(&mut self) -> &mut ArchiveCounters {
        &mut self.counters
    }

    pub(crate) fn record_warning(&mut self, warning: ArchiveWarning) {
        self.warnings.push(warning);
    }

    pub(crate) fn set_history_commits(&mut self, commits: Option<u64>) {
        self.history_commits = commits;
    }
}
