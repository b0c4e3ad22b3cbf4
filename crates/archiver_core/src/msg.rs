#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Output root created and version control initialized.
    Initialized,
    /// A listing page was fetched and parsed.
    PageObserved { challenges: usize },
    /// One challenge was fully written and committed.
    ChallengeArchived {
        solutions: usize,
        duplicates: usize,
        commits: usize,
    },
    /// A language had no extension mapping.
    UnknownLanguage { language: String, title: String },
    /// Every challenge of the current page has been archived.
    PageArchived,
    /// Readme sweep done; `history_commits` is the queried commit count, if any.
    Finalized {
        readme_commits: usize,
        history_commits: Option<u64>,
    },
    /// A fatal error interrupted the run.
    Failed,
}
