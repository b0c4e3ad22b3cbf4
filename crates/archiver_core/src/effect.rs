#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchPage { page: u32 },
    /// Archive the challenges of the page just observed.
    ArchivePage { page: u32 },
    /// The first page held no challenges: the session is invalid or nothing was solved.
    RejectSession,
    /// Commit all readmes in one batch and query the history size.
    Finalize,
    Report,
}
