use crate::{ArchivePhase, ArchiveState, ArchiveWarning, Effect, Msg};

/// How a fetched listing page is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageVerdict {
    /// The page lists challenges to archive.
    Archive,
    /// An empty page after at least one non-empty one: pagination is over.
    Exhausted,
    /// The very first page is empty: bad credential or no completed work.
    InvalidSession,
}

/// Same observation, two meanings: an empty page is fatal only at index 0.
pub fn classify_page(page: u32, challenges: usize) -> PageVerdict {
    match (page, challenges) {
        (0, 0) => PageVerdict::InvalidSession,
        (_, 0) => PageVerdict::Exhausted,
        _ => PageVerdict::Archive,
    }
}

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ArchiveState, msg: Msg) -> (ArchiveState, Vec<Effect>) {
    let effects = match msg {
        Msg::Initialized => {
            if state.phase() == ArchivePhase::Init {
                state.set_phase(ArchivePhase::Paging);
                vec![Effect::FetchPage { page: state.page() }]
            } else {
                Vec::new()
            }
        }
        Msg::PageObserved { challenges } => {
            if state.phase() != ArchivePhase::Paging {
                return (state, Vec::new());
            }
            match classify_page(state.page(), challenges) {
                PageVerdict::Archive => vec![Effect::ArchivePage { page: state.page() }],
                PageVerdict::Exhausted => {
                    state.set_phase(ArchivePhase::Finalizing);
                    vec![Effect::Finalize]
                }
                PageVerdict::InvalidSession => {
                    state.set_phase(ArchivePhase::Failed);
                    vec![Effect::RejectSession]
                }
            }
        }
        Msg::ChallengeArchived {
            solutions,
            duplicates,
            commits,
        } => {
            if state.phase() == ArchivePhase::Paging {
                let counters = state.counters_mut();
                counters.challenges_archived += 1;
                counters.solutions_archived += solutions;
                counters.duplicates_skipped += duplicates;
                counters.commits_created += commits;
            }
            Vec::new()
        }
        Msg::UnknownLanguage { language, title } => {
            state.record_warning(ArchiveWarning::UnknownLanguage { language, title });
            Vec::new()
        }
        Msg::PageArchived => {
            if state.phase() == ArchivePhase::Paging {
                let next = state.advance_page();
                vec![Effect::FetchPage { page: next }]
            } else {
                Vec::new()
            }
        }
        Msg::Finalized {
            readme_commits,
            history_commits,
        } => {
            if state.phase() == ArchivePhase::Finalizing {
                state.counters_mut().commits_created += readme_commits;
                state.set_history_commits(history_commits);
                state.set_phase(ArchivePhase::Done);
                vec![Effect::Report]
            } else {
                Vec::new()
            }
        }
        Msg::Failed => {
            state.set_phase(ArchivePhase::Failed);
            Vec::new()
        }
    };

    (state, effects)
}
