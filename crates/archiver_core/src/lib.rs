//! Archiver core: pure naming, deduplication and run state machine.
mod effect;
mod language;
mod msg;
mod naming;
mod solution;
mod state;
mod summary;
mod update;

pub use effect::Effect;
pub use language::{extension_for, Extension, LanguageMap};
pub use msg::Msg;
pub use naming::{readme_contents, sanitize_name, solution_filename, README_FILE};
pub use solution::{dedupe_solutions, ChallengeRecord, Solution, UniqueSolutions};
pub use state::{ArchiveCounters, ArchivePhase, ArchiveState, ArchiveWarning};
pub use summary::ArchiveSummary;
pub use update::{classify_page, update, PageVerdict};
