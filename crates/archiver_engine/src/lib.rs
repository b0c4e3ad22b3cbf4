//! Archiver engine: fetching, extraction, persistence, version control and the run loop.
mod archive;
mod decode;
mod extract;
mod fetch;
mod persist;
mod types;
mod vcs;

pub use archive::{ArchiveReport, ArchiveSettings, Archiver};
pub use decode::{decode_body, DecodeError, DecodedBody};
pub use extract::{ExtractError, ListingDocument, SolutionExtractor};
pub use fetch::{FetchSettings, ListingTarget, PageSource, ReqwestPageSource};
pub use persist::{create_challenge_dir, create_output_root, AtomicFileWriter, PersistError};
pub use types::{ArchiveError, FailureKind, FetchError, FetchedPage};
pub use vcs::{GitReplayer, VcsError, VersionControl};
