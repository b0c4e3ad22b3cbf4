use std::collections::VecDeque;
use std::path::PathBuf;

use archiver_core::{
    readme_contents, sanitize_name, solution_filename, update, ArchiveState, ArchiveSummary,
    ArchiveWarning, ChallengeRecord, Effect, LanguageMap, Msg, README_FILE,
};
use archiver_logging::{archiver_debug, archiver_info, archiver_warn};

use crate::extract::ListingDocument;
use crate::fetch::PageSource;
use crate::persist::{create_challenge_dir, create_output_root, AtomicFileWriter};
use crate::vcs::VersionControl;
use crate::ArchiveError;

#[derive(Debug, Clone)]
pub struct ArchiveSettings {
    pub output_dir: PathBuf,
    /// Prefix for the relative challenge links written to each readme.
    pub base_url: String,
    pub username: String,
    pub languages: LanguageMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReport {
    pub summary: ArchiveSummary,
    pub warnings: Vec<ArchiveWarning>,
}

/// Drives one archive run: paging, writing, committing and the readme sweep.
pub struct Archiver {
    settings: ArchiveSettings,
    source: Box<dyn PageSource>,
    vcs: Box<dyn VersionControl>,
}

impl Archiver {
    pub fn new(
        settings: ArchiveSettings,
        source: Box<dyn PageSource>,
        vcs: Box<dyn VersionControl>,
    ) -> Self {
        Self {
            settings,
            source,
            vcs,
        }
    }

    /// Runs to completion. On error the partial output tree is left in place.
    pub async fn run(&self) -> Result<ArchiveReport, ArchiveError> {
        let mut state = ArchiveState::new();
        if let Err(err) = self.drive(&mut state).await {
            archiver_debug!(
                "Archive run failed in phase {:?} at page {}",
                state.phase(),
                state.page()
            );
            apply(&mut state, Msg::Failed);
            return Err(err);
        }

        Ok(ArchiveReport {
            summary: ArchiveSummary::from_state(&state),
            warnings: state.warnings().to_vec(),
        })
    }

    async fn drive(&self, state: &mut ArchiveState) -> Result<(), ArchiveError> {
        create_output_root(&self.settings.output_dir)?;
        self.vcs.run(&["init"])?;

        let mut effects = VecDeque::from(apply(state, Msg::Initialized));
        let mut records = Vec::new();

        while let Some(effect) = effects.pop_front() {
            match effect {
                Effect::FetchPage { page } => {
                    records = self.fetch_records(page).await?;
                    effects.extend(apply(
                        state,
                        Msg::PageObserved {
                            challenges: records.len(),
                        },
                    ));
                }
                Effect::ArchivePage { page } => {
                    archiver_info!("Page: {}", page);
                    for record in records.drain(..) {
                        self.archive_challenge(state, record)?;
                    }
                    effects.extend(apply(state, Msg::PageArchived));
                }
                Effect::RejectSession => {
                    return Err(ArchiveError::EmptyFirstPage {
                        username: self.settings.username.clone(),
                    });
                }
                Effect::Finalize => {
                    let readme_commits = self.commit_readmes()?;
                    let history_commits = self.query_history()?;
                    effects.extend(apply(
                        state,
                        Msg::Finalized {
                            readme_commits,
                            history_commits,
                        },
                    ));
                    if let Some(history) = history_commits {
                        let issued = state.counters().commits_created as u64;
                        if history != issued {
                            archiver_warn!(
                                "History holds {} commits but {} were created by this run",
                                history,
                                issued
                            );
                        }
                    }
                }
                Effect::Report => {}
            }
        }
        Ok(())
    }

    async fn fetch_records(&self, page: u32) -> Result<Vec<ChallengeRecord>, ArchiveError> {
        let fetched = self
            .source
            .fetch_page(page)
            .await
            .map_err(|source| ArchiveError::Fetch { page, source })?;
        archiver_debug!("Page {} decoded as {}", page, fetched.encoding_label);

        ListingDocument::parse(&fetched.html)
            .and_then(|document| document.challenges())
            .map_err(|source| ArchiveError::Extract { page, source })
    }

    /// One directory, one readme, then write-add-commit per unique solution.
    fn archive_challenge(
        &self,
        state: &mut ArchiveState,
        record: ChallengeRecord,
    ) -> Result<(), ArchiveError> {
        let dir_name = sanitize_name(&record.title);
        let dir = create_challenge_dir(&self.settings.output_dir, &dir_name)?;
        let writer = AtomicFileWriter::new(dir);
        writer.write_new(
            README_FILE,
            &readme_contents(&record.title, &self.settings.base_url, &record.url),
        )?;

        let total = record.solutions.len();
        let mut commits = 0;
        for (index, solution) in record.solutions.iter().enumerate() {
            let extension = self.settings.languages.extension_for(&solution.language);
            if extension.is_fallback() {
                archiver_warn!(
                    "No extension known for language '{}' in '{}'; using '{}'",
                    solution.language,
                    record.title,
                    extension.as_str()
                );
                apply(
                    state,
                    Msg::UnknownLanguage {
                        language: solution.language.clone(),
                        title: record.title.clone(),
                    },
                );
            }

            let filename = solution_filename(index, total, extension.as_str());
            writer.write_new(&filename, &format!("{}\n", solution.code))?;

            let tracked_path = format!("{dir_name}/{filename}");
            let message = format!("Add {filename}\n\nKata name: {}", record.title);
            self.vcs.run(&["add", "--", &tracked_path])?;
            self.vcs
                .run(&["commit", "--date", &solution.timestamp, "--message", &message])?;
            if self.vcs.is_active() {
                commits += 1;
            }
        }

        if record.duplicates > 0 {
            archiver_info!(
                "Skipped {} duplicate solution(s) of '{}'",
                record.duplicates,
                record.title
            );
        }
        archiver_info!("Archived '{}' with {} solution(s)", record.title, total);

        apply(
            state,
            Msg::ChallengeArchived {
                solutions: total,
                duplicates: record.duplicates,
                commits,
            },
        );
        Ok(())
    }

    /// Readmes carry no completion time, so they go in one undated batch commit.
    fn commit_readmes(&self) -> Result<usize, ArchiveError> {
        let pathspec = format!("*{README_FILE}");
        let message = format!("Add {README_FILE} files");
        self.vcs.run(&["add", "--", &pathspec])?;
        self.vcs.run(&["commit", "--message", &message])?;
        Ok(usize::from(self.vcs.is_active()))
    }

    fn query_history(&self) -> Result<Option<u64>, ArchiveError> {
        if !self.vcs.is_active() {
            return Ok(None);
        }
        let raw = self.vcs.query(&["rev-list", "--count", "HEAD"])?;
        match raw.parse::<u64>() {
            Ok(count) => Ok(Some(count)),
            Err(_) => {
                archiver_warn!("Unexpected commit count output '{}'", raw);
                Ok(None)
            }
        }
    }
}

fn apply(state: &mut ArchiveState, msg: Msg) -> Vec<Effect> {
    let (next, effects) = update(std::mem::take(state), msg);
    *state = next;
    effects
}
