use archiver_core::{dedupe_solutions, ChallengeRecord, Solution};
use archiver_logging::archiver_warn;
use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

const CHALLENGE_SELECTOR: &str = "div.list-item-solutions";
const TITLE_LINK_SELECTOR: &str = "div.item-title a";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },
    #[error("challenge #{index} on the page has no title link")]
    MissingTitle { index: usize },
    #[error("title link of '{title}' has no href")]
    MissingLink { title: String },
    #[error("solution #{position} of '{title}' has no language")]
    MissingLanguage { title: String, position: usize },
    #[error("solution #{position} of '{title}' has no completion timestamp")]
    MissingTimestamp { title: String, position: usize },
}

/// A parsed listing page.
pub struct ListingDocument {
    document: Html,
    challenge_selector: Selector,
    extractor: SolutionExtractor,
}

impl ListingDocument {
    pub fn parse(html: &str) -> Result<Self, ExtractError> {
        Ok(Self {
            document: Html::parse_document(html),
            challenge_selector: selector(CHALLENGE_SELECTOR)?,
            extractor: SolutionExtractor::new()?,
        })
    }

    /// Number of challenge fragments on the page; zero means an empty page.
    pub fn challenge_count(&self) -> usize {
        self.document.select(&self.challenge_selector).count()
    }

    /// Every challenge on the page, in page order.
    pub fn challenges(&self) -> Result<Vec<ChallengeRecord>, ExtractError> {
        self.document
            .select(&self.challenge_selector)
            .enumerate()
            .map(|(index, fragment)| self.extractor.extract(index, fragment))
            .collect()
    }
}

/// Turns one challenge fragment into its title, link and unique solutions.
pub struct SolutionExtractor {
    title_link: Selector,
}

impl SolutionExtractor {
    pub fn new() -> Result<Self, ExtractError> {
        Ok(Self {
            title_link: selector(TITLE_LINK_SELECTOR)?,
        })
    }

    /// `index` is the fragment's position on its page, used only in diagnostics.
    pub fn extract(
        &self,
        index: usize,
        fragment: ElementRef<'_>,
    ) -> Result<ChallengeRecord, ExtractError> {
        let link = fragment
            .select(&self.title_link)
            .next()
            .ok_or(ExtractError::MissingTitle { index })?;
        let title = link.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            return Err(ExtractError::MissingTitle { index });
        }
        let url = link
            .value()
            .attr("href")
            .ok_or_else(|| ExtractError::MissingLink {
                title: title.clone(),
            })?
            .to_string();

        let mut markers = Vec::new();
        collect_markers(*fragment, &mut markers);
        let listed = pair_markers(markers, &title)?;
        let unique = dedupe_solutions(listed);

        Ok(ChallengeRecord {
            url,
            title,
            solutions: unique.solutions,
            duplicates: unique.duplicates,
        })
    }
}

fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|err| ExtractError::Selector {
        selector: css.to_string(),
        message: err.to_string(),
    })
}

enum Marker {
    Code {
        language: Option<String>,
        code: String,
    },
    Timestamp(String),
}

/// Document-order walk collecting code blocks and their `time-ago` markers.
fn collect_markers(node: NodeRef<'_, Node>, markers: &mut Vec<Marker>) {
    if let Some(element) = ElementRef::wrap(node) {
        match element.value().name() {
            "code" => {
                markers.push(Marker::Code {
                    language: element.value().attr("data-language").map(str::to_string),
                    code: element.text().collect(),
                });
                return;
            }
            "time-ago" => {
                if let Some(datetime) = element.value().attr("datetime") {
                    markers.push(Marker::Timestamp(datetime.to_string()));
                }
                return;
            }
            _ => {}
        }
    }
    for child in node.children() {
        collect_markers(child, markers);
    }
}

/// Pairs each code block with the timestamp next to it, whichever comes first.
fn pair_markers(markers: Vec<Marker>, title: &str) -> Result<Vec<Solution>, ExtractError> {
    let mut solutions = Vec::new();
    let mut pending_code: Option<(Option<String>, String)> = None;
    let mut pending_timestamp: Option<String> = None;

    for marker in markers {
        match marker {
            Marker::Code { language, code } => {
                if pending_code.is_some() {
                    return Err(missing_timestamp(title, solutions.len()));
                }
                pending_code = Some((language, code));
            }
            Marker::Timestamp(timestamp) => pending_timestamp = Some(timestamp),
        }

        let (language, code, timestamp) = match (pending_code.take(), pending_timestamp.take()) {
            (Some((language, code)), Some(timestamp)) => (language, code, timestamp),
            (code, timestamp) => {
                pending_code = code;
                pending_timestamp = timestamp;
                continue;
            }
        };
        let position = solutions.len() + 1;
        let language = language.ok_or_else(|| ExtractError::MissingLanguage {
            title: title.to_string(),
            position,
        })?;
        if chrono::DateTime::parse_from_rfc3339(&timestamp).is_err() {
            archiver_warn!(
                "Timestamp '{}' of solution #{} of '{}' is not RFC 3339; passing it on as is",
                timestamp,
                position,
                title
            );
        }
        solutions.push(Solution::new(timestamp, language, code));
    }

    if pending_code.is_some() {
        return Err(missing_timestamp(title, solutions.len()));
    }
    Ok(solutions)
}

fn missing_timestamp(title: &str, paired: usize) -> ExtractError {
    ExtractError::MissingTimestamp {
        title: title.to_string(),
        position: paired + 1,
    }
}
