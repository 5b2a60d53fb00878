use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::network::{SessionClient, Transport};
use crate::vocabulary::{CourseData, ProgressedSkill, build_manifest};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexeme {
    pub text: String,
    pub translations: Vec<String>,
    #[serde(rename = "audioURL")]
    pub audio_url: Option<String>,
    #[serde(rename = "isNew")]
    pub is_new: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VocabularyPage {
    pub learned_lexemes: Vec<Lexeme>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pagination {
    pub next_start_index: Option<usize>,
    pub total_lexemes: usize,
}

/// Walks the learned-lexemes endpoint to completion.
///
/// The endpoint gives no termination guarantee of its own, so the walk
/// requires the cursor to strictly advance and stops after `max_pages`
/// requests.
pub struct VocabularyPaginator<'a, T: Transport> {
    client: &'a SessionClient<T>,
    max_pages: usize,
}

impl<'a, T: Transport> VocabularyPaginator<'a, T> {
    pub fn new(client: &'a SessionClient<T>) -> Self {
        Self {
            client,
            max_pages: client.config().max_pages,
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Build the progressed-skills manifest from the user's course path.
    pub fn progressed_skills(&self) -> Result<Vec<ProgressedSkill>> {
        let user_id = self.client.user_id().to_string();
        let url = self.client.config().user_by_id_url(&user_id, &["currentCourse"]);
        let data: CourseData = self.client.get_json(&url)?;
        let course = data
            .current_course
            .ok_or_else(|| Error::MissingField("currentCourse".to_string()))?;

        let manifest = build_manifest(&course)?;
        debug!("Progressed skills manifest has {} entries", manifest.len());
        Ok(manifest)
    }

    /// Every learned lexeme of the `learning` course taught from `source`.
    pub fn fetch_all(&self, learning: &str, source: &str) -> Result<Vec<Lexeme>> {
        let manifest = self.progressed_skills()?;
        self.fetch_with_manifest(learning, source, &manifest)
    }

    pub fn fetch_with_manifest(
        &self,
        learning: &str,
        source: &str,
        manifest: &[ProgressedSkill],
    ) -> Result<Vec<Lexeme>> {
        let body = json!({
            "lastTotalLexemeCount": 0,
            "progressedSkills": manifest,
        });
        let user_id = self.client.user_id();

        let mut cursor = 0;
        let mut lexemes: Vec<Lexeme> = Vec::new();

        for page_number in 1..=self.max_pages {
            let url = self
                .client
                .config()
                .learned_lexemes_url(user_id, learning, source, cursor);
            let page: VocabularyPage = self.client.post_json(&url, &body)?;

            lexemes.extend(page.learned_lexemes);
            let total = page.pagination.total_lexemes;
            debug!(
                "Page {} at {}: {} of {} lexemes",
                page_number,
                cursor,
                lexemes.len(),
                total
            );

            if lexemes.len() == total {
                info!("Fetched {} lexemes in {} pages", total, page_number);
                return Ok(lexemes);
            }
            // Past the total means a page was served twice. Never truncate.
            if lexemes.len() > total {
                return Err(Error::PaginationProtocol(format!(
                    "received {} lexemes but server reports {}",
                    lexemes.len(),
                    total
                )));
            }

            match page.pagination.next_start_index {
                Some(next) if next > cursor => cursor = next,
                next => {
                    return Err(Error::PaginationProtocol(format!(
                        "cursor did not advance from {} (next: {:?}) with {} of {} lexemes",
                        cursor,
                        next,
                        lexemes.len(),
                        total
                    )));
                }
            }
        }

        Err(Error::PaginationProtocol(format!(
            "total of {} lexemes not reached after {} pages",
            lexemes.len(),
            self.max_pages
        )))
    }
}
