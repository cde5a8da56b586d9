use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::{DeserializeOwned, Error as _, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};

use fraction_core::model::{Lesson, LessonId, Question, QuizAttempt, UserProgress};
use storage::{CatalogRepository, ProgressRepository, ProgressUpdate, StorageError};

use crate::error::ApiClientError;

/// Body of `POST /api/progress`.
///
/// Counts accept any JSON number with a whole, non-negative value (`4` or `4.0`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    #[serde(deserialize_with = "non_blank_id")]
    pub lesson_id: LessonId,
    #[serde(deserialize_with = "whole_number")]
    pub score: u32,
    #[serde(deserialize_with = "whole_number")]
    pub total_questions: u32,
}

fn non_blank_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LessonId, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(D::Error::custom)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    // NaN and infinities have a NaN fractional part
    if value.fract() != 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&value) {
        return Err(D::Error::invalid_value(
            Unexpected::Float(value),
            &"a non-negative whole number",
        ));
    }
    Ok(value as u32)
}

/// Typed client for the fraction learning HTTP API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// # Errors
    ///
    /// Returns `ApiClientError` on transport failures or non-success statuses.
    pub async fn lessons(&self) -> Result<Vec<Lesson>, ApiClientError> {
        self.get_json("/api/lessons").await
    }

    /// `None` when the server answers 404.
    ///
    /// # Errors
    ///
    /// Returns `ApiClientError` on transport failures or other non-success statuses.
    pub async fn lesson(&self, id: &LessonId) -> Result<Option<Lesson>, ApiClientError> {
        let response = self.get(&format!("/api/lessons/{id}")).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(Self::json(response).await?))
    }

    /// # Errors
    ///
    /// Returns `ApiClientError` on transport failures or non-success statuses.
    pub async fn questions(&self, lesson_id: &LessonId) -> Result<Vec<Question>, ApiClientError> {
        self.get_json(&format!("/api/lessons/{lesson_id}/questions"))
            .await
    }

    /// # Errors
    ///
    /// Returns `ApiClientError` on transport failures or non-success statuses.
    pub async fn progress(&self) -> Result<UserProgress, ApiClientError> {
        self.get_json("/api/progress").await
    }

    /// # Errors
    ///
    /// Returns `ApiClientError` on transport failures or non-success statuses.
    pub async fn update_progress(
        &self,
        report: &ProgressReport,
    ) -> Result<UserProgress, ApiClientError> {
        let response = self
            .client
            .post(self.url("/api/progress"))
            .json(report)
            .send()
            .await?;
        Self::json(response).await
    }

    /// Raw `audio/wav` greeting bytes.
    ///
    /// # Errors
    ///
    /// Returns `ApiClientError` on transport failures or non-success statuses.
    pub async fn welcome_audio(&self, name: Option<&str>) -> Result<Vec<u8>, ApiClientError> {
        let mut request = self.client.get(self.url("/api/welcome-audio"));
        if let Some(name) = name {
            request = request.query(&[("name", name)]);
        }
        let response = Self::check(request.send().await?)?;
        Ok(response.bytes().await?.to_vec())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get(&self, path: &str) -> Result<Response, ApiClientError> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiClientError> {
        let response = self.get(path).await?;
        Self::json(response).await
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, ApiClientError> {
        Ok(Self::check(response)?.json().await?)
    }

    fn check(response: Response) -> Result<Response, ApiClientError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(ApiClientError::HttpStatus(response.status()))
        }
    }
}

impl From<ApiClientError> for StorageError {
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::HttpStatus(StatusCode::NOT_FOUND) => StorageError::NotFound,
            ApiClientError::Http(err) if err.is_decode() => {
                StorageError::Serialization(err.to_string())
            }
            other => StorageError::Connection(other.to_string()),
        }
    }
}

#[async_trait]
impl CatalogRepository for ApiClient {
    async fn list_lessons(&self) -> Result<Vec<Lesson>, StorageError> {
        Ok(self.lessons().await?)
    }

    async fn get_lesson(&self, id: &LessonId) -> Result<Option<Lesson>, StorageError> {
        Ok(self.lesson(id).await?)
    }

    async fn questions_for_lesson(&self, id: &LessonId) -> Result<Vec<Question>, StorageError> {
        Ok(self.questions(id).await?)
    }
}

#[async_trait]
impl ProgressRepository for ApiClient {
    async fn get_user_progress(&self) -> Result<UserProgress, StorageError> {
        Ok(self.progress().await?)
    }

    /// The server returns only the updated record, so new badges are diffed
    /// against a snapshot taken just before the update.
    async fn record_attempt(&self, attempt: &QuizAttempt) -> Result<ProgressUpdate, StorageError> {
        let before = self.progress().await?;
        let report = ProgressReport {
            lesson_id: attempt.lesson_id.clone(),
            score: attempt.score,
            total_questions: attempt.total_questions,
        };
        let progress = self.update_progress(&report).await?;
        let new_badges = progress
            .earned_badges
            .iter()
            .filter(|badge| !before.has_badge(**badge))
            .copied()
            .collect();
        Ok(ProgressUpdate {
            progress,
            new_badges,
        })
    }
}
