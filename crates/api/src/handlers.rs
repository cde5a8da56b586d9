use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use serde::Deserialize;

use fraction_core::model::{Lesson, LessonId, Question, UserProgress};
use services::{AppServices, CatalogServiceError, ProgressError, ProgressReport};

use crate::error::{ApiError, internal};

pub const BANNER: &str = "Fraction Fun API";

/// Cache lifetime browsers may keep a greeting for.
const WELCOME_AUDIO_CACHE_CONTROL: &str = "public, max-age=86400";

pub async fn index() -> &'static str {
    BANNER
}

pub async fn list_lessons(State(app): State<AppServices>) -> Result<Json<Vec<Lesson>>, ApiError> {
    let lessons = app
        .catalog()
        .lessons()
        .await
        .map_err(internal("Failed to fetch lessons"))?;
    Ok(Json(lessons))
}

pub async fn get_lesson(
    State(app): State<AppServices>,
    Path(id): Path<String>,
) -> Result<Json<Lesson>, ApiError> {
    // a blank id names no lesson
    let Ok(id) = id.parse::<LessonId>() else {
        return Err(ApiError::NotFound);
    };
    match app.catalog().lesson(&id).await {
        Ok(lesson) => Ok(Json(lesson)),
        Err(CatalogServiceError::LessonNotFound(_)) => Err(ApiError::NotFound),
        Err(err) => Err(internal("Failed to fetch lesson")(err)),
    }
}

pub async fn lesson_questions(
    State(app): State<AppServices>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Question>>, ApiError> {
    let Ok(id) = id.parse::<LessonId>() else {
        return Ok(Json(Vec::new()));
    };
    let questions = app
        .catalog()
        .questions(&id)
        .await
        .map_err(internal("Failed to fetch questions"))?;
    Ok(Json(questions))
}

pub async fn get_progress(State(app): State<AppServices>) -> Result<Json<UserProgress>, ApiError> {
    let progress = app
        .progress()
        .user_progress()
        .await
        .map_err(internal("Failed to fetch progress"))?;
    Ok(Json(progress))
}

pub async fn update_progress(
    State(app): State<AppServices>,
    body: Result<Json<ProgressReport>, JsonRejection>,
) -> Result<Json<UserProgress>, ApiError> {
    let Json(report) = body.map_err(|rejection| {
        log::debug!("rejected progress update: {rejection}");
        ApiError::BadRequest
    })?;

    match app
        .progress()
        .record_attempt(report.lesson_id, report.score, report.total_questions)
        .await
    {
        Ok(update) => Ok(Json(update.progress)),
        Err(ProgressError::EmptyLessonId) => Err(ApiError::BadRequest),
        Err(err) => Err(internal("Failed to update progress")(err)),
    }
}

#[derive(Debug, Deserialize)]
pub struct WelcomeAudioQuery {
    name: Option<String>,
}

pub async fn welcome_audio(
    State(app): State<AppServices>,
    Query(query): Query<WelcomeAudioQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let audio = app
        .welcome_audio()
        .greeting(query.name.as_deref())
        .await
        .map_err(internal("Failed to generate welcome audio"))?;

    Ok((
        [
            (header::CONTENT_TYPE, "audio/wav"),
            (header::CACHE_CONTROL, WELCOME_AUDIO_CACHE_CONTROL),
        ],
        audio.bytes,
    ))
}
