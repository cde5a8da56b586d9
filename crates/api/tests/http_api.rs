use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use fraction_core::model::{Badge, LessonId};
use fraction_core::time::fixed_clock;
use services::{
    ApiClient, AppServices, ProgressService, SpeechRequest, SpeechSynthesizer, WelcomeAudioError,
};
use storage::AudioCache;

#[derive(Default)]
struct CountingSpeech {
    calls: AtomicUsize,
}

#[async_trait]
impl SpeechSynthesizer for CountingSpeech {
    async fn synthesize(&self, _request: &SpeechRequest) -> Result<Vec<u8>, WelcomeAudioError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(b"RIFF0000WAVE".to_vec())
    }
}

struct TestApp {
    router: Router,
    speech: Arc<CountingSpeech>,
    _cache: tempfile::TempDir,
}

fn test_app() -> TestApp {
    let cache = tempfile::tempdir().unwrap();
    let speech = Arc::new(CountingSpeech::default());
    let services =
        AppServices::in_memory(fixed_clock(), AudioCache::new(cache.path()), speech.clone())
            .unwrap();
    TestApp {
        router: api::router(services),
        speech,
        _cache: cache,
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    let (status, body) = send(router, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_progress(router: &Router, body: Value) -> (StatusCode, Value) {
    let request = Request::post("/api/progress")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, body) = send(router, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn banner_is_served_at_root() {
    let app = test_app();
    let (status, body) = send(&app.router, Request::get("/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, api::BANNER.as_bytes());
}

#[tokio::test]
async fn lessons_are_listed_in_order() {
    let app = test_app();
    let (status, body) = get_json(&app.router, "/api/lessons").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["lesson-1", "lesson-2", "lesson-3"]);
    assert!(body[0]["whyItMatters"].is_string());
}

#[tokio::test]
async fn unknown_lesson_is_404() {
    let app = test_app();
    let (status, body) = get_json(&app.router, "/api/lessons/unknown-id").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Lesson not found"}));
}

#[tokio::test]
async fn blank_lesson_id_is_404_with_no_questions() {
    let app = test_app();
    let (status, body) = get_json(&app.router, "/api/lessons/%20").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Lesson not found"}));

    let (status, body) = get_json(&app.router, "/api/lessons/%20/questions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn questions_use_wire_field_names() {
    let app = test_app();
    let (status, body) = get_json(&app.router, "/api/lessons/lesson-1/questions").await;
    assert_eq!(status, StatusCode::OK);
    let first = &body[0];
    assert_eq!(first["id"], "q1");
    assert_eq!(first["type"], "visual-select");
    assert_eq!(first["visualType"], "pizza");
    assert_eq!(first["correctAnswer"], "3/4");
    assert!(first["question"].is_string());

    let orders: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["order"].as_u64().unwrap())
        .collect();
    assert_eq!(orders, [1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn unknown_lesson_has_no_questions() {
    let app = test_app();
    let (status, body) = get_json(&app.router, "/api/lessons/unknown-id/questions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn fresh_progress_record() {
    let app = test_app();
    let (status, body) = get_json(&app.router, "/api/progress").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": "user-1",
            "totalCorrect": 0,
            "currentStreak": 1,
            "bestStreak": 1,
            "earnedBadges": [],
            "lessonProgress": []
        })
    );
}

#[tokio::test]
async fn perfect_update_earns_badge() {
    let app = test_app();
    let (status, body) = post_progress(
        &app.router,
        json!({"lessonId": "lesson-1", "score": 5, "totalQuestions": 5}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalCorrect"], 5);
    assert_eq!(body["earnedBadges"], json!(["Perfect Score"]));
    assert_eq!(
        body["lessonProgress"],
        json!([{
            "lessonId": "lesson-1",
            "completed": true,
            "score": 5,
            "totalQuestions": 5,
            "correctAnswers": 5,
            "attempts": 1
        }])
    );
}

#[tokio::test]
async fn malformed_updates_are_400() {
    let app = test_app();
    let bodies = [
        json!({"lessonId": "lesson-1", "score": "5", "totalQuestions": 5}),
        json!({"lessonId": "lesson-1", "totalQuestions": 5}),
        json!({"lessonId": "", "score": 1, "totalQuestions": 5}),
        json!({"lessonId": "lesson-1", "score": -1, "totalQuestions": 5}),
        json!({"lessonId": 7, "score": 1, "totalQuestions": 5}),
        json!({"lessonId": "lesson-1", "score": 4.5, "totalQuestions": 5}),
    ];
    for body in bodies {
        let (status, reply) = post_progress(&app.router, body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(reply, json!({"error": "Invalid request body"}));
    }

    let (_, progress) = get_json(&app.router, "/api/progress").await;
    assert_eq!(progress["totalCorrect"], 0);
}

#[tokio::test]
async fn whole_valued_float_scores_are_accepted() {
    let app = test_app();
    let (status, progress) = post_progress(
        &app.router,
        json!({"lessonId": "lesson-1", "score": 4.0, "totalQuestions": 5.0}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(progress["totalCorrect"], 4);
    assert_eq!(progress["lessonProgress"][0]["score"], 4);
    assert_eq!(progress["lessonProgress"][0]["totalQuestions"], 5);
}

#[tokio::test]
async fn welcome_audio_is_cached_per_name() {
    let app = test_app();

    for uri in ["/api/welcome-audio?name=Sam", "/api/welcome-audio?name=sam"] {
        let response = app
            .router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/wav");
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "public, max-age=86400"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"RIFF0000WAVE");
    }

    assert_eq!(app.speech.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn welcome_audio_failure_is_500() {
    let cache = tempfile::tempdir().unwrap();
    let services = AppServices::in_memory(
        fixed_clock(),
        AudioCache::new(cache.path()),
        Arc::new(services::OpenAiSpeech::new(None)),
    )
    .unwrap();
    let router = api::router(services);

    let (status, body) = get_json(&router, "/api/welcome-audio").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to generate welcome audio"}));
}

#[tokio::test]
async fn client_drives_quiz_against_live_server() {
    let app = test_app();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router.clone();
    tokio::spawn(async move { axum::serve(listener, router).await });

    let client = Arc::new(ApiClient::new(format!("http://{addr}")));
    assert!(client.lesson(&LessonId::new("nope")).await.unwrap().is_none());
    assert_eq!(client.lessons().await.unwrap().len(), 3);

    let progress = ProgressService::new(client.clone());
    progress
        .record_attempt(LessonId::new("lesson-1"), 4, 5)
        .await
        .unwrap();
    let update = progress
        .record_attempt(LessonId::new("lesson-2"), 5, 5)
        .await
        .unwrap();
    assert_eq!(update.progress.total_correct, 9);
    assert_eq!(update.new_badges, vec![Badge::PerfectScore]);

    let again = progress
        .record_attempt(LessonId::new("lesson-3"), 5, 5)
        .await
        .unwrap();
    assert_eq!(again.new_badges, vec![Badge::SuperStar]);

    let audio = client.welcome_audio(Some("Ada")).await.unwrap();
    assert_eq!(audio, b"RIFF0000WAVE");
}
