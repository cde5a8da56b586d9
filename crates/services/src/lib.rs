#![forbid(unsafe_code)]

pub mod api_client;
pub mod app_services;
pub mod catalog_service;
pub mod error;
pub mod progress_service;
pub mod quiz;
pub mod welcome_audio;

pub use fraction_core::Clock;

pub use api_client::{ApiClient, ProgressReport};
pub use app_services::AppServices;
pub use catalog_service::CatalogService;
pub use error::{
    ApiClientError, AppServicesError, CatalogServiceError, IncompleteLesson, ProgressError,
    QuizError, WelcomeAudioError,
};
pub use progress_service::ProgressService;
pub use quiz::{
    Advance, AnswerFeedback, CompletedLesson, FlowStage, LessonFlow, OptionMark, QuizLoopService,
    QuizProgress, QuizSession, QuizSummary,
};
pub use welcome_audio::{
    OpenAiSpeech, SpeechConfig, SpeechRequest, SpeechSynthesizer, WelcomeAudio,
    WelcomeAudioService,
};
