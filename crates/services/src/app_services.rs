use std::sync::Arc;

use storage::{AudioCache, Storage, builtin_catalog};

use crate::Clock;
use crate::catalog_service::CatalogService;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;
use crate::quiz::QuizLoopService;
use crate::welcome_audio::{SpeechSynthesizer, WelcomeAudioService};

/// Assembles the app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<CatalogService>,
    progress: Arc<ProgressService>,
    quiz_loop: Arc<QuizLoopService>,
    welcome_audio: Arc<WelcomeAudioService>,
}

impl AppServices {
    /// Build services over the built-in catalog and a fresh in-memory progress record.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the built-in catalog fails validation.
    pub fn in_memory(
        clock: Clock,
        audio_cache: AudioCache,
        speech: Arc<dyn SpeechSynthesizer>,
    ) -> Result<Self, AppServicesError> {
        let catalog = builtin_catalog()?;
        log::info!(
            "loaded catalog: {} lessons, {} questions",
            catalog.lessons().len(),
            catalog.question_count()
        );
        Ok(Self::from_storage(
            clock,
            Storage::in_memory(catalog),
            audio_cache,
            speech,
        ))
    }

    /// Build services over any storage backend.
    #[must_use]
    pub fn from_storage(
        clock: Clock,
        storage: Storage,
        audio_cache: AudioCache,
        speech: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        let catalog = CatalogService::new(Arc::clone(&storage.catalog));
        let progress = ProgressService::new(Arc::clone(&storage.progress));
        let quiz_loop = QuizLoopService::new(clock, catalog.clone(), progress.clone());
        let welcome_audio = WelcomeAudioService::new(audio_cache, speech);

        Self {
            catalog: Arc::new(catalog),
            progress: Arc::new(progress),
            quiz_loop: Arc::new(quiz_loop),
            welcome_audio: Arc::new(welcome_audio),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn welcome_audio(&self) -> Arc<WelcomeAudioService> {
        Arc::clone(&self.welcome_audio)
    }
}
