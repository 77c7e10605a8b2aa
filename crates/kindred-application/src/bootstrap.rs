//! Startup wiring shared by the binaries.

use crate::question_source::question_source_for;
use crate::quiz_usecase::QuizUseCase;
use crate::result_persister::ResultPersister;
use anyhow::{Context, Result};
use kindred_core::assessment::AssessmentRepository;
use kindred_core::config::{AppConfig, SecretConfig};
use kindred_core::secret::SecretService;
use kindred_core::session::WizardPolicy;
use kindred_infrastructure::{
    ConfigStorage, GEMINI_API_KEY_ENV, KindredPaths, SecretServiceImpl,
    build_assessment_repository,
};
use kindred_interaction::{GeminiApiAgent, GenerationGateway, LlmClient, PromptBuilder};
use std::sync::Arc;

/// Loaded configuration plus the services built from it.
pub struct AppContext {
    pub paths: KindredPaths,
    pub config: AppConfig,
    secret_service: SecretServiceImpl,
    secrets: SecretConfig,
}

impl AppContext {
    /// Reads config.toml and secret.json. A missing secret.json is only an
    /// error once something needs a credential.
    pub async fn load(paths: KindredPaths) -> Result<Self> {
        let config = ConfigStorage::from_paths(&paths)?
            .load()
            .context("Failed to load config.toml")?;

        let secret_service = SecretServiceImpl::new(&paths)?;
        let secrets = match secret_service.load_secrets().await {
            Ok(secrets) => secrets,
            Err(e) => {
                tracing::warn!(error = %e, "no secrets loaded");
                SecretConfig::default()
            }
        };

        Ok(Self {
            paths,
            config,
            secret_service,
            secrets,
        })
    }

    pub fn policy(&self) -> WizardPolicy {
        WizardPolicy::from(&self.config.quiz)
    }

    pub async fn repository(&self) -> Result<Arc<dyn AssessmentRepository>> {
        Ok(build_assessment_repository(
            &self.config.persistence,
            &self.paths,
            &self.secrets,
        )
        .await?)
    }

    pub fn prompt_builder(&self) -> PromptBuilder {
        PromptBuilder::new(self.config.quiz.question_count)
    }

    pub async fn gateway(&self) -> Result<Arc<GenerationGateway>> {
        let agent = GeminiApiAgent::try_from_secrets(
            &self.secret_service,
            self.config.generation.model.as_deref(),
        )
        .await
        .with_context(|| {
            format!(
                "No Gemini API key. Set {GEMINI_API_KEY_ENV} or fill in gemini.api_key in {}",
                self.paths
                    .secret_file()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "secret.json".to_string())
            )
        })?;
        tracing::info!(model = %agent.model(), "Gemini client ready");

        Ok(Arc::new(
            GenerationGateway::new(Arc::new(agent), self.prompt_builder())
                .with_timeout(self.config.generation.request_timeout()),
        ))
    }

    /// A ready-to-start quiz session.
    pub async fn quiz(&self) -> Result<QuizUseCase> {
        let gateway = self.gateway().await?;
        let questions = question_source_for(self.config.quiz.question_source, gateway.clone());
        let persister = Arc::new(ResultPersister::new(
            self.repository().await?,
            self.config.persistence.user_id.clone(),
        ));
        Ok(QuizUseCase::new(self.policy(), questions, gateway, persister))
    }
}
