use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use prepcoach_api::{build_router, state::AppState};
use prepcoach_config::Settings;
use prepcoach_db::indexes::ensure_indexes;
use prepcoach_evaluation::scorer::{OpenAiBackend, OpenAiConfig};
use prepcoach_evaluation::{
    EvaluationConfig, EvaluationPipeline, LanguageRegistry, RubricCatalog, RubricEvaluator,
};
use prepcoach_services::dao::{EvaluationDao, SessionDao, TurnDao};
use prepcoach_services::stores::{MongoEvaluationStore, MongoTranscriptStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load().context("loading settings")?;

    let client = mongodb::Client::with_uri_str(&settings.database.uri)
        .await
        .context("connecting to mongodb")?;
    let db = client.database(&settings.database.name);
    ensure_indexes(&db).await.context("ensuring indexes")?;

    let sessions = Arc::new(SessionDao::new(&db));
    let turns = Arc::new(TurnDao::new(&db));
    let evaluations = Arc::new(EvaluationDao::new(&db));

    let catalog = RubricCatalog::load_builtin().context("loading rubric catalog")?;
    let backend = OpenAiBackend::new(OpenAiConfig {
        api_url: settings.scoring.api_url.clone(),
        api_key: settings.scoring.api_key.clone(),
        model: settings.scoring.model.clone(),
        temperature: settings.scoring.temperature,
        max_output_tokens: settings.scoring.max_output_tokens,
        timeout: Duration::from_secs(settings.scoring.timeout_secs),
    })
    .context("building scoring backend")?;

    let pipeline = Arc::new(EvaluationPipeline::new(
        Arc::new(MongoTranscriptStore::new(sessions.clone(), turns.clone())),
        Arc::new(MongoEvaluationStore::new(
            sessions.clone(),
            evaluations.clone(),
        )),
        RubricEvaluator::new(catalog, Arc::new(backend)),
        LanguageRegistry::builtin(),
        EvaluationConfig {
            min_user_turns: settings.evaluation.min_user_turns,
            min_total_words: settings.evaluation.min_total_words,
            min_words_per_answer: settings.evaluation.min_words_per_answer,
        },
    ));

    let state = AppState {
        sessions,
        turns,
        evaluations,
        pipeline,
        settings: Arc::new(settings.clone()),
    };

    let app = build_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "PrepCoach API listening");

    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}
