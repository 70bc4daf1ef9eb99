use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use afyanex::config::AppConfig;
use afyanex::db;
use afyanex::models::KnowledgeBase;
use afyanex::services::library::ConditionLibrary;
use afyanex::services::picker::{RandomPicker, SeededPicker, TemplatePicker};
use afyanex::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let knowledge = KnowledgeBase::load(config.knowledge_base_path.as_deref())?;
    tracing::info!(
        clinic = %knowledge.clinic.name,
        doctors = knowledge.doctors.len(),
        custom = config.knowledge_base_path.is_some(),
        "loaded knowledge base"
    );

    let library = ConditionLibrary::load(config.conditions_path.as_deref())?;
    tracing::info!(conditions = library.len(), "loaded condition library");

    let picker: Box<dyn TemplatePicker> = match config.template_seed {
        Some(seed) => {
            tracing::info!(seed, "using seeded template picker");
            Box::new(SeededPicker::new(seed))
        }
        None => Box::new(RandomPicker),
    };

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        knowledge,
        library,
        picker,
    });

    let app = afyanex::app(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
