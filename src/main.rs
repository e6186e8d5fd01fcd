use anyhow::Result;
use std::{sync::Arc, time::Duration};
use tokio::{signal, sync::broadcast, time::MissedTickBehavior};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wiredesk::application::{
    jobs::{SyncOutcome, TranslationSyncJob},
    ports::{
        events::ArticleEventPublisher, lock::LockManager, time::Clock,
        translation::TranslationProvider,
    },
    services::{ApplicationServices, Repositories},
};
use wiredesk::config::AppConfig;
use wiredesk::domain::article::ArticleEvent;
use wiredesk::infrastructure::{
    database,
    events::BroadcastArticleEvents,
    lock::RedisLockManager,
    repositories::{
        PostgresArticleReadRepository, PostgresArticleWriteRepository,
        PostgresSubscriberSequence, PostgresVocabularyRepository, PostgresWorkflowRepository,
    },
    time::SystemClock,
    translation::HttpTranslationClient,
};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let repos = Repositories {
        workflow: Arc::new(PostgresWorkflowRepository::new(pool.clone())),
        article_read: Arc::new(PostgresArticleReadRepository::new(pool.clone())),
        article_write: Arc::new(PostgresArticleWriteRepository::new(pool.clone())),
        vocabularies: Arc::new(PostgresVocabularyRepository::new(pool.clone())),
        sequences: Arc::new(PostgresSubscriberSequence::new(pool)),
    };

    let provider: Arc<dyn TranslationProvider> = Arc::new(HttpTranslationClient::new(
        config.translation_url().clone(),
        config.translation_auth(),
    )?);
    let locks: Arc<dyn LockManager> = Arc::new(RedisLockManager::from_url(config.redis_url())?);
    let broadcast = BroadcastArticleEvents::default();
    let listener = tokio::spawn(log_article_events(broadcast.subscribe()));
    let events: Arc<dyn ArticleEventPublisher> = Arc::new(broadcast);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let services = ApplicationServices::new(
        repos,
        provider,
        locks,
        events,
        clock,
        config.sync_settings(),
    );

    tracing::info!(
        every_secs = config.sync_interval().as_secs(),
        desk = %services.translation_sync.settings().desk,
        "translation sync scheduled"
    );
    run_scheduler(&services.translation_sync, config.sync_interval()).await;

    drop(services);
    listener.abort();
    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn run_scheduler(job: &TranslationSyncJob, every: Duration) {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            () = &mut shutdown => break,
            _ = ticker.tick() => run_cycle(job).await,
        }
    }
}

async fn run_cycle(job: &TranslationSyncJob) {
    match job.run().await {
        Ok(SyncOutcome::Completed(report)) => tracing::info!(
            candidates = report.candidates,
            updated = report.updated,
            pending = report.pending,
            skipped = report.processed() - report.updated - report.pending,
            "translation sync finished"
        ),
        Ok(SyncOutcome::LeaseLost(report) | SyncOutcome::TimedOut(report)) => tracing::warn!(
            candidates = report.candidates,
            processed = report.processed(),
            updated = report.updated,
            "translation sync stopped early"
        ),
        Ok(SyncOutcome::LockBusy) => tracing::debug!("translation sync skipped, lock busy"),
        Ok(SyncOutcome::MissingConfiguration(missing)) => {
            tracing::warn!(?missing, "translation sync not configured");
        }
        Err(err) => tracing::error!(error = %err, "translation sync failed"),
    }
}

async fn log_article_events(mut rx: broadcast::Receiver<ArticleEvent>) {
    loop {
        match rx.recv().await {
            Ok(ArticleEvent::Updated { id, stage, by, at }) => {
                let stage = stage.map(i64::from);
                let by = by.map(i64::from);
                tracing::info!(guid = %id, ?stage, ?by, %at, "article updated");
            }
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                tracing::warn!(missed, "article event listener lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
