use crate::{cli, context, rest, seed, storage};
use anyhow::{Context as AnyhowContext, Result};
use std::path::Path;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// The main application state.
/// decoupled from CLI parsing to allow for easier testing.
pub struct App<S = storage::SqliteStorage> {
    config: context::Context,
    storage: S,
    shutdown: CancellationToken,
}

impl App {
    /// Factory method to build the App from CLI arguments.
    /// Handles the "dirty" work of side-effects like logging init and filesystem creation.
    pub fn from_cli() -> Result<(App<storage::SqliteStorage>, cli::Cli)> {
        let cli = crate::cli::parse();

        // Configure logging file after CLI is parsed
        crate::tracing::set_log_file(cli.log_file.as_deref().map(Path::new));

        let ctx = context::Context::from_cli(&cli);
        log_startup_info(&ctx);

        let storage = init_storage(&ctx.data_dir, ctx.reset)?;

        Ok((App::new(ctx, storage), cli))
    }
}

impl<S: storage::Storage + Clone + Send + Sync + 'static> App<S> {
    /// Create a new App instance.
    /// Dependencies are injected here, making it easy to swap Storage for mocks.
    fn new(config: context::Context, storage: S) -> Self {
        Self {
            config,
            storage,
            shutdown: CancellationToken::new(),
        }
    }

    /// Main entry point for the daemon.
    pub async fn run_daemon(&mut self) -> Result<()> {
        self.reseed()?;

        let mut api_handle = self.spawn_api_server();
        self.wait_for_shutdown(&mut api_handle).await
    }

    /// Replace the stored collection with the canonical seed data.
    pub fn reseed(&self) -> Result<()> {
        seed::replace_states(&self.storage).context("seeding states collection")
    }

    fn spawn_api_server(&self) -> JoinHandle<()> {
        let addr = self.config.listen;
        let store = self.storage.clone();
        let cors_origin = self.config.cors_origin.clone();
        let token = self.shutdown.clone();

        tokio::spawn(async move {
            if let Err(e) = rest::serve(addr, store, &cors_origin, token).await {
                log::error!("API server failed: {:#}", e);
            }
        })
    }

    async fn wait_for_shutdown(&self, api_task: &mut JoinHandle<()>) -> Result<()> {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => log::info!("🧨 Ctrl-C received, shutting down..."),
            _ = &mut *api_task => log::error!("API task exited unexpectedly"),
        }

        // Broadcast shutdown signal
        self.shutdown.cancel();

        // Check is_finished() to avoid polling a completed JoinHandle (which panics)
        if !api_task.is_finished() {
            let _ = api_task.await;
        }

        log::info!("✅ Shutdown complete");
        Ok(())
    }
}

// --- Standalone Helpers ---

fn log_startup_info(ctx: &context::Context) {
    log::info!("🚀 Starting stateql");
    log::info!("🌐 API listen address: {}", ctx.listen);
    log::info!("🧭 CORS origin: {}", ctx.cors_origin);
    log::info!("📂 Data dir: {}", ctx.data_dir.to_string_lossy());
    if let Some(path) = ctx.log_file.as_deref() {
        log::info!("📝 Log file: {}", path);
    }
}

fn init_storage(data_dir: &Path, reset: bool) -> Result<storage::SqliteStorage> {
    std::fs::create_dir_all(data_dir)?;
    let db_path = data_dir
        .join("stateql.sqlite")
        .to_string_lossy()
        .into_owned();

    let sqlite = storage::SqliteStorage::new(&db_path);
    if reset {
        sqlite.reset_all().context("resetting storage")?;
    }
    sqlite.init().context("initializing storage")?;

    Ok(sqlite)
}

// --- Entry Point ---

pub async fn run() -> Result<()> {
    let (mut app, cli) = App::from_cli()?;

    // Handle one-shot commands
    if let Some(cmd) = &cli.cmd {
        return match cmd {
            cli::Command::Seed => app.reseed(),
        };
    }

    app.run_daemon().await
}
