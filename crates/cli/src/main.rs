mod project_commands;

use std::{path::PathBuf, sync::Arc, time::Duration};

use {
    clap::{Parser, Subcommand},
    monster_config::MonsterConfig,
    monster_projects::{FileStorage, HttpNovelApi, ProjectSession},
    monster_routing::{Navigation, NavigationGuard, RouteTable},
    tracing::{debug, info},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "monster", about = "Monster — novel project session client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file (skips discovery of monster.toml).
    #[arg(long, global = true, env = "MONSTER_CONFIG")]
    config: Option<PathBuf>,
    /// API base URL (overrides config value).
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Session storage file (overrides config value).
    #[arg(long, global = true)]
    storage: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Project management.
    Projects {
        #[command(subcommand)]
        action: project_commands::ProjectAction,
    },
    /// Run the navigation guard for a route path.
    Navigate { path: String },
    /// List known routes.
    Routes,
}

/// Logs go to stderr so command output stays clean on stdout.
fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<MonsterConfig> {
    let config = match &cli.config {
        Some(path) => monster_config::load_config(path)?,
        None => monster_config::discover_and_load(),
    };
    let mut config = monster_config::apply_env_overrides(config);

    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(path) = &cli.storage {
        config.storage.path = Some(path.clone());
    }
    Ok(config)
}

/// The single session for this process.
fn build_session(config: &MonsterConfig) -> anyhow::Result<Arc<ProjectSession>> {
    let api = HttpNovelApi::new(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
    )?;
    let storage_path = monster_config::resolve_storage_path(config);
    debug!(
        base_url = %api.base_url(),
        storage = %storage_path.display(),
        "building project session"
    );
    Ok(Arc::new(ProjectSession::new(
        Arc::new(api),
        Arc::new(FileStorage::new(storage_path)),
        config.storage.active_project_key.clone(),
    )))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "monster starting");

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Projects { action } => {
            let session = build_session(&config)?;
            project_commands::handle_projects(&session, action).await
        },
        Commands::Navigate { path } => {
            let guard = NavigationGuard::new(build_session(&config)?, RouteTable::standard());
            match guard.navigate(&path).await? {
                Navigation::Proceed(route) => println!("{} ({})", route.path, route.name),
                Navigation::Redirect(route) => {
                    println!("{} ({}): select a project first", route.path, route.name)
                },
            }
            Ok(())
        },
        Commands::Routes => {
            for route in RouteTable::standard().iter() {
                let scope = if route.requires_project {
                    "requires project"
                } else {
                    "open"
                };
                println!("{:<12} {:<12} {scope}", route.name, route.path);
            }
            Ok(())
        },
    }
}
