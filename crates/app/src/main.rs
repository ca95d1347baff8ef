use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AppServices, AuthService, ChatConfig, ChatService, Clock, DashboardService, ForumService,
    PlannerService, ProgressService,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://brainbridge.sqlite3";

#[derive(Parser, Debug)]
#[command(name = "brainbridge", about = "Study companion desktop app")]
struct Cli {
    /// SQLite database URL or file path
    #[arg(long, global = true, env = "BRAIN_DB_URL", default_value = DEFAULT_DB_URL)]
    db: String,

    /// Log filter, e.g. `info` or `services=debug` (falls back to RUST_LOG)
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Launch the desktop window (default)
    Ui,
    /// Insert sample forum posts and a demo account with study tasks
    Seed,
}

#[derive(Debug)]
enum ArgsError {
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn clock(&self) -> Clock {
        self.services.clock()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn chat(&self) -> Arc<ChatService> {
        self.services.chat()
    }

    fn planner(&self) -> Arc<PlannerService> {
        self.services.planner()
    }

    fn forum(&self) -> Arc<ForumService> {
        self.services.forum()
    }

    fn dashboard(&self) -> Arc<DashboardService> {
        self.services.dashboard()
    }
}

fn init_tracing(cli_filter: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let filter = match cli_filter {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?,
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

fn normalize_sqlite_url(raw: &str) -> Result<String, ArgsError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: raw.to_string(),
        });
    }
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite:file:") {
        return Ok(trimmed.to_string());
    }

    let rest = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("sqlite:"))
        .unwrap_or(trimmed);
    let (path_str, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };
    if path_str.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: raw.to_string(),
        });
    }

    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    Ok(match query {
        Some(query) => format!("sqlite://{}?{query}", absolute.display()),
        None => format!("sqlite://{}", absolute.display()),
    })
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" || db_url.starts_with("sqlite:file:") {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let db_url = normalize_sqlite_url(&cli.db)?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&db_url)?;
    let chat = ChatConfig::from_env()?;
    if chat.is_none() {
        tracing::info!("BRAIN_AI_API_KEY not set; study assistant disabled");
    }
    let services = AppServices::new_sqlite(&db_url, Clock::default_clock(), chat).await?;
    tracing::info!(db = %db_url, "storage ready");

    match cli.command.unwrap_or(Command::Ui) {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
            let context = build_app_context(&app);

            // Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("BrainBridge")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Seed => {
            let report = services.seed_demo_data().await?;
            println!(
                "seeded {} forum posts, {} todos (demo account {}) in {db_url}",
                report.forum_posts,
                report.todos,
                if report.demo_account_created {
                    "created"
                } else {
                    "already present"
                },
            );
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = init_tracing(cli.log.as_deref()) {
        eprintln!("{err}");
        std::process::exit(2);
    }
    if let Err(err) = run(cli).await {
        // At this layer (binary glue), printing once is fine.
        tracing::error!(error = %err, "brainbridge failed");
        eprintln!("{err}");
        std::process::exit(2);
    }
}
