//! CampusChain wallet CLI.
//!
//! # Usage
//!
//! ```bash
//! # Create an account and log in
//! campus-wallet register -u asha -p secret -r student
//! campus-wallet login -u asha -p secret
//!
//! # Student dashboard and canteen
//! campus-wallet student
//! campus-wallet canteen menu
//! campus-wallet canteen order 1:2 4
//!
//! # Parent dashboard for a given month
//! campus-wallet parent show --month 2026-02
//! campus-wallet parent fund --student 3 --amount 500
//! ```
//!
//! # Environment Variables
//!
//! - `CAMPUS_WALLET_API_URL`, `CAMPUS_WALLET_SESSION_FILE`,
//!   `CAMPUS_WALLET_TIMEOUT_SECS` - see `ClientConfig`
//! - `CAMPUS_WALLET_LOG_JSON` - set to `1` for JSON logs
//! - `SENTRY_DSN` - enables error reporting when set
//! - `RUST_LOG` - log filter (default: `warn`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use campus_wallet_cli::{App, CliError, commands};
use campus_wallet_client::{ClientConfig, ConfigOverrides};
use campus_wallet_core::{OrderId, Role, Rupees, SpendingCategory, UserId};

#[derive(Parser)]
#[command(name = "campus-wallet")]
#[command(author, version, about = "CampusChain campus wallet")]
struct Cli {
    /// API root (overrides `CAMPUS_WALLET_API_URL`)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session file (overrides `CAMPUS_WALLET_SESSION_FILE`)
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and save the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        /// `student`, `parent` or `vendor`
        #[arg(short, long, default_value = "student")]
        role: Role,
        /// Student to link (parents only)
        #[arg(long)]
        linked_student: Option<UserId>,
    },
    /// Forget the saved session
    Logout,
    /// Show the saved session
    Whoami,
    /// Student dashboard
    Student,
    /// Campus canteen
    Canteen {
        #[command(subcommand)]
        action: CanteenAction,
    },
    /// Parent dashboard
    Parent {
        #[command(subcommand)]
        action: ParentAction,
    },
    /// Vendor dashboard
    Vendor {
        #[command(subcommand)]
        action: VendorAction,
    },
    /// Admin dashboard
    Admin,
}

#[derive(Subcommand)]
enum CanteenAction {
    /// Show the menu and balance
    Menu,
    /// Order items given as `id[:qty]`
    Order {
        #[arg(required = true)]
        items: Vec<String>,
    },
    /// Show past orders
    Orders,
    /// Show the bill for an order
    Bill { order_id: OrderId },
}

#[derive(Subcommand)]
enum ParentAction {
    /// Linked students and spending
    Show {
        /// Student to show (default: first linked)
        #[arg(short, long)]
        student: Option<UserId>,
        /// Month as YYYY-MM (default: current month)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Add funds to a linked student
    Fund {
        #[arg(short, long)]
        student: UserId,
        #[arg(short, long)]
        amount: Rupees,
    },
    /// Link a student by ID
    Link {
        #[arg(short, long)]
        student: UserId,
    },
}

#[derive(Subcommand)]
enum VendorAction {
    /// Registration status, balance and QR payload
    Show,
    /// Register your shop
    Register {
        #[arg(short, long)]
        name: String,
        /// `food`, `events` or `stationery`
        #[arg(short, long, default_value = "food")]
        category: SpendingCategory,
    },
    /// Accept a payment from a student
    Pay {
        #[arg(short, long)]
        student: UserId,
        #[arg(short, long)]
        amount: Rupees,
        #[arg(short, long, default_value = "food")]
        category: SpendingCategory,
    },
    /// Orders paid to you
    Orders,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry() -> Option<sentry::ClientInitGuard> {
    let dsn = std::env::var("SENTRY_DSN").ok().filter(|dsn| !dsn.is_empty())?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: std::env::var("SENTRY_ENVIRONMENT")
                .ok()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            send_default_pii: false,
            ..Default::default()
        },
    ));

    tracing::debug!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    // Logs go to stderr so they never mix with rendered screens.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());

    let json = std::env::var("CAMPUS_WALLET_LOG_JSON").is_ok_and(|v| v == "1");
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env before reading SENTRY_DSN (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Pick one rustls crypto provider before any TLS client is built
    let _ = rustls::crypto::ring::default_provider().install_default();

    let _sentry_guard = init_sentry();
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{output}") {
                tracing::error!("Failed to write output: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            if e.needs_login() {
                tracing::info!("Command requires login: {e}");
            } else {
                tracing::error!("Command failed: {e}");
            }
            let _ = writeln!(std::io::stderr().lock(), "{e}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<String, CliError> {
    let config = ClientConfig::from_env_with(ConfigOverrides {
        api_url: cli.api_url,
        session_file: cli.session_file,
    })?;
    let app = App::from_config(&config)?;

    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&app, &username, &password).await
        }
        Commands::Register {
            username,
            password,
            role,
            linked_student,
        } => commands::auth::register(&app, &username, &password, role, linked_student).await,
        Commands::Logout => commands::auth::logout(&app),
        Commands::Whoami => commands::auth::whoami(&app),
        Commands::Student => commands::student::dashboard(&app).await,
        Commands::Canteen { action } => match action {
            CanteenAction::Menu => commands::canteen::menu(&app).await,
            CanteenAction::Order { items } => commands::canteen::order(&app, &items).await,
            CanteenAction::Orders => commands::canteen::orders(&app).await,
            CanteenAction::Bill { order_id } => commands::canteen::bill(&app, order_id).await,
        },
        Commands::Parent { action } => match action {
            ParentAction::Show { student, month } => {
                commands::parent::dashboard(&app, student, month.as_deref()).await
            }
            ParentAction::Fund { student, amount } => {
                commands::parent::fund(&app, student, amount).await
            }
            ParentAction::Link { student } => commands::parent::link(&app, student).await,
        },
        Commands::Vendor { action } => match action {
            VendorAction::Show => commands::vendor::dashboard(&app).await,
            VendorAction::Register { name, category } => {
                commands::vendor::register(&app, &name, category).await
            }
            VendorAction::Pay {
                student,
                amount,
                category,
            } => commands::vendor::pay(&app, student, amount, category).await,
            VendorAction::Orders => commands::vendor::orders(&app).await,
        },
        Commands::Admin => commands::admin::dashboard(&app).await,
    }
}
