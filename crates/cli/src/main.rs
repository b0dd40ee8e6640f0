//! Shopfront CLI - Browse the catalog, manage the cart and check out.
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! shop catalog list
//! shop catalog search smart
//!
//! # Cart
//! shop cart add 1 -q 2
//! shop cart show
//!
//! # Sign in and check out
//! shop login -e user@example.com -p password --redirect checkout
//! ```
//!
//! Cart and session persist in `SHOP_DATA_DIR` between invocations.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopfront_storefront::config::ShopConfig;
use shopfront_storefront::error::AppError;
use shopfront_storefront::navigation::{RecordingNavigator, ReturnTo};
use shopfront_storefront::services::NotificationLog;
use shopfront_storefront::state::AppState;
use shopfront_storefront::storage::FileStorage;

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about = "Shopfront demo storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Sign in with the demo account
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Where to continue after signing in (`checkout`)
        #[arg(short, long)]
        redirect: Option<String>,
    },
    /// Create an account and sign in
    Signup {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Check out the current cart
    Checkout,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List every product
    List,
    /// List featured products
    Featured,
    /// Show one product
    Show {
        /// Product ID
        id: String,
    },
    /// List products in a category
    Category {
        /// Category ID (e.g. `electronics`)
        id: String,
    },
    /// Search names, descriptions and categories
    Search {
        /// Search text
        query: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add a product
    Add {
        /// Product ID
        id: String,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product
    Remove {
        /// Product ID
        id: String,
    },
    /// Set the quantity of a product already in the cart
    Update {
        /// Product ID
        id: String,

        /// New quantity (values below 1 are ignored)
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Remove every line
    Clear,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ShopConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = match ShopConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            output::error(&e.to_string());
            return ExitCode::from(2);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber).
    // The guard flushes queued events when `main` returns.
    let _sentry_guard = init_sentry(&config);

    // Logs go to stderr so command output stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront_storefront=info,shop=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    finish(run(cli, config).await)
}

/// Report a failed command and map the outcome to an exit code.
fn finish(result: Result<(), AppError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            e.report();
            output::error(&e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: ShopConfig) -> Result<(), AppError> {
    let storage = Arc::new(FileStorage::open(&config.data_dir)?);
    let notifications = Arc::new(NotificationLog::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let notifier = Arc::new(commands::CliNotifier::new(Arc::clone(&notifications)));

    let state = AppState::new(config, storage, notifier, navigator.clone());

    let result = dispatch(&state, cli.command).await;

    output::notifications(&notifications.take());
    if let Some(route) = navigator.last() {
        output::navigation(&route);
    }

    state.shutdown();
    result
}

async fn dispatch(state: &AppState, command: Commands) -> Result<(), AppError> {
    match command {
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list(state),
            CatalogAction::Featured => commands::catalog::featured(state),
            CatalogAction::Show { id } => commands::catalog::show(state, &id)?,
            CatalogAction::Category { id } => commands::catalog::category(state, &id)?,
            CatalogAction::Search { query } => commands::catalog::search(state, &query),
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(state),
            CartAction::Add { id, quantity } => commands::cart::add(state, &id, quantity)?,
            CartAction::Remove { id } => commands::cart::remove(state, &id),
            CartAction::Update { id, quantity } => commands::cart::update(state, &id, quantity),
            CartAction::Clear => commands::cart::clear(state),
        },
        Commands::Login {
            email,
            password,
            redirect,
        } => {
            let redirect = redirect.as_deref().and_then(ReturnTo::from_query);
            commands::session::login(state, &email, &password, redirect).await?;
        }
        Commands::Signup {
            name,
            email,
            password,
        } => commands::session::signup(state, &name, &email, &password).await?,
        Commands::Logout => commands::session::logout(state),
        Commands::Whoami => commands::session::whoami(state),
        Commands::Checkout => commands::checkout::run(state),
    }
    Ok(())
}
