//! Blogshift - Blog data layer with online store migration
//!
//! Operator CLI over the shift-core routing layer:
//! - Routed writes and reads under the configured migration mode
//! - One-shot bulk copy from the source store to the destination store
//! - Inspection of the resolved read/write strategy
//!
//! Settings come from the environment (see `config`); `--mode` overrides
//! `MIGRATION_MODE`.

mod config;
mod render;

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use shift_core::{
    BlogStore, BulkMigration, IdScheme, MigrationMode, PostgresStore, Router, SimStore, SortMode,
    FEED_LIMIT_DEFAULT,
};

use crate::config::{AppConfig, StoreConfig};

// =============================================================================
// TigerStyle Constants
// =============================================================================

/// Application name
pub const APP_NAME: &str = "blogshift";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// CLI
// =============================================================================

/// Blog data layer with online migration between two stores
#[derive(Parser, Debug)]
#[command(name = APP_NAME)]
#[command(about = "Blog data layer with online migration between two stores")]
#[command(version)]
struct Cli {
    /// Migration mode (overrides MIGRATION_MODE)
    #[arg(long, global = true)]
    mode: Option<MigrationMode>,

    /// Enable verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Copy every record from the source store into the destination store
    Migrate,

    /// Print the resolved read/write strategy
    Strategy,

    /// Create a user
    AddUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },

    /// Create a post
    AddPost {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        content: String,
    },

    /// Create a comment
    AddComment {
        #[arg(long)]
        post_id: String,
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        content: String,
    },

    /// List users from the read store
    Users,

    /// Show the feed
    Feed {
        /// `date` (newest first) or `content`
        #[arg(long, default_value = "date")]
        sort: String,
        #[arg(long, default_value_t = FEED_LIMIT_DEFAULT)]
        limit: usize,
        /// Expand each post with its comments
        #[arg(long)]
        comments: bool,
    },

    /// Show one post with its comments
    Post { id: String },
}

// =============================================================================
// Stores
// =============================================================================

/// One opened store, kept concrete so it can be closed on shutdown.
enum StoreHandle {
    Memory(Arc<SimStore>),
    Postgres(Arc<PostgresStore>),
}

impl StoreHandle {
    async fn open(name: &str, config: &StoreConfig, scheme: IdScheme) -> anyhow::Result<Self> {
        if config.is_memory() {
            tracing::info!(store = name, %scheme, "using in-memory store");
            return Ok(Self::Memory(Arc::new(SimStore::new(name, scheme))));
        }
        let store = PostgresStore::connect(name, &config.endpoint, &config.namespace, scheme)
            .await
            .with_context(|| format!("failed to open {name} store"))?;
        tracing::info!(store = name, namespace = %config.namespace, %scheme, "connected");
        Ok(Self::Postgres(Arc::new(store)))
    }

    fn store(&self) -> Arc<dyn BlogStore> {
        match self {
            Self::Memory(store) => store.clone(),
            Self::Postgres(store) => store.clone(),
        }
    }

    async fn close(&self) {
        if let Self::Postgres(store) = self {
            store.close().await;
        }
    }
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let dotenv = dotenvy::dotenv();

    // Initialize logging
    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("{} v{}", APP_NAME, APP_VERSION);
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e).context("failed to read .env"),
    }

    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    let strategy = config.strategy();

    if matches!(cli.command, Command::Strategy) {
        println!("{}", render::strategy_lines(&strategy));
        return Ok(());
    }

    let source = StoreHandle::open("source", &config.source, IdScheme::ObjectId).await?;
    let destination =
        match StoreHandle::open("destination", &config.destination, IdScheme::Uuid).await {
            Ok(store) => store,
            Err(e) => {
                source.close().await;
                return Err(e);
            }
        };

    let result = match cli.command {
        Command::Migrate => migrate(&source, &destination).await,
        command => {
            let router = Router::new(source.store(), destination.store(), strategy);
            serve(&router, command).await
        }
    };

    source.close().await;
    destination.close().await;
    result
}

async fn migrate(source: &StoreHandle, destination: &StoreHandle) -> anyhow::Result<()> {
    let report = BulkMigration::new(source.store(), destination.store())
        .run()
        .await
        .context("bulk migration failed")?;

    println!("{report}");
    if report.unmapped_user_refs > 0 || report.unmapped_post_refs > 0 {
        tracing::warn!(
            users = report.unmapped_user_refs,
            posts = report.unmapped_post_refs,
            "references copied without remapping"
        );
    }
    Ok(())
}

async fn serve(router: &Router, command: Command) -> anyhow::Result<()> {
    prepare_schemas(router).await?;

    match command {
        Command::AddUser { name, email } => {
            render::print_json(&router.create_user(&name, &email).await?)
        }
        Command::AddPost {
            user_id,
            title,
            content,
        } => render::print_json(&router.create_post(&user_id, &title, &content).await?),
        Command::AddComment {
            post_id,
            user_id,
            content,
        } => render::print_json(&router.create_comment(&post_id, &user_id, &content).await?),
        Command::Users => render::print_json(&router.list_users().await?),
        Command::Feed {
            sort,
            limit,
            comments,
        } => {
            let sort = SortMode::from_param(&sort);
            if comments {
                render::print_json(&router.feed_with_comments(sort, limit).await?)
            } else {
                render::print_json(&router.feed_posts(sort, limit).await?)
            }
        }
        Command::Post { id } => match router.get_post_with_comments(&id).await? {
            Some(post) => render::print_json(&post),
            None => anyhow::bail!("post {id} not found"),
        },
        Command::Migrate | Command::Strategy => Ok(()),
    }
}

/// Create tables in every store the strategy touches.
async fn prepare_schemas(router: &Router) -> anyhow::Result<()> {
    let strategy = router.strategy();
    if strategy.read_a || strategy.write_a {
        router
            .store(shift_core::StoreSide::Source)
            .ensure_schema()
            .await
            .context("source schema setup failed")?;
    }
    if strategy.read_b || strategy.write_b {
        router
            .store(shift_core::StoreSide::Destination)
            .ensure_schema()
            .await
            .context("destination schema setup failed")?;
    }
    Ok(())
}
