//! Server lifecycle management helpers.
//!
//! Encapsulates the heavy lifting so `main.rs` stays a thin orchestrator:
//! opening storage, building the application context, provisioning the
//! bootstrap admin account, and running the HTTP server.

use crate::config::ServerConfig;
use actix_web::{middleware::Logger, web, App, HttpServer};
use agrareg_api::{routes, StoreUserRepo};
use agrareg_auth::password::hash_password;
use agrareg_auth::UserRepository;
use agrareg_commons::{Role, User, UserId};
use agrareg_core::app_context::PARTITIONS;
use agrareg_core::AppContext;
use agrareg_store::{RocksDbBackend, StorageBackend};
use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

/// Open RocksDB and build the shared application context.
pub async fn bootstrap(config: &ServerConfig) -> Result<Arc<AppContext>> {
    let db_path = &config.storage.rocksdb_path;
    std::fs::create_dir_all(db_path)?;

    let backend: Arc<dyn StorageBackend> = Arc::new(
        RocksDbBackend::open(db_path, PARTITIONS)
            .map_err(|e| anyhow::anyhow!("Failed to open storage at {}: {}", db_path, e))?,
    );
    info!("Storage opened at {}", db_path);

    let ctx = AppContext::init(backend)
        .map_err(|e| anyhow::anyhow!("Failed to initialize application context: {}", e))?;

    create_bootstrap_admin(config, &ctx).await?;

    Ok(ctx)
}

/// Create the configured admin account when the registry has no users yet.
///
/// Worker accounts self-register over HTTP; the first admin has to come from
/// configuration.
async fn create_bootstrap_admin(config: &ServerConfig, ctx: &Arc<AppContext>) -> Result<()> {
    let admin = match &config.auth.bootstrap_admin {
        Some(admin) => admin,
        None => return Ok(()),
    };

    let user_count = {
        let users = ctx.users.clone();
        tokio::task::spawn_blocking(move || users.user_count())
            .await?
            .map_err(|e| anyhow::anyhow!("Failed to count users: {}", e))?
    };
    if user_count > 0 {
        return Ok(());
    }

    let password_hash = hash_password(&admin.password, None)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to hash bootstrap admin password: {}", e))?;

    let now = Utc::now();
    let user = User {
        id: UserId::generate(),
        username: admin.username.clone(),
        password_hash,
        role: Role::Admin,
        email: None,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    };

    ctx.users
        .save_async(user)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create bootstrap admin: {}", e))?;
    info!("Created bootstrap admin account '{}'", admin.username);

    Ok(())
}

/// Start the HTTP server and run until a termination signal.
pub async fn run(config: &ServerConfig, ctx: Arc<AppContext>) -> Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting HTTP server on {}", bind_addr);

    let repo: Arc<dyn UserRepository> = Arc::new(StoreUserRepo::new(ctx.users.clone()));
    let settings = config.auth.to_settings();

    if config.server.host != "127.0.0.1" && config.server.host != "localhost" {
        warn!("Server is listening on a non-loopback address");
    }

    let workers = if config.server.workers == 0 {
        std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
    } else {
        config.server.workers
    };

    let ctx_for_app = ctx.clone();
    HttpServer::new(move || {
        let repo = repo.clone();
        let settings = settings.clone();
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::from(ctx_for_app.clone()))
            .configure(move |cfg| routes::configure_api(cfg, repo, settings))
    })
    .workers(workers)
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("Server shutdown complete");
    Ok(())
}
