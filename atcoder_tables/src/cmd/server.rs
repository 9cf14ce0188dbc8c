use crate::{
    cmd::{base_url, primary_user, rival_users},
    modules::{
        handlers::{liveness, readiness, refresh, table_with_qs},
        service::{RefreshCoordinator, TableService},
    },
};
use anyhow::{Context, Result};
use atcoder_tables_libs::resource::client::AtcoderProblemsClient;
use axum::{extract::Extension, routing, Router, Server};
use clap::Args;
use http::header::CONTENT_TYPE;
use std::{env, net::SocketAddr, sync::Arc, time::Duration};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

#[derive(Debug, Args)]
pub struct ServerArgs {
    #[arg(long)]
    port: Option<u16>,
    /// Primary user id of the warm snapshot. Falls back to TABLE_USER.
    #[arg(long)]
    user: Option<String>,
    /// Comma separated rival ids of the warm snapshot. Falls back to TABLE_RIVALS.
    #[arg(long)]
    rivals: Option<String>,
    /// Seconds between background refreshes of the warm snapshot.
    #[arg(long, default_value_t = 300)]
    refresh_interval: u64,
}

pub async fn run(args: ServerArgs) -> Result<()> {
    let client = AtcoderProblemsClient::new(&base_url()).with_context(|| {
        let message = "couldn't create AtCoder Problems client. check the value of ATCODER_PROBLEMS_URL environment variable.";
        tracing::error!(message);
        format!("{}", message)
    })?;
    let service = Arc::new(TableService::new(client));
    let coordinator = Arc::new(RefreshCoordinator::new(
        service.clone(),
        primary_user(args.user),
        rival_users(args.rivals),
    ));

    if coordinator.has_users() {
        spawn_background_refresh(
            coordinator.clone(),
            Duration::from_secs(args.refresh_interval),
        );
    } else {
        tracing::warn!(
            "No default user set is configured. The warm snapshot will not be available; set TABLE_USER or TABLE_RIVALS or pass --user/--rivals."
        );
    }

    let app = create_router(service, coordinator);
    let port = match args.port {
        Some(port) => port,
        None => {
            tracing::warn!("API server will be launched at default port number 8000");
            8000u16
        }
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Server start at port {}", port);
    Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to bind server.");

    Ok(())
}

fn spawn_background_refresh(
    coordinator: Arc<RefreshCoordinator<AtcoderProblemsClient>>,
    interval: Duration,
) {
    tokio::spawn(async move {
        // The first tick fires immediately, so the warm snapshot is built at
        // startup.
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            match coordinator.refresh().await {
                Ok(_) => {}
                Err(e) => tracing::error!("Background refresh failed cause: {:?}", e),
            }
        }
    });
}

fn create_router(
    service: Arc<TableService<AtcoderProblemsClient>>,
    coordinator: Arc<RefreshCoordinator<AtcoderProblemsClient>>,
) -> Router {
    let origin = env::var("FRONTEND_ORIGIN_URL").unwrap_or(String::from("http://localhost:3000"));

    Router::new()
        .route("/api/table", routing::get(table_with_qs))
        .route("/api/refresh", routing::post(refresh))
        .route("/api/liveness", routing::get(liveness))
        .route("/api/readiness", routing::get(readiness))
        .layer(Extension(service))
        .layer(Extension(coordinator))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::exact(origin.parse().unwrap()))
                .allow_methods(Any)
                .allow_headers(vec![CONTENT_TYPE]),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler.");
    };

    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("SIGINT signal received, starting graceful shutdown.");
}
