use crate::modules::{
    models::{
        request::{TableQueryParameters, ValidatedTableQueryParameters},
        response::{RefreshResponse, TableResponse, TableStats},
    },
    service::{RefreshCoordinator, TableService},
};
use atcoder_tables_libs::resource::client::AtcoderProblemsClient;
use axum::{extract::Extension, http::StatusCode, Json};
use std::sync::Arc;
use tokio::time::Instant;

type TableApiResponse = (StatusCode, Json<TableResponse>);
type RefreshApiResponse = (StatusCode, Json<RefreshResponse>);

/// Serves both forms of the table endpoint: with a user or rivals query the
/// pipeline runs fresh for exactly that set, without one the latest warm
/// snapshot of the default set is returned.
pub async fn table_with_qs(
    ValidatedTableQueryParameters(params): ValidatedTableQueryParameters<TableQueryParameters>,
    Extension(service): Extension<Arc<TableService<AtcoderProblemsClient>>>,
    Extension(coordinator): Extension<Arc<RefreshCoordinator<AtcoderProblemsClient>>>,
) -> TableApiResponse {
    let start_process = Instant::now();

    if params.is_empty() {
        return warm_table(&params, &coordinator, start_process);
    }

    let primary_user = params.user.clone().unwrap_or_default();
    let rivals = params.rival_list();

    let snapshot = match service.build_snapshot(&primary_user, &rivals).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!("table construction failed cause: {:?}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(TableResponse::error(&params, "unexpected error")),
            );
        }
    };

    let time: u32 = Instant::now().duration_since(start_process).as_millis() as u32;
    tracing::info!(
        target: "querylog",
        "elapsed_time={} contests={} problems={} params={}",
        time,
        snapshot.tables.contest_count(),
        snapshot.tables.problem_count(),
        serde_json::to_string(&params).unwrap_or(String::from(""))
    );

    let stats = TableStats {
        time,
        contests: snapshot.tables.contest_count() as u32,
        problems: snapshot.tables.problem_count() as u32,
        params: serde_json::json!(params),
        generated_at: snapshot.generated_at,
    };

    (
        StatusCode::OK,
        Json(TableResponse {
            stats,
            tables: snapshot.tables,
            message: None,
        }),
    )
}

fn warm_table(
    params: &TableQueryParameters,
    coordinator: &RefreshCoordinator<AtcoderProblemsClient>,
    start_process: Instant,
) -> TableApiResponse {
    if !coordinator.has_users() {
        return (
            StatusCode::BAD_REQUEST,
            Json(TableResponse::error(
                params,
                "no default user set is configured; pass user or rivals query parameters",
            )),
        );
    }

    let snapshot = match coordinator.latest() {
        Some(snapshot) => snapshot,
        None => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(TableResponse::error(
                    params,
                    "the first refresh has not completed yet",
                )),
            );
        }
    };

    let time: u32 = Instant::now().duration_since(start_process).as_millis() as u32;
    let stats = TableStats {
        time,
        contests: snapshot.tables.contest_count() as u32,
        problems: snapshot.tables.problem_count() as u32,
        params: serde_json::json!(params),
        generated_at: snapshot.generated_at,
    };

    (
        StatusCode::OK,
        Json(TableResponse {
            stats,
            tables: snapshot.tables.clone(),
            message: None,
        }),
    )
}

pub async fn refresh(
    Extension(coordinator): Extension<Arc<RefreshCoordinator<AtcoderProblemsClient>>>,
) -> RefreshApiResponse {
    if !coordinator.has_users() {
        return (
            StatusCode::BAD_REQUEST,
            Json(RefreshResponse {
                published: false,
                message: Some(String::from(
                    "no default user set is configured; nothing to refresh",
                )),
            }),
        );
    }

    match coordinator.refresh().await {
        Ok(published) => (
            StatusCode::OK,
            Json(RefreshResponse {
                published,
                message: None,
            }),
        ),
        Err(e) => {
            tracing::error!("refresh failed cause: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RefreshResponse {
                    published: false,
                    message: Some(String::from("unexpected error")),
                }),
            )
        }
    }
}

pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

pub async fn readiness(
    Extension(coordinator): Extension<Arc<RefreshCoordinator<AtcoderProblemsClient>>>,
) -> StatusCode {
    if coordinator.has_users() && coordinator.latest().is_none() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    }
}
