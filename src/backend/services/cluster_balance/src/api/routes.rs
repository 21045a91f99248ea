use actix_web::{web, HttpResponse, Scope};
use cluster_models::{Address, Network, OperatorId};
use serde::Serialize;

use crate::config::NetworksConfig;
use crate::models::report::{BatchView, ClusterReport};
use crate::repositories::traits::IndexerRepository;
use crate::services::discovery_service::DiscoveryService;
use crate::utils::errors::ServiceError;

pub struct ApiState<R> {
    pub service: DiscoveryService<R>,
    pub networks: NetworksConfig,
}

pub fn cluster_routes<R: IndexerRepository + 'static>() -> Scope {
    web::scope("/clusters")
        .route("/{network}/{account}", web::get().to(account_clusters::<R>))
        .route(
            "/{network}/{account}/{operator_ids}",
            web::get().to(single_cluster::<R>),
        )
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(err: &ServiceError) -> HttpResponse {
    let body = ErrorResponse {
        error: err.user_message(),
    };
    match err {
        ServiceError::Transport(_) | ServiceError::MalformedResponse(_) | ServiceError::Timeout(_) => {
            HttpResponse::BadGateway().json(body)
        }
        ServiceError::Validation(_) => HttpResponse::BadRequest().json(body),
        ServiceError::StaleSnapshot { .. } | ServiceError::Overflow(_) => {
            HttpResponse::UnprocessableEntity().json(body)
        }
    }
}

fn parse_target(network: &str, account: &str) -> Result<(Network, Address), ServiceError> {
    Ok((network.parse()?, account.parse()?))
}

async fn account_clusters<R: IndexerRepository + 'static>(
    state: web::Data<ApiState<R>>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (network, account) = path.into_inner();
    let (network, account) = match parse_target(&network, &account) {
        Ok(target) => target,
        Err(err) => return error_response(&err),
    };

    match state.service.discover_and_estimate(&account, network).await {
        Ok(report) => {
            HttpResponse::Ok().json(BatchView::from_report(&report, state.networks.get(network)))
        }
        Err(err) => {
            tracing::warn!(%account, %network, error = %err, "batch estimation failed");
            error_response(&err)
        }
    }
}

async fn single_cluster<R: IndexerRepository + 'static>(
    state: web::Data<ApiState<R>>,
    path: web::Path<(String, String, String)>,
) -> HttpResponse {
    let (network, account, operator_ids) = path.into_inner();
    let target = parse_target(&network, &account).and_then(|(network, account)| {
        Ok((network, account, OperatorId::parse_list(&operator_ids)?))
    });
    let (network, account, operator_ids) = match target {
        Ok(target) => target,
        Err(err) => return error_response(&err),
    };

    match state
        .service
        .estimate_cluster(&account, &operator_ids, network)
        .await
    {
        Ok(estimate) => HttpResponse::Ok().json(ClusterReport::from_estimate(
            &estimate,
            state.networks.get(network),
        )),
        Err(err) => {
            tracing::warn!(%account, %network, error = %err, "cluster estimation failed");
            error_response(&err)
        }
    }
}
