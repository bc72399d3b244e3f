//! The HTTP surface.
//!
//! - `POST /calculate` runs a [`ComputeRequest`], replies with the result,
//!   and publishes it for display
//! - `GET /schema` returns a default request body
//! - `GET /` serves a browser form that posts to `/calculate`

use std::{future::Future, net::SocketAddr};

use warp::{Filter, Rejection, Reply, http::StatusCode, reply::Response};

use fixpoint_channel::Publisher;

use crate::{
    api::{ComputeRequest, ErrorResponse},
    compute::{Computation, compute},
};

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Builds every route, publishing successful computations to `publisher`.
pub fn routes(
    publisher: Publisher,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    calculate(publisher).or(schema()).or(index())
}

/// Binds the server to `addr` and returns the bound address and the future
/// that serves it.
///
/// Must be called within a tokio runtime.
///
/// # Errors
///
/// Returns an error if the address cannot be bound.
pub fn bind(
    addr: SocketAddr,
    publisher: Publisher,
) -> Result<(SocketAddr, impl Future<Output = ()> + 'static), warp::Error> {
    let (bound, server) = warp::serve(routes(publisher)).try_bind_ephemeral(addr)?;
    tracing::info!(addr = %bound, "compute endpoint listening");
    Ok((bound, server))
}

/// Iteration is CPU-bound and its length is chosen by the client, so each
/// request runs on tokio's blocking pool instead of an async worker.
fn calculate(
    publisher: Publisher,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    warp::path("calculate")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and_then(move |request: ComputeRequest| {
            let publisher = publisher.clone();
            async move {
                let joined =
                    tokio::task::spawn_blocking(move || handle(&publisher, &request)).await;
                Ok::<_, Rejection>(joined.unwrap_or_else(|error| {
                    tracing::error!(%error, "compute task failed");
                    error_reply(StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_owned())
                }))
            }
        })
}

fn schema() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path("schema")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| warp::reply::json(&ComputeRequest::default()))
}

fn index() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::html(INDEX_HTML))
}

fn handle(publisher: &Publisher, request: &ComputeRequest) -> Response {
    match compute(request) {
        Ok(Computation { response, message }) => {
            publisher.push(message);
            warp::reply::json(&response).into_response()
        }
        Err(error) => {
            tracing::warn!(function = %request.function, %error, "rejected compute request");
            error_reply(StatusCode::BAD_REQUEST, error.to_string())
        }
    }
}

fn error_reply(status: StatusCode, error: String) -> Response {
    warp::reply::with_status(warp::reply::json(&ErrorResponse { error }), status)
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use fixpoint_channel::result_channel;
    use fixpoint_solvers::equation::fixed_point::Status;

    use crate::api::{ComputeResponse, ResponseStatus};

    #[tokio::test]
    async fn calculate_replies_and_publishes() {
        let (publisher, subscriber) = result_channel();
        let api = routes(publisher);

        let response = warp::test::request()
            .method("POST")
            .path("/calculate")
            .json(&json!({
                "function": "x - cos(x)",
                "initial_guess": 1.0,
                "tolerance": "1e-6",
                "max_iterations": 100,
            }))
            .reply(&api)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: ComputeResponse = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body.status, ResponseStatus::Converged);
        assert!((body.root_approximation - 0.739_085_133_2).abs() < 1e-6);

        let published = subscriber.drain();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].x_values(), body.x_values.as_slice());
        assert_eq!(published[0].status(), Status::Converged);
    }

    #[tokio::test]
    async fn parse_error_is_bad_request_and_not_published() {
        let (publisher, subscriber) = result_channel();
        let api = routes(publisher);

        let response = warp::test::request()
            .method("POST")
            .path("/calculate")
            .json(&json!({
                "function": "x^^2",
                "initial_guess": 1.0,
                "tolerance": 1e-6,
                "max_iterations": 100,
            }))
            .reply(&api)
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = serde_json::from_slice(response.body()).unwrap();
        assert!(body.error.starts_with("invalid function"));
        assert!(subscriber.drain().is_empty());
    }

    #[tokio::test]
    async fn evaluation_failure_is_still_published() {
        let (publisher, subscriber) = result_channel();
        let api = routes(publisher);

        let response = warp::test::request()
            .method("POST")
            .path("/calculate")
            .json(&json!({
                "function": "ln(x)",
                "initial_guess": -1.0,
                "tolerance": 1e-6,
                "max_iterations": 10,
            }))
            .reply(&api)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: ComputeResponse = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body.status, ResponseStatus::EvaluationFailed);
        assert_eq!(subscriber.drain().len(), 1);
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let (publisher, subscriber) = result_channel();
        let api = routes(publisher);

        let response = warp::test::request()
            .method("POST")
            .path("/calculate")
            .body("{\"function\": 3}")
            .reply(&api)
            .await;

        assert!(response.status().is_client_error());
        assert!(subscriber.drain().is_empty());
    }

    #[tokio::test]
    async fn long_formula_is_bad_request() {
        let (publisher, subscriber) = result_channel();
        let api = routes(publisher);

        let response = warp::test::request()
            .method("POST")
            .path("/calculate")
            .json(&json!({
                "function": vec!["x"; 100_000].join(" + "),
                "initial_guess": 1.0,
                "tolerance": 1e-6,
                "max_iterations": 10,
            }))
            .reply(&api)
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = serde_json::from_slice(response.body()).unwrap();
        assert!(body.error.contains("too deeply"));
        assert!(subscriber.drain().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn concurrent_requests_run_off_the_async_worker() {
        let (publisher, subscriber) = result_channel();
        let api = &routes(publisher);

        let request = move |max_iterations: usize| {
            warp::test::request()
                .method("POST")
                .path("/calculate")
                .json(&json!({
                    "function": "x - cos(x)",
                    "initial_guess": 1.0,
                    "tolerance": 0.0,
                    "max_iterations": max_iterations,
                }))
                .reply(api)
        };

        let (long, short, schema) = tokio::join!(
            request(20_000),
            request(5),
            warp::test::request().method("GET").path("/schema").reply(api),
        );

        assert_eq!(schema.status(), StatusCode::OK);
        for (response, iterations) in [(long, 20_000), (short, 5)] {
            assert_eq!(response.status(), StatusCode::OK);
            let body: ComputeResponse = serde_json::from_slice(response.body()).unwrap();
            assert_eq!(body.status, ResponseStatus::MaxIters);
            assert_eq!(body.iterations, iterations);
        }
        assert_eq!(subscriber.drain().len(), 2);
    }

    #[tokio::test]
    async fn index_serves_entry_form() {
        let (publisher, _subscriber) = result_channel();
        let api = routes(publisher);

        let response = warp::test::request()
            .method("GET")
            .path("/")
            .reply(&api)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let page = std::str::from_utf8(response.body()).unwrap();
        assert!(page.contains("<form"));
        assert!(page.contains("/calculate"));
    }

    #[tokio::test]
    async fn schema_returns_default_request() {
        let (publisher, _subscriber) = result_channel();
        let api = routes(publisher);

        let response = warp::test::request()
            .method("GET")
            .path("/schema")
            .reply(&api)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: ComputeRequest = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body, ComputeRequest::default());
    }
}
