#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for incident statistics.
//!
//! Binds first, then loads the incident dataset once in the background and
//! serves each analytics query as a `GET` endpoint. Until the load finishes
//! every query endpoint answers `503`; if the load fails they keep doing so
//! until the process is restarted with a reachable source.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, error, middleware, rt, web};
use incident_stats_analytics_models::QueryKind;
use incident_stats_dataset::{DEFAULT_DATASET_URL, DatasetSource, DatasetStore, load_into};
use incident_stats_server_models::ApiError;

/// Shared application state.
pub struct AppState {
    /// The load-once dataset every query reads from.
    pub store: Arc<DatasetStore>,
}

/// Runtime configuration for the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind.
    pub bind_addr: String,
    /// Port to bind.
    pub port: u16,
    /// Where the dataset is loaded from.
    pub source: DatasetSource,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            source: DatasetSource::default(),
        }
    }
}

impl ServerConfig {
    /// Reads configuration from `BIND_ADDR`, `PORT`, `DATASET_PATH` and
    /// `DATASET_URL`, falling back to defaults. `DATASET_PATH` wins over
    /// `DATASET_URL` when both are set.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind_addr = std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr);
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let source = std::env::var("DATASET_PATH").map_or_else(
            |_| {
                DatasetSource::Url(
                    std::env::var("DATASET_URL")
                        .unwrap_or_else(|_| DEFAULT_DATASET_URL.to_string()),
                )
            },
            |path| DatasetSource::Path(path.into()),
        );

        Self {
            bind_addr,
            port,
            source,
        }
    }
}

/// Registers every route on `cfg`.
///
/// Query-string extraction failures (a non-integer `year`, a missing
/// `state`) are answered with `400` and an [`ApiError`] body.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        log::warn!("Rejected query string: {err}");
        let body = ApiError {
            error: "invalid_parameter".to_string(),
            message: err.to_string(),
        };
        error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    });

    cfg.app_data(query_config)
        .route("/health", web::get().to(handlers::health))
        .route(
            QueryKind::ListStates.path(),
            web::get().to(handlers::list_states),
        )
        .route(
            QueryKind::ListYears.path(),
            web::get().to(handlers::list_years),
        )
        .route(
            QueryKind::MonthlyDeaths.path(),
            web::get().to(handlers::monthly_deaths),
        )
        .route(
            QueryKind::YearlyDeaths.path(),
            web::get().to(handlers::yearly_deaths),
        )
        .route(
            QueryKind::AgeGroupDeaths.path(),
            web::get().to(handlers::age_group_deaths),
        )
        .route(
            QueryKind::PoliceInvolvedByState.path(),
            web::get().to(handlers::police_involved_by_state),
        )
        .route(
            QueryKind::TopStatesByIncidents.path(),
            web::get().to(handlers::top_states_by_incidents),
        )
        .route(
            QueryKind::DeathsByType.path(),
            web::get().to(handlers::deaths_by_type),
        );
}

/// Loads `source` into `store` on the current Actix runtime.
///
/// A failed load is logged and leaves the store not ready.
fn load_in_background(
    store: Arc<DatasetStore>,
    source: DatasetSource,
) -> rt::task::JoinHandle<()> {
    rt::spawn(async move {
        if let Err(e) = load_into(&store, &source).await {
            log::error!("Failed to load dataset from {source}: {e}");
            log::warn!("Serving in not-ready state; all query endpoints will return 503");
        }
    })
}

/// Starts the incident stats API server.
///
/// Initialises logging, binds the Actix-Web HTTP server, then loads the
/// dataset from `config.source` in the background. `/health` answers as
/// soon as the socket is bound; query endpoints answer `503` until the load
/// completes, and keep doing so if it fails. The caller provides the async
/// runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let store = Arc::new(DatasetStore::new());
    let state = web::Data::new(AppState {
        store: Arc::clone(&store),
    });

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr, config.port))?
    .run();

    load_in_background(store, config.source);

    server.await
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test as actix_test};
    use incident_stats_dataset::Dataset;
    use serde_json::{Value, json};

    use super::*;

    const CSV: &str = "Year,Month,State,Victim Age,Victim Gender,Police Involved,TypeofDeaths\n\
                       2020,3,Texas,25,Male,No,Homicide\n\
                       2020,3,Texas,17,Female,Yes,Homicide\n\
                       2020,3,Texas,18,Male,No,Suicide\n\
                       2020,3,Texas,40,Female,No,Homicide\n\
                       2021,6,Texas,70,Male,Yes,Homicide\n\
                       2021,7,Ohio,52,Female,Yes,Suicide\n";

    fn ready_state() -> web::Data<AppState> {
        let dataset = Dataset::from_csv_bytes(CSV.as_bytes()).unwrap();
        web::Data::new(AppState {
            store: Arc::new(DatasetStore::with_dataset(dataset)),
        })
    }

    fn empty_state() -> web::Data<AppState> {
        web::Data::new(AppState {
            store: Arc::new(DatasetStore::new()),
        })
    }

    async fn get_json(state: web::Data<AppState>, uri: &str) -> (StatusCode, Value) {
        let app = actix_test::init_service(App::new().app_data(state).configure(configure)).await;
        let req = actix_test::TestRequest::get().uri(uri).to_request();
        let resp = actix_test::call_service(&app, req).await;
        let status = resp.status();
        let body: Value = actix_test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn monthly_deaths_endpoint() {
        let (status, body) = get_json(ready_state(), "/deaths/monthly?year=2020&state=Texas").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "monthly_deaths": [{ "MonthName": "March", "TotalDeaths": 4 }] })
        );
    }

    #[actix_web::test]
    async fn state_names_with_spaces_are_url_decoded() {
        let (status, body) =
            get_json(ready_state(), "/deaths/yearly?state=New%20York").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "yearly_deaths": [] }));
    }

    #[actix_web::test]
    async fn listing_endpoints() {
        let (_, states) = get_json(ready_state(), "/getstates").await;
        assert_eq!(
            states,
            json!({ "states": [
                { "name": "Ohio", "code": "OH" },
                { "name": "Texas", "code": "TX" }
            ] })
        );

        let (_, years) = get_json(ready_state(), "/getyears").await;
        assert_eq!(
            years,
            json!({ "years": [
                { "year": 2020, "value": 2020 },
                { "year": 2021, "value": 2021 }
            ] })
        );
    }

    #[actix_web::test]
    async fn breakdown_endpoints() {
        let (_, yearly) = get_json(ready_state(), "/deaths/yearly?state=Texas").await;
        assert_eq!(
            yearly,
            json!({ "yearly_deaths": [
                { "Year": 2021, "TotalDeaths": 1 },
                { "Year": 2020, "TotalDeaths": 4 }
            ] })
        );

        let (_, ages) = get_json(ready_state(), "/deaths/age-group?year=2020&state=Texas").await;
        assert_eq!(
            ages,
            json!({ "deaths_by_age_group": [
                { "AgeGroup": "0-18", "Male": 0, "Female": 1 },
                { "AgeGroup": "19-35", "Male": 2, "Female": 0 },
                { "AgeGroup": "36-50", "Male": 0, "Female": 1 }
            ] })
        );

        let (_, police) = get_json(ready_state(), "/deaths/police-involved?year=2021").await;
        assert_eq!(
            police,
            json!({ "deaths_police_involved_statewise": [
                { "State": "Ohio", "TotalDeathsInvolvingPolice": 1 },
                { "State": "Texas", "TotalDeathsInvolvingPolice": 1 }
            ] })
        );

        let (_, types) =
            get_json(ready_state(), "/deaths/type-of-deaths?year=2020&state=Texas").await;
        assert_eq!(
            types,
            json!({ "type_of_deaths": [
                { "TypeofDeaths": "Homicide", "TotalDeaths": 3 },
                { "TypeofDeaths": "Suicide", "TotalDeaths": 1 }
            ] })
        );
    }

    #[actix_web::test]
    async fn top_states_default_and_explicit_limit() {
        let (_, body) = get_json(ready_state(), "/deaths/top-states").await;
        assert_eq!(
            body,
            json!({ "top_states_by_incident_count": [
                { "State": "Texas", "TotalIncidents": 5 },
                { "State": "Ohio", "TotalIncidents": 1 }
            ] })
        );

        let (_, body) = get_json(ready_state(), "/deaths/top-states?limit=1").await;
        assert_eq!(
            body,
            json!({ "top_states_by_incident_count": [
                { "State": "Texas", "TotalIncidents": 5 }
            ] })
        );

        let (_, body) = get_json(ready_state(), "/deaths/top-states?limit=0").await;
        assert_eq!(body, json!({ "top_states_by_incident_count": [] }));
    }

    #[actix_web::test]
    async fn every_query_endpoint_is_unavailable_before_load() {
        let uris = [
            "/getstates",
            "/getyears",
            "/deaths/monthly?year=2020&state=Texas",
            "/deaths/yearly?state=Texas",
            "/deaths/age-group?year=2020&state=Texas",
            "/deaths/police-involved?year=2020",
            "/deaths/top-states",
            "/deaths/type-of-deaths?year=2020&state=Texas",
        ];
        for uri in uris {
            let (status, body) = get_json(empty_state(), uri).await;
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{uri}");
            assert_eq!(body["error"], "dataset_not_loaded", "{uri}");
        }
    }

    #[actix_web::test]
    async fn malformed_parameters_are_bad_requests() {
        for uri in [
            "/deaths/monthly?year=abc&state=Texas",
            "/deaths/monthly?year=2020",
            "/deaths/police-involved",
            "/deaths/top-states?limit=lots",
            "/deaths/type-of-deaths?year=2020&state=%20",
        ] {
            let (status, body) = get_json(ready_state(), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"], "invalid_parameter", "{uri}");
        }
    }

    #[actix_web::test]
    async fn catalog_mismatch_is_a_server_error() {
        let csv = "Year,Month,State,Victim Age,Victim Gender,Police Involved,TypeofDeaths\n\
                   2020,3,Atlantis,25,Male,No,Homicide\n";
        let state = web::Data::new(AppState {
            store: Arc::new(DatasetStore::with_dataset(
                Dataset::from_csv_bytes(csv.as_bytes()).unwrap(),
            )),
        });
        let (status, body) = get_json(state, "/getstates").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "unknown_state");
    }

    #[actix_web::test]
    async fn health_reports_readiness() {
        let (status, body) = get_json(empty_state(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ready"], false);
        assert_eq!(body["records"], 0);

        let (_, body) = get_json(ready_state(), "/health").await;
        assert_eq!(body["ready"], true);
        assert_eq!(body["records"], 6);
    }

    fn temp_csv(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "incident_stats_server_{}_{name}.csv",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[actix_web::test]
    async fn background_load_installs_dataset_after_start() {
        let path = temp_csv("background", CSV);
        let store = Arc::new(DatasetStore::new());

        let loading = load_in_background(Arc::clone(&store), DatasetSource::Path(path.clone()));
        assert!(!store.is_ready());

        loading.await.unwrap();
        assert_eq!(store.get().map(Dataset::len), Some(6));

        std::fs::remove_file(path).unwrap();
    }

    #[actix_web::test]
    async fn failed_background_load_leaves_store_not_ready() {
        let store = Arc::new(DatasetStore::new());
        let missing = std::env::temp_dir().join("incident_stats_server_missing_dataset.csv");

        load_in_background(Arc::clone(&store), DatasetSource::Path(missing))
            .await
            .unwrap();
        assert!(!store.is_ready());

        let state = web::Data::new(AppState { store });
        let (status, body) = get_json(state, "/getyears").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "dataset_not_loaded");
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.source, DatasetSource::default());
    }
}
