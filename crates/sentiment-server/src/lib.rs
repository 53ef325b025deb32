//! REST API for the sentiment classifier
//!
//! Serves predictions from a loaded [`SentimentModel`], records each one in the
//! prediction log, and exposes the monitoring views (log statistics, performance
//! breakdowns and drift against the training reference) over HTTP.

pub mod error;
pub mod models;

pub use error::{Result, ServerError};
pub use models::{
    ErrorResponse, HealthResponse, HistoryQuery, PredictionRequest, PredictionResponse,
    RecentQuery,
};

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::Json;
use axum::routing::{get, post};
use axum::{middleware, Router};
use chrono::NaiveDate;
use sentiment_core::analytics::PerformanceSummary;
use sentiment_core::config::{DriftSettings, SentimentConfig, ServerSettings};
use sentiment_core::drift::{
    generate_drift_report, load_production_data, load_reference_data, DriftReport,
};
use sentiment_core::errors::DriftError;
use sentiment_core::model::{validate_model_files, ModelInfo, ModelLoader, SentimentModel};
use sentiment_core::recorder::log_prediction;
use sentiment_core::store::{PredictionLog, PredictionRecord, PredictionStats};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const DEFAULT_RECENT_LIMIT: usize = 20;

/// Configuration for the sentiment API server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Enable CORS
    pub enable_cors: bool,
    /// CORS allowed origins (if None, allows any origin)
    pub cors_origins: Option<Vec<String>>,
    /// Longest accepted review, in characters
    pub max_text_length: usize,
    /// Record served predictions in the prediction log
    pub log_predictions: bool,
    /// Enable request logging
    pub enable_logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            enable_cors: true,
            cors_origins: None,
            max_text_length: 5000,
            log_predictions: true,
            enable_logging: true,
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the `server` section of the YAML configuration.
    pub fn from_settings(settings: &ServerSettings) -> Result<Self> {
        Ok(Self::new()
            .with_bind_addr_str(&settings.bind_addr)?
            .with_cors(settings.enable_cors)
            .with_max_text_length(settings.max_text_length)
            .with_prediction_logging(settings.log_predictions)
            .with_cors_origins(settings.cors_origins.clone()))
    }

    /// Set the bind address from a string.
    pub fn with_bind_addr_str(mut self, addr: &str) -> Result<Self> {
        self.bind_addr = addr
            .parse()
            .map_err(|e| ServerError::config_error(format!("Invalid bind address '{}': {}", addr, e)))?;
        Ok(self)
    }

    /// Enable or disable CORS.
    pub fn with_cors(mut self, enable: bool) -> Self {
        self.enable_cors = enable;
        self
    }

    /// Set allowed CORS origins (`None` allows any origin).
    pub fn with_cors_origins(mut self, origins: Option<Vec<String>>) -> Self {
        self.cors_origins = origins;
        self
    }

    pub fn with_max_text_length(mut self, max: usize) -> Self {
        self.max_text_length = max;
        self
    }

    /// Enable or disable recording of served predictions.
    pub fn with_prediction_logging(mut self, enable: bool) -> Self {
        self.log_predictions = enable;
        self
    }

    /// Enable or disable request logging.
    pub fn with_logging(mut self, enable: bool) -> Self {
        self.enable_logging = enable;
        self
    }
}

/// Shared state for all handlers.
#[derive(Clone)]
struct AppState {
    model: Option<Arc<dyn SentimentModel>>,
    log: PredictionLog,
    config: ServerConfig,
    drift: DriftSettings,
}

impl AppState {
    fn model(&self) -> Result<&Arc<dyn SentimentModel>> {
        self.model.as_ref().ok_or(ServerError::ModelUnavailable)
    }
}

/// Missing or mistyped fields are a validation failure (422); anything that is
/// not a JSON object at all is a bad request (400).
fn json_rejection(rejection: JsonRejection) -> ServerError {
    match rejection {
        JsonRejection::JsonDataError(e) => ServerError::invalid_input(e.body_text()),
        other => ServerError::invalid_request(other.body_text()),
    }
}

fn query_rejection(rejection: QueryRejection) -> ServerError {
    ServerError::invalid_request(rejection.body_text())
}

/// Run a synchronous store or drift call on the blocking pool.
async fn run_blocking<T, E, F>(f: F) -> Result<T>
where
    F: FnOnce() -> std::result::Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ServerError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServerError::internal(format!("Blocking task failed: {}", e)))?
        .map_err(Into::into)
}

async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "IMDB Sentiment Analysis API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /health",
            "model_info": "GET /model/info",
            "predict": "POST /predict",
            "stats": "GET /predictions/stats",
            "recent": "GET /predictions/recent?n=20",
            "history": "GET /predictions?since=YYYY-MM-DD",
            "clear": "DELETE /predictions",
            "performance": "GET /monitoring/performance",
            "drift": "GET /monitoring/drift"
        }
    }))
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let model_loaded = state.model.is_some();
    Json(HealthResponse {
        status: if model_loaded { "healthy" } else { "unhealthy" }.to_string(),
        model_loaded,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: models::now_timestamp(),
    })
}

async fn model_info_handler(State(state): State<AppState>) -> Result<Json<ModelInfo>> {
    Ok(Json(state.model()?.model_info()))
}

async fn predict_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<PredictionResponse>> {
    let Json(request) = payload.map_err(json_rejection)?;
    let text = request
        .validated_text(state.config.max_text_length)
        .map_err(ServerError::invalid_input)?
        .to_string();
    let model = state.model()?.clone();

    let start = Instant::now();
    let prediction = model.predict(&text)?;
    let response_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    log::info!(
        "Prediction: {} (confidence {:.4}) in {:.2}ms",
        prediction.sentiment,
        prediction.confidence,
        response_time_ms
    );

    if state.config.log_predictions {
        let log = state.log.clone();
        let logged_text = text.clone();
        let logged = prediction.clone();
        match run_blocking(move || {
            log_prediction(&log, &logged_text, &logged, Some(response_time_ms))
        })
        .await
        {
            Ok(id) => log::debug!("Logged prediction {}", id),
            Err(e) => log::warn!("Failed to log prediction: {}", e),
        }
    }

    Ok(Json(PredictionResponse {
        sentiment: prediction.sentiment,
        confidence: prediction.confidence,
        probabilities: prediction.probabilities,
        text_length: text.chars().count(),
        timestamp: models::now_timestamp(),
    }))
}

async fn stats_handler(State(state): State<AppState>) -> Result<Json<PredictionStats>> {
    let log = state.log.clone();
    Ok(Json(run_blocking(move || log.stats()).await?))
}

async fn recent_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<RecentQuery>, QueryRejection>,
) -> Result<Json<Vec<PredictionRecord>>> {
    let Query(query) = query.map_err(query_rejection)?;
    let n = query.n.unwrap_or(DEFAULT_RECENT_LIMIT);
    let log = state.log.clone();
    Ok(Json(run_blocking(move || log.recent_predictions(n)).await?))
}

async fn history_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<Vec<PredictionRecord>>> {
    let Query(query) = query.map_err(query_rejection)?;
    let since = query
        .since
        .as_deref()
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                ServerError::invalid_request(format!("Invalid date '{}', expected YYYY-MM-DD", s))
            })
        })
        .transpose()?;
    let log = state.log.clone();
    Ok(Json(run_blocking(move || log.predictions_since(since)).await?))
}

async fn clear_handler(State(state): State<AppState>) -> Result<Json<Value>> {
    let log = state.log.clone();
    let deleted = run_blocking(move || log.clear_all_predictions()).await?;
    log::info!("Cleared {} predictions from the log", deleted);
    Ok(Json(json!({
        "status": "success",
        "deleted": deleted,
        "timestamp": models::now_timestamp()
    })))
}

async fn performance_handler(State(state): State<AppState>) -> Result<Json<PerformanceSummary>> {
    let log = state.log.clone();
    let records = run_blocking(move || log.all_predictions(None)).await?;
    Ok(Json(PerformanceSummary::from_records(&records)))
}

async fn drift_handler(State(state): State<AppState>) -> Result<Json<DriftReport>> {
    let settings = state.drift.clone();
    let log = state.log.clone();
    let report = run_blocking(move || -> std::result::Result<DriftReport, DriftError> {
        let reference = load_reference_data(
            &settings.reference_path,
            settings.sample_size,
            settings.seed,
        )?;
        let production = load_production_data(&log)?;
        generate_drift_report(&reference, &production, &settings.thresholds)
    })
    .await?;
    Ok(Json(report))
}

/// The sentiment API server.
pub struct SentimentServer {
    model: Option<Arc<dyn SentimentModel>>,
    log: PredictionLog,
    config: ServerConfig,
    drift: DriftSettings,
}

impl SentimentServer {
    /// Create a server with default configuration.
    ///
    /// `model` may be `None`; the server then reports unhealthy and answers
    /// prediction requests with 503 while the log endpoints keep working.
    pub fn new(model: Option<Arc<dyn SentimentModel>>, log: PredictionLog) -> Self {
        Self {
            model,
            log,
            config: ServerConfig::default(),
            drift: DriftSettings::default(),
        }
    }

    /// Load the model and open the prediction log described by `config`.
    ///
    /// With `require_model` unset, missing or broken artifacts are logged and the
    /// server starts without a model.
    pub fn from_config(config: &SentimentConfig, require_model: bool) -> Result<Self> {
        let server_config = ServerConfig::from_settings(&config.server)?;
        let log = PredictionLog::open(&config.storage.database_path)?;

        let model_settings = &config.model;
        let model = if !require_model && !validate_model_files(&model_settings.dir) {
            log::warn!(
                "Model artifacts not found in {}, starting without a model",
                model_settings.dir.display()
            );
            None
        } else {
            match ModelLoader::load(
                &model_settings.dir,
                &model_settings.metrics_path,
                model_settings.version.clone(),
            ) {
                Ok(loader) => Some(Arc::new(loader) as Arc<dyn SentimentModel>),
                Err(e) if !require_model => {
                    log::error!("Failed to load model: {}", e);
                    None
                }
                Err(e) => return Err(e.into()),
            }
        };

        Ok(Self::new(model, log)
            .with_config(server_config)
            .with_drift_settings(config.drift.clone()))
    }

    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set where `/monitoring/drift` reads its reference data from.
    pub fn with_drift_settings(mut self, drift: DriftSettings) -> Self {
        self.drift = drift;
        self
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the Axum router with all routes and middleware.
    pub fn build_router(&self) -> Router {
        let state = AppState {
            model: self.model.clone(),
            log: self.log.clone(),
            config: self.config.clone(),
            drift: self.drift.clone(),
        };

        let mut router = Router::new()
            .route("/", get(root_handler))
            .route("/health", get(health_handler))
            .route("/model/info", get(model_info_handler))
            .route("/predict", post(predict_handler))
            .route("/predictions/stats", get(stats_handler))
            .route("/predictions/recent", get(recent_handler))
            .route("/predictions", get(history_handler).delete(clear_handler))
            .route("/monitoring/performance", get(performance_handler))
            .route("/monitoring/drift", get(drift_handler))
            .with_state(state);

        if self.config.enable_logging {
            router = router.layer(middleware::from_fn(
                |request: axum::http::Request<axum::body::Body>,
                 next: axum::middleware::Next| async {
                    let request_id = uuid::Uuid::new_v4().to_string();
                    let method = request.method().clone();
                    let uri = request.uri().clone();

                    // Health probes arrive every few seconds
                    if uri.path() == "/health" {
                        log::debug!("Request {} {} {}", request_id, method, uri);
                    } else {
                        log::info!("Request {} {} {}", request_id, method, uri);
                    }

                    let start = Instant::now();
                    let response = next.run(request).await;
                    let duration = start.elapsed();

                    if uri.path() == "/health" {
                        log::debug!("Response {} {} in {:?}", request_id, response.status(), duration);
                    } else {
                        log::info!("Response {} {} in {:?}", request_id, response.status(), duration);
                    }

                    response
                },
            ));
        }

        router = router.layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            let cors_layer = if let Some(ref origins) = self.config.cors_origins {
                let origins: std::result::Result<Vec<_>, _> =
                    origins.iter().map(|s| s.parse()).collect();
                match origins {
                    Ok(origins) => CorsLayer::new()
                        .allow_origin(origins)
                        .allow_methods(Any)
                        .allow_headers(Any),
                    Err(_) => {
                        log::warn!("Invalid CORS origin in configuration, allowing any origin");
                        CorsLayer::permissive()
                    }
                }
            } else {
                CorsLayer::permissive()
            };
            router = router.layer(cors_layer);
        }

        router
    }

    async fn bind(&self) -> Result<TcpListener> {
        TcpListener::bind(self.config.bind_addr).await.map_err(|e| {
            ServerError::config_error(format!(
                "Failed to bind to {}: {}",
                self.config.bind_addr, e
            ))
        })
    }

    fn log_endpoints(&self) {
        let addr = self.config.bind_addr;
        log::info!("Health check: http://{}/health", addr);
        log::info!("Predict endpoint: http://{}/predict", addr);
        log::info!("Prediction stats: http://{}/predictions/stats", addr);
        log::info!("Drift monitoring: http://{}/monitoring/drift", addr);
        if self.model.is_none() {
            log::warn!("No model loaded, /predict will answer 503");
        }
    }

    /// Start the server with graceful shutdown support.
    ///
    /// The server will shut down when the provided shutdown signal is received.
    pub async fn serve_with_shutdown<F>(self, shutdown_signal: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let listener = self.bind().await?;

        log::info!(
            "Sentiment API starting on {} with graceful shutdown",
            self.config.bind_addr
        );
        self.log_endpoints();

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ServerError::internal(format!("Server error: {}", e)))?;

        log::info!("Sentiment API shut down gracefully");
        Ok(())
    }
}

/// Utility function to create a shutdown signal from Ctrl+C.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            log::info!("Received SIGTERM, shutting down...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use sentiment_core::errors::ModelError;
    use sentiment_core::model::{ClassProbabilities, Prediction, Sentiment};
    use tower::ServiceExt; // for `oneshot`

    /// Calls everything mentioning "good" positive.
    struct MockModel;

    impl SentimentModel for MockModel {
        fn predict(&self, text: &str) -> std::result::Result<Prediction, ModelError> {
            let positive = if text.contains("good") { 0.9_f64 } else { 0.2_f64 };
            let sentiment = if positive > 0.5 {
                Sentiment::Positive
            } else {
                Sentiment::Negative
            };
            Ok(Prediction {
                sentiment,
                confidence: positive.max(1.0 - positive),
                probabilities: ClassProbabilities {
                    negative: 1.0 - positive,
                    positive,
                },
            })
        }

        fn model_info(&self) -> ModelInfo {
            ModelInfo {
                model_type: "Mock".to_string(),
                vectorizer_type: "None".to_string(),
                max_features: None,
                test_accuracy: 0.0,
                test_f1_score: 0.0,
                test_precision: 0.0,
                test_recall: 0.0,
                trained_date: None,
                model_version: "test".to_string(),
            }
        }
    }

    fn server(with_model: bool) -> (SentimentServer, PredictionLog) {
        let log = PredictionLog::open_in_memory().unwrap();
        let model: Option<Arc<dyn SentimentModel>> = if with_model {
            Some(Arc::new(MockModel))
        } else {
            None
        };
        let server = SentimentServer::new(model, log.clone())
            .with_config(ServerConfig::new().with_logging(false).with_max_text_length(50));
        (server, log)
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn predict_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/predict")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_predict_logs_prediction() {
        let (server, log) = server(true);

        let (status, body) = send(
            server.build_router(),
            predict_request(r#"{"text": "  a good film  "}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sentiment"], "positive");
        assert_eq!(body["text_length"], 11);
        assert!((body["probabilities"]["positive"].as_f64().unwrap() - 0.9).abs() < 1e-12);

        let logged = log.recent_predictions(1).unwrap();
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].text, "a good film");
        assert!(logged[0].response_time.is_some());
    }

    #[tokio::test]
    async fn test_predict_rejects_blank_and_oversized_text() {
        let (server, log) = server(true);

        let (status, body) = send(server.build_router(), predict_request(r#"{"text": "   "}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "invalid_input");

        let long = format!(r#"{{"text": "{}"}}"#, "x".repeat(51));
        let (status, _) = send(server.build_router(), predict_request(&long)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send(server.build_router(), predict_request("not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert_eq!(log.prediction_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_extractor_rejections_use_json_error_body() {
        let (server, log) = server(true);

        let (status, body) = send(server.build_router(), get("/predictions/recent?n=abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_request");
        assert!(body["detail"].as_str().unwrap().contains("n"));
        assert!(body["timestamp"].is_string());

        let (status, body) = send(server.build_router(), get("/predictions?since=")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_request");

        // Well-formed JSON without the required field is a validation failure
        let (status, body) = send(server.build_router(), predict_request("{}")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "invalid_input");
        assert!(body["detail"].as_str().unwrap().contains("text"));

        let (status, _) = send(server.build_router(), predict_request(r#"{"text": 5}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let no_content_type = Request::builder()
            .method("POST")
            .uri("/predict")
            .body(Body::from(r#"{"text": "good"}"#))
            .unwrap();
        let (status, body) = send(server.build_router(), no_content_type).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_request");

        assert_eq!(log.prediction_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_recent_zero_returns_everything() {
        let (server, _log) = server(true);
        for text in ["good one", "bad one", "another good one"] {
            let body = format!(r#"{{"text": "{}"}}"#, text);
            let (status, _) = send(server.build_router(), predict_request(&body)).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, body) = send(server.build_router(), get("/predictions/recent?n=0")).await;
        assert_eq!(body.as_array().unwrap().len(), 3);

        let (_, body) = send(server.build_router(), get("/predictions/recent?n=2")).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_without_model() {
        let (server, _log) = server(false);

        let (status, body) = send(server.build_router(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["model_loaded"], false);

        let (status, body) = send(server.build_router(), predict_request(r#"{"text": "good"}"#)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "model_unavailable");

        let (status, _) = send(server.build_router(), get("/model/info")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_history_rejects_bad_date() {
        let (server, _log) = server(true);

        let (status, body) = send(server.build_router(), get("/predictions?since=12-01-2024")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_request");

        let (status, body) = send(server.build_router(), get("/predictions?since=2000-01-01")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_drift_with_empty_log_is_conflict() {
        let dir = tempfile::TempDir::new().unwrap();
        let reference = dir.path().join("train.csv");
        std::fs::write(&reference, "review_clean,sentiment\na good film,positive\n").unwrap();

        let (server, _log) = server(true);
        let server = server.with_drift_settings(DriftSettings {
            reference_path: reference,
            ..DriftSettings::default()
        });

        let (status, body) = send(server.build_router(), get("/monitoring/drift")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "insufficient_data");
    }

    #[test]
    fn test_config_from_settings() {
        let settings = ServerSettings {
            bind_addr: "127.0.0.1:9000".to_string(),
            enable_cors: false,
            cors_origins: Some(vec!["http://localhost:8501".to_string()]),
            max_text_length: 100,
            log_predictions: false,
        };
        let config = ServerConfig::from_settings(&settings).unwrap();
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 9000)));
        assert!(!config.enable_cors);
        assert_eq!(config.max_text_length, 100);
        assert!(!config.log_predictions);
        assert_eq!(
            config.cors_origins.as_deref(),
            Some(&["http://localhost:8501".to_string()][..])
        );

        let bad = ServerSettings {
            bind_addr: "not an address".to_string(),
            ..settings
        };
        assert!(ServerConfig::from_settings(&bad).is_err());
    }
}
