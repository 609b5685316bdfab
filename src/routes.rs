use actix_files::{Files, NamedFile};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::{error, info};

use crate::error::{ApiError, ErrorDetail};
use crate::inference::Predictor;
use crate::models::{HealthResponse, PredictionResponse, StrokeInput, StrokeLabel};

async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

// Demo form
async fn index(req: HttpRequest) -> impl Responder {
    info!("Root endpoint accessed.");
    match NamedFile::open_async("./static/index.html").await {
        Ok(file) => file.into_response(&req),
        Err(e) => {
            error!("Failed to open static/index.html: {}", e);
            HttpResponse::InternalServerError().json(ErrorDetail {
                detail: "Form page unavailable.".to_string(),
            })
        }
    }
}

async fn predict_stroke(
    model: web::Data<dyn Predictor>,
    input: web::Json<StrokeInput>,
) -> Result<HttpResponse, ApiError> {
    let input = input.into_inner();
    info!("Received input: {:?}", input);

    input.validate().map_err(ApiError::DomainViolation)?;

    // Model calls are CPU-bound; keep them off the worker's event loop.
    let predictor = model.into_inner();
    let record = input.clone();
    let class = web::block(move || predictor.predict(&record))
        .await
        .map_err(|e| {
            error!("Prediction error: blocking dispatch failed: {}", e);
            ApiError::Prediction(e.to_string())
        })?
        .map_err(|e| {
            error!("Prediction error: {}", e);
            ApiError::Prediction(e.to_string())
        })?;

    let label = StrokeLabel::from_class(class);
    info!("Prediction: {}", label.as_str());

    Ok(HttpResponse::Ok().json(PredictionResponse::new(label, input)))
}

async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(ErrorDetail {
        detail: "Not Found".to_string(),
    })
}

/// Rejects malformed or mistyped bodies with the 400 `detail` shape before
/// the handler runs.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| ApiError::MalformedRequest(err.to_string()).into())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/predict", web::post().to(predict_stroke))
        .route("/", web::get().to(index))
        .service(Files::new("/static", "./static").prefer_utf8(true))
        .default_service(web::route().to(not_found));
}
