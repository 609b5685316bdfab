use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{web, App, HttpServer};
use log::{error, info};

use stroke_prediction_api::inference::{Predictor, StrokeModel, DEFAULT_MODEL_PATH};
use stroke_prediction_api::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    info!("🚀 Starting Stroke Prediction API");

    // The artifact is a hard startup dependency: no model, no service.
    let model_path =
        std::env::var("MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string());
    let model = match StrokeModel::load(&model_path) {
        Ok(model) => {
            info!("✅ Model pipeline loaded successfully from '{}'", model_path);
            model
        }
        Err(e) => {
            error!("❌ Failed to load model artifact '{}': {}", model_path, e);
            std::process::exit(1);
        }
    };

    let model: Arc<dyn Predictor> = Arc::new(model);
    let model_data: web::Data<dyn Predictor> = web::Data::from(model);

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let workers = std::env::var("WORKERS")
        .ok()
        .and_then(|w| w.parse().ok())
        .unwrap_or_else(num_cpus::get);

    let bind_address = format!("{}:{}", host, port);

    info!("🌐 Serving on: http://{}", bind_address);
    info!("👷 Workers: {}", workers);
    info!("Endpoints:");
    info!("   GET  /health   - liveness check");
    info!("   GET  /         - prediction form");
    info!("   POST /predict  - stroke risk prediction");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .wrap(cors)
            .app_data(model_data.clone())
            .app_data(routes::json_config())
            .configure(routes::configure)
    })
    .workers(workers)
    .bind(&bind_address)?
    .run()
    .await
}
