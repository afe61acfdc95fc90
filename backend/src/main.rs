mod advisor;
mod config;
mod error;
mod inference;
mod intake;
mod professionals;
mod routes;

use std::env;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use tokio::sync::Mutex;

use advisor::GroqClient;
use config::AppConfig;
use inference::Classifier;
use professionals::gemini::GeminiClient;
use professionals::serper::SerperClient;
use professionals::ProfessionalSearch;
use routes::configure_routes;

fn startup_error(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

fn required_env(name: &str) -> std::io::Result<String> {
    env::var(name).map_err(|_| startup_error(format!("{name} not found in environment variables")))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    let config = AppConfig::load()
        .map_err(|e| startup_error(format!("Config loading failed: {e}")))?;

    let frontend_dir = if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        format!("{}/../frontend/dist", manifest_dir)
    } else {
        "/usr/src/app/frontend/dist".to_string()
    };

    let classifier = Classifier::load(&config.model).map_err(|e| {
        log::error!("Failed to preload model at startup: {e}");
        startup_error(format!("Model loading failed: {e}"))
    })?;
    let classifier = Arc::new(Mutex::new(classifier));

    let groq_key = required_env("GROQ_API_KEY")?;
    let serper_key = required_env("SERPER_API_KEY")?;
    let gemini_key = required_env("GEMINI_API_KEY")?;

    let advisor = GroqClient::new(groq_key, &config.advisor)
        .map_err(|e| startup_error(format!("Advisor client setup failed: {e}")))?;
    let serper = SerperClient::new(serper_key, config.search.num_results)
        .map_err(|e| startup_error(format!("Search client setup failed: {e}")))?;
    let gemini = GeminiClient::new(gemini_key, config.search.gemini_model.clone())
        .map_err(|e| startup_error(format!("Extraction client setup failed: {e}")))?;
    let professional_search = ProfessionalSearch::new(serper, gemini);

    let port = env::var("PORT").unwrap_or_else(|_| "8081".to_string());
    let bind_address = format!("0.0.0.0:{}", port);

    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(web::Data::new(classifier.clone()))
            .app_data(web::Data::new(advisor.clone()))
            .app_data(web::Data::new(professional_search.clone()))
            .app_data(web::Data::new(config.clone()))
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
