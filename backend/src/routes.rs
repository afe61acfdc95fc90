use std::sync::Arc;

use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use log::{debug, error, info};
use serde_json::json;
use shared::{ChatRequest, ChatResponse, DiagnosisResponse, ProfessionalQuery, ProfessionalsResponse};
use tokio::sync::Mutex;

use crate::advisor::GroqClient;
use crate::advisor::context::{disease_from_context, is_disease_related};
use crate::advisor::prompts::{explanation_prompt, followup_prompt};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::inference::Classifier;
use crate::intake::save_upload;
use crate::professionals::ProfessionalSearch;

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: String) {
    cfg.service(web::resource("/api/predict").route(web::post().to(handle_predict)))
        .service(web::resource("/api/chat").route(web::post().to(handle_chat)))
        .service(web::resource("/api/professionals").route(web::post().to(handle_professionals)))
        .service(web::resource("/health").route(web::get().to(health_check)))
        .service(Files::new("/", frontend_dir).index_file("index.html"));
}

/// Upload -> preprocess -> inference -> explanation. The temp file guard
/// cleans up on every exit path.
async fn handle_predict(
    classifier: web::Data<Arc<Mutex<Classifier>>>,
    advisor: web::Data<GroqClient>,
    config: web::Data<AppConfig>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let upload = save_upload(&mut payload, &config.upload).await?;
    info!("Image saved to {}, analyzing...", upload.path().display());

    let diagnosis = classifier.lock().await.analyze(upload.path())?;
    info!(
        "Diagnosis: {} / {} ({:.2}% confidence)",
        diagnosis.crop,
        diagnosis.condition,
        diagnosis.confidence * 100.0
    );
    for (crop, probability) in &diagnosis.crop_probabilities {
        debug!("{}: {:.2}%", crop, probability * 100.0);
    }

    let prompt = explanation_prompt(&diagnosis.condition, diagnosis.crop);
    let explanation = advisor.generate(&prompt).await?;

    Ok(HttpResponse::Ok().json(DiagnosisResponse {
        disease: diagnosis.condition,
        confidence: diagnosis.confidence,
        explanation,
        crop_type: diagnosis.crop.to_string(),
        crop_confidence: diagnosis.crop_confidence,
        status: "success".into(),
    }))
}

/// Follow-up questions about a previous diagnosis. Replies keep the
/// `{message, error}` shape on every path.
async fn handle_chat(
    advisor: web::Data<GroqClient>,
    request: web::Json<ChatRequest>,
) -> HttpResponse {
    let ChatRequest { message, context } = request.into_inner();

    let disease = match disease_from_context(&context) {
        Some(disease) => disease,
        None => {
            return HttpResponse::Ok().json(ChatResponse {
                message: "I apologize, but I cannot find any disease context in our \
                          conversation. Please upload an image first so I can detect the \
                          disease and assist you better."
                    .into(),
                error: false,
            });
        }
    };

    if !is_disease_related(&message) {
        return HttpResponse::Ok().json(ChatResponse {
            message: format!(
                "I apologize, but your question doesn't seem to be related to the detected \
                 plant disease ({disease}). Please ask questions about the disease, its \
                 symptoms, treatment, or prevention for me to help you better."
            ),
            error: false,
        });
    }

    match advisor.generate(&followup_prompt(&disease, &message)).await {
        Ok(reply) => HttpResponse::Ok().json(ChatResponse {
            message: reply,
            error: false,
        }),
        Err(e) => {
            error!("Chat completion failed: {e}");
            HttpResponse::InternalServerError().json(ChatResponse {
                message: e.to_string(),
                error: true,
            })
        }
    }
}

async fn handle_professionals(
    search: web::Data<ProfessionalSearch>,
    query: web::Json<ProfessionalQuery>,
) -> Result<HttpResponse, ApiError> {
    let professionals = search.search(&query).await?;
    info!("Professional search returned {} results", professionals.len());
    Ok(HttpResponse::Ok().json(ProfessionalsResponse { professionals }))
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "OK" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdvisorConfig;
    use actix_web::{App, test};
    use shared::ChatMessage;

    fn test_advisor() -> GroqClient {
        let config = AdvisorConfig {
            model: "llama3-70b-8192".into(),
            temperature: 0.7,
            timeout_secs: 30,
        };
        GroqClient::new("test-key".into(), &config).unwrap()
    }

    #[actix_web::test]
    async fn chat_without_context_asks_for_an_upload() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_advisor()))
                .service(web::resource("/api/chat").route(web::post().to(handle_chat))),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/api/chat")
            .set_json(ChatRequest {
                message: "What treatment do you recommend?".into(),
                context: vec![],
            })
            .to_request();

        let response: ChatResponse = test::call_and_read_body_json(&app, request).await;
        assert!(!response.error);
        assert!(response.message.contains("upload an image first"));
    }

    #[actix_web::test]
    async fn chat_rejects_unrelated_questions() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_advisor()))
                .service(web::resource("/api/chat").route(web::post().to(handle_chat))),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/api/chat")
            .set_json(ChatRequest {
                message: "How do I bake bread?".into(),
                context: vec![ChatMessage::bot("Disease detected: Rice Blast\nDetails...")],
            })
            .to_request();

        let response: ChatResponse = test::call_and_read_body_json(&app, request).await;
        assert!(!response.error);
        assert!(response.message.contains("Rice Blast"));
        assert!(response.message.contains("doesn't seem to be related"));
    }

    #[actix_web::test]
    async fn health_reports_ok() {
        let app = test::init_service(
            App::new().service(web::resource("/health").route(web::get().to(health_check))),
        )
        .await;

        let request = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["status"], "OK");
    }
}
