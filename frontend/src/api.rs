use gloo_console::error;
use gloo_net::http::Request;
use shared::{
    ChatMessage, ChatRequest, ChatResponse, DiagnosisResponse, Professional, ProfessionalQuery,
    ProfessionalsResponse,
};

/// Upload the selected image to `/api/predict` as a multipart form.
pub async fn diagnose(file: &gloo_file::File) -> Result<DiagnosisResponse, String> {
    let form_data = web_sys::FormData::new().unwrap();
    form_data
        .append_with_blob_and_filename("image", file.as_ref(), &file.name())
        .unwrap();

    let response = Request::post("/api/predict")
        .body(form_data)
        .map_err(|e| format!("Failed to build request: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if response.ok() {
        response
            .json::<DiagnosisResponse>()
            .await
            .map_err(|e| format!("Failed to parse response: {e}"))
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        error!(format!("Diagnosis failed: {status} - {body}"));
        Err(format!("Server error: {status} - {body}"))
    }
}

/// Ask a follow-up question, shipping the visible transcript as context.
pub async fn send_chat(message: String, context: Vec<ChatMessage>) -> Result<ChatResponse, String> {
    let response = Request::post("/api/chat")
        .json(&ChatRequest { message, context })
        .map_err(|e| format!("Failed to encode request: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if response.ok() {
        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| format!("Failed to parse response: {e}"))
    } else {
        Err(format!("Server error: {}", response.status()))
    }
}

/// Run the professional search with the current filters.
pub async fn search_professionals(query: ProfessionalQuery) -> Result<Vec<Professional>, String> {
    let response = Request::post("/api/professionals")
        .json(&query)
        .map_err(|e| format!("Failed to encode request: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if response.ok() {
        response
            .json::<ProfessionalsResponse>()
            .await
            .map(|parsed| parsed.professionals)
            .map_err(|e| format!("Failed to parse response: {e}"))
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        error!(format!("Professional search failed: {status} - {body}"));
        Err(format!("Server error: {status} - {body}"))
    }
}
