mod api;
mod components;

use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{ChatMessage, DISEASE_MARKER, DiagnosisResponse, Professional, ProfessionalQuery};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use components::chat::render_chat_panel;
use components::diagnose::render_diagnose_section;
use components::professionals::render_professionals_section;

pub enum Msg {
    // Upload & diagnosis
    FileSelected(Option<GlooFile>),
    Diagnose,
    DiagnosisReceived(Box<DiagnosisResponse>),

    // Follow-up chat
    ChatInput(String),
    SendChat,
    ChatReceived(String),

    // Professional search
    QueryExpertise(String),
    QueryLocation(String),
    QueryCrop(String),
    QueryKeywords(String),
    SearchProfessionals,
    ProfessionalsReceived(Vec<Professional>),
    SelectProfessional(usize),

    // UI state
    SetError(Option<String>),
}

pub struct App {
    pub file: Option<GlooFile>,
    pub preview_url: Option<ObjectUrl>,
    pub diagnosis: Option<DiagnosisResponse>,
    pub analyzing: bool,

    pub messages: Vec<ChatMessage>,
    pub chat_input: String,
    pub chat_pending: bool,

    pub query: ProfessionalQuery,
    pub professionals: Vec<Professional>,
    pub selected_professional: Option<usize>,
    pub searching: bool,

    pub error: Option<String>,
}

/// Diagnosis summary pushed into the transcript. Starts with the marker
/// line the chat endpoint looks for, so follow-up questions stay scoped to
/// this disease.
fn diagnosis_message(diagnosis: &DiagnosisResponse) -> String {
    format!(
        "{DISEASE_MARKER} {}\nCrop type: {} ({:.1}% confidence)\nDisease confidence: {:.1}%\n\n{}",
        diagnosis.disease,
        diagnosis.crop_type,
        diagnosis.crop_confidence * 100.0,
        diagnosis.confidence * 100.0,
        diagnosis.explanation
    )
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            file: None,
            preview_url: None,
            diagnosis: None,
            analyzing: false,
            messages: Vec::new(),
            chat_input: String::new(),
            chat_pending: false,
            query: ProfessionalQuery::default(),
            professionals: Vec::new(),
            selected_professional: None,
            searching: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileSelected(file) => {
                self.preview_url = file.clone().map(ObjectUrl::from);
                self.file = file;
                self.diagnosis = None;
                self.error = None;
                true
            }
            Msg::Diagnose => self.handle_diagnose(ctx),
            Msg::DiagnosisReceived(diagnosis) => {
                self.analyzing = false;
                self.messages.push(ChatMessage::bot(diagnosis_message(&diagnosis)));
                self.diagnosis = Some(*diagnosis);
                true
            }

            Msg::ChatInput(value) => {
                self.chat_input = value;
                true
            }
            Msg::SendChat => self.handle_send_chat(ctx),
            Msg::ChatReceived(reply) => {
                self.chat_pending = false;
                self.messages.push(ChatMessage::bot(reply));
                true
            }

            Msg::QueryExpertise(value) => {
                self.query.expertise = Some(value);
                false
            }
            Msg::QueryLocation(value) => {
                self.query.location = Some(value);
                false
            }
            Msg::QueryCrop(value) => {
                self.query.crop_type = Some(value);
                false
            }
            Msg::QueryKeywords(value) => {
                self.query.keywords = Some(value);
                false
            }
            Msg::SearchProfessionals => self.handle_search_professionals(ctx),
            Msg::ProfessionalsReceived(professionals) => {
                self.searching = false;
                self.selected_professional = None;
                self.professionals = professionals;
                true
            }
            Msg::SelectProfessional(index) => {
                if index < self.professionals.len() {
                    self.selected_professional = Some(index);
                    true
                } else {
                    false
                }
            }

            Msg::SetError(error) => {
                self.error = error;
                self.analyzing = false;
                self.chat_pending = false;
                self.searching = false;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                <header class="app-header">
                    <h1>{"Leaf Disease Diagnosis"}</h1>
                    <p class="subtitle">{"Upload a leaf photo, get a diagnosis, ask follow-up questions"}</p>
                </header>

                <main class="main-content">
                    { render_diagnose_section(self, ctx) }
                    { self.render_error_message() }
                    { render_chat_panel(self, ctx) }
                    { render_professionals_section(self, ctx) }
                </main>

                <footer class="app-footer">
                    <p>{"Plant disease diagnosis | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

impl App {
    fn handle_diagnose(&mut self, ctx: &Context<Self>) -> bool {
        let Some(file) = self.file.clone() else {
            self.error = Some("No image selected for diagnosis.".into());
            return true;
        };

        self.analyzing = true;
        self.error = None;

        let link = ctx.link().clone();
        spawn_local(async move {
            match api::diagnose(&file).await {
                Ok(diagnosis) => link.send_message(Msg::DiagnosisReceived(Box::new(diagnosis))),
                Err(e) => link.send_message(Msg::SetError(Some(e))),
            }
        });

        true
    }

    fn handle_send_chat(&mut self, ctx: &Context<Self>) -> bool {
        let message = self.chat_input.trim().to_string();
        if message.is_empty() || self.chat_pending {
            return false;
        }

        self.messages.push(ChatMessage::user(message.clone()));
        self.chat_input.clear();
        self.chat_pending = true;
        self.error = None;

        let context = self.messages.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            match api::send_chat(message, context).await {
                Ok(reply) => link.send_message(Msg::ChatReceived(reply.message)),
                Err(e) => link.send_message(Msg::SetError(Some(e))),
            }
        });

        true
    }

    fn handle_search_professionals(&mut self, ctx: &Context<Self>) -> bool {
        if self.searching {
            return false;
        }

        self.searching = true;
        self.error = None;

        let query = self.query.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            match api::search_professionals(query).await {
                Ok(professionals) => link.send_message(Msg::ProfessionalsReceived(professionals)),
                Err(e) => link.send_message(Msg::SetError(Some(e))),
            }
        });

        true
    }

    fn render_error_message(&self) -> Html {
        if let Some(error_msg) = &self.error {
            html! {
                <div class="error-message">
                    <p>{ error_msg }</p>
                </div>
            }
        } else {
            html! {}
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<App>::new().render();
}
