use gloo_file::File as GlooFile;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::{App, Msg};

pub fn render_diagnose_section(app: &App, ctx: &Context<App>) -> Html {
    let link = ctx.link();

    let handle_change = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input
            .files()
            .and_then(|list| list.item(0))
            .map(GlooFile::from);
        input.set_value("");
        Msg::FileSelected(file)
    });

    html! {
        <div class="upload-section">
            <input
                type="file"
                id="file-input"
                accept="image/*"
                onchange={handle_change}
            />

            { render_preview(app) }

            <button
                class="analyze-btn"
                onclick={link.callback(|_| Msg::Diagnose)}
                disabled={app.analyzing || app.file.is_none()}
            >
                { if app.analyzing { "Analyzing..." } else { "Diagnose" } }
            </button>

            { render_diagnosis(app) }
        </div>
    }
}

fn render_preview(app: &App) -> Html {
    match &app.preview_url {
        Some(url) => html! {
            <img
                id="image-preview"
                src={url.to_string()}
                alt="Leaf preview"
                style="max-width: 100%; max-height: 400px; object-fit: contain;"
            />
        },
        None => html! {
            <div class="upload-placeholder">
                <p>{"Select a leaf photo to diagnose (JPG, PNG, GIF)"}</p>
            </div>
        },
    }
}

fn render_diagnosis(app: &App) -> Html {
    let Some(diagnosis) = &app.diagnosis else {
        return html! {};
    };

    let confidence = diagnosis.confidence * 100.0;
    let crop_confidence = diagnosis.crop_confidence * 100.0;

    html! {
        <div class="results-container">
            <div class="result-header">
                <h2>{ format!("{} — {}", diagnosis.crop_type, diagnosis.disease) }</h2>
                <div class="confidence-meter">
                    <div class="meter-label">{"Disease confidence:"}</div>
                    <div class="meter">
                        <div class="meter-fill" style={format!("width: {}%", confidence)}></div>
                    </div>
                    <div class="meter-value">{ format!("{:.1}%", confidence) }</div>
                </div>
                <div class="confidence-meter">
                    <div class="meter-label">{"Crop confidence:"}</div>
                    <div class="meter">
                        <div class="meter-fill" style={format!("width: {}%", crop_confidence)}></div>
                    </div>
                    <div class="meter-value">{ format!("{:.1}%", crop_confidence) }</div>
                </div>
            </div>
            <div class="detailed-results">
                <h3>{"About this disease"}</h3>
                <p class="explanation">{ &diagnosis.explanation }</p>
            </div>
        </div>
    }
}
