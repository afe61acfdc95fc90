use shared::{CROP_FILTER_OPTIONS, EXPERTISE_OPTIONS, LOCATION_OPTIONS, Professional};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::{App, Msg};

/// Central India, shown before any professional is selected.
const DEFAULT_CENTER: (f64, f64) = (20.5937, 78.9629);

pub fn render_professionals_section(app: &App, ctx: &Context<App>) -> Html {
    let link = ctx.link();

    html! {
        <div class="professionals-section">
            <h2>{"Find agricultural professionals"}</h2>

            <div class="filter-row">
                { render_select(ctx, "Expertise", &EXPERTISE_OPTIONS, Msg::QueryExpertise) }
                { render_select(ctx, "Location", &LOCATION_OPTIONS, Msg::QueryLocation) }
                { render_select(ctx, "Crop type", &CROP_FILTER_OPTIONS, Msg::QueryCrop) }
            </div>

            <div class="filter-row">
                <div class="filter-group keywords">
                    <label>{"Additional keywords"}</label>
                    <input
                        type="text"
                        placeholder="e.g. organic, certification, disease control"
                        oninput={link.callback(|e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::QueryKeywords(input.value())
                        })}
                    />
                </div>
                <button
                    class="analyze-btn"
                    onclick={link.callback(|_| Msg::SearchProfessionals)}
                    disabled={app.searching}
                >
                    { if app.searching { "Searching..." } else { "Search" } }
                </button>
            </div>

            <div class="results-layout">
                <div class="professionals-list">
                    { render_results(app, ctx) }
                </div>
                <div class="map-section">
                    { render_map(app) }
                </div>
            </div>
        </div>
    }
}

fn render_select(
    ctx: &Context<App>,
    label: &str,
    options: &[&str],
    to_msg: fn(String) -> Msg,
) -> Html {
    let handle_change = ctx.link().callback(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        to_msg(select.value())
    });

    html! {
        <div class="filter-group">
            <label>{ label }</label>
            <select onchange={handle_change}>
                { for options.iter().map(|option| html! { <option value={*option}>{ option }</option> }) }
            </select>
        </div>
    }
}

fn render_results(app: &App, ctx: &Context<App>) -> Html {
    if app.searching {
        return html! { <p class="loading-message">{"Loading professional information..."}</p> };
    }
    if app.professionals.is_empty() {
        return html! {
            <p class="info-message">{"No professionals found yet. Use the filters above to search."}</p>
        };
    }

    app.professionals
        .iter()
        .enumerate()
        .map(|(index, professional)| render_card(app, ctx, index, professional))
        .collect::<Html>()
}

fn render_card(app: &App, ctx: &Context<App>, index: usize, professional: &Professional) -> Html {
    let selected = app.selected_professional == Some(index);

    html! {
        <div
            key={professional.id.to_string()}
            class={classes!("professional-card", selected.then_some("selected"))}
            onclick={ctx.link().callback(move |_| Msg::SelectProfessional(index))}
        >
            <h3>{ &professional.name }</h3>
            { render_field("Expertise", &professional.expertise) }
            { render_field("Location", &professional.location) }
            { render_field("Crop specialization", &professional.crop_specialization) }
            { render_field("Contact", &professional.contact) }
            {
                if let Some(link) = &professional.link {
                    html! {
                        <p>
                            <strong>{"Website: "}</strong>
                            <a href={link.clone()} target="_blank" rel="noopener noreferrer">{"Visit"}</a>
                        </p>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn render_field(label: &str, value: &Option<String>) -> Html {
    match value {
        Some(value) if !value.is_empty() => html! {
            <p><strong>{ format!("{label}: ") }</strong>{ value }</p>
        },
        _ => html! {},
    }
}

fn render_map(app: &App) -> Html {
    let (lat, lon, zoomed) = match app.selected_professional.and_then(|i| app.professionals.get(i)) {
        Some(professional) => (professional.lat, professional.lon, true),
        None => (DEFAULT_CENTER.0, DEFAULT_CENTER.1, false),
    };

    html! {
        <div class="map-wrapper">
            <iframe
                title="Professional locations"
                src={osm_embed_url(lat, lon, zoomed)}
                style="width: 100%; height: 480px; border: 0;"
            />
            {
                if let Some(professional) = app.selected_professional.and_then(|i| app.professionals.get(i)) {
                    html! {
                        <p class="map-caption">
                            { format!("{} — {:.4}, {:.4}", professional.name, professional.lat, professional.lon) }
                        </p>
                    }
                } else {
                    html! { <p class="map-caption">{"Select a professional to center the map"}</p> }
                }
            }
        </div>
    }
}

/// OpenStreetMap embed centered on the coordinates; a tight bounding box
/// when a marker is selected, a countrywide one otherwise.
fn osm_embed_url(lat: f64, lon: f64, zoomed: bool) -> String {
    let half_span = if zoomed { 0.05 } else { 8.0 };
    format!(
        "https://www.openstreetmap.org/export/embed.html?bbox={:.4}%2C{:.4}%2C{:.4}%2C{:.4}&layer=mapnik&marker={:.4}%2C{:.4}",
        lon - half_span,
        lat - half_span,
        lon + half_span,
        lat + half_span,
        lat,
        lon
    )
}
