use web_sys::{HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

use crate::{App, Msg};

pub fn render_chat_panel(app: &App, ctx: &Context<App>) -> Html {
    let link = ctx.link();

    let handle_input = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::ChatInput(input.value())
    });

    let handle_keypress = link.batch_callback(|e: KeyboardEvent| {
        (e.key() == "Enter").then_some(Msg::SendChat)
    });

    html! {
        <div class="chat-panel">
            <h2>{"Ask about the diagnosis"}</h2>
            <div class="chat-messages">
                {
                    if app.messages.is_empty() {
                        html! {
                            <p class="chat-hint">
                                {"Diagnose a leaf photo first, then ask about symptoms, treatment or prevention."}
                            </p>
                        }
                    } else {
                        app.messages.iter().map(render_message).collect::<Html>()
                    }
                }
                {
                    if app.chat_pending {
                        html! { <p class="chat-hint">{"Thinking..."}</p> }
                    } else {
                        html! {}
                    }
                }
            </div>
            <div class="chat-input-row">
                <input
                    type="text"
                    class="chat-input"
                    placeholder="Ask about treatment, prevention, spread..."
                    value={app.chat_input.clone()}
                    oninput={handle_input}
                    onkeypress={handle_keypress}
                />
                <button
                    class="analyze-btn"
                    onclick={link.callback(|_| Msg::SendChat)}
                    disabled={app.chat_pending}
                >
                    {"Send"}
                </button>
            </div>
        </div>
    }
}

fn render_message(message: &shared::ChatMessage) -> Html {
    let class = if message.kind == "user" {
        "chat-message user"
    } else {
        "chat-message bot"
    };
    html! {
        <div class={class}>
            <pre>{ &message.content }</pre>
        </div>
    }
}
