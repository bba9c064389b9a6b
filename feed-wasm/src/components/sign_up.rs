use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::state::AppState;

#[component]
pub(crate) fn SignUpPanel(state: AppState) -> impl IntoView {
    let username = RwSignal::new(String::new());

    let is_valid = move || !username.get().trim().is_empty();

    let on_submit = {
        let state = state.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();

            let name = username.get().trim().to_string();
            if name.is_empty() {
                return;
            }
            state.sign_up(&name);
        }
    };

    view! {
        <div class="modal-overlay">
            <div class="modal-content signup-modal">
                <h1>"Welcome to CodeLeap network!"</h1>
                <form on:submit=on_submit>
                    <label for="username">"Please enter your username"</label>
                    <input
                        id="username"
                        placeholder="John Doe"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <button type="submit" disabled=move || !is_valid()>
                        "ENTER"
                    </button>
                </form>
            </div>
        </div>
    }
}
