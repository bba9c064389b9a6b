use leptos::prelude::*;

use crate::state::{AppState, ToastKind};

#[component]
pub(crate) fn ToastView(state: AppState) -> impl IntoView {
    let toast = state.toast;

    move || {
        toast.get().map(|message| {
            let class = match message.kind {
                ToastKind::Success => "toast toast-success",
                ToastKind::Error => "toast toast-error",
            };
            let state = state.clone();
            view! {
                <div class=class role="status">
                    <span>{message.text}</span>
                    <button class="toast-close" on:click=move |_| state.dismiss_toast()>
                        "Close"
                    </button>
                </div>
            }
        })
    }
}
