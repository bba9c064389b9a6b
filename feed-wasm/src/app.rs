use leptos::prelude::*;

use crate::api;
use crate::components::feed_panel::FeedPanel;
use crate::components::sign_up::SignUpPanel;
use crate::components::toast::ToastView;
use crate::dom;
use crate::state::AppState;
use crate::storage::{self, BrowserStorage};
use crate::store;

fn load_posts(state: AppState) {
    state.loading.set(true);

    leptos::task::spawn_local(async move {
        match api::list_posts().await {
            Ok(remote) => {
                let likes = storage::load_likes(&BrowserStorage);
                let comments = storage::load_comments(&BrowserStorage);
                state
                    .posts
                    .set(store::merge_remote(remote, &likes, &comments));
            }
            Err(err) => {
                // Предыдущее состояние ленты не трогаем, повтор — руками.
                dom::console_error(&format!("failed to load posts: {err}"));
                state.show_error("Failed to load posts");
            }
        }
        state.loading.set(false);
    });
}

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();

    load_posts(state.clone());

    let signed_in = {
        let state = state.clone();
        move || state.signed_in()
    };
    let state_for_signup = state.clone();
    let state_for_feed = state.clone();
    let state_for_toast = state.clone();

    view! {
        <Show
            when=signed_in
            fallback=move || view! { <SignUpPanel state=state_for_signup.clone() /> }
        >
            <FeedPanel state=state_for_feed.clone() />
        </Show>
        <ToastView state=state_for_toast.clone() />
    }
}
