use std::collections::HashMap;

use leptos::prelude::*;

use crate::components::comments::{CommentSection, EditingComment};
use crate::models::Post;
use crate::state::AppState;
use crate::store;

#[component]
pub(crate) fn PostCard(
    state: AppState,
    post: Post,
    drafts: RwSignal<HashMap<i64, String>>,
    editing_comment: RwSignal<Option<EditingComment>>,
    open_menu: RwSignal<Option<i64>>,
    open_comment_input: RwSignal<Option<i64>>,
    #[prop(into)] on_start_edit: Callback<i64>,
    #[prop(into)] on_request_delete: Callback<i64>,
) -> impl IntoView {
    let post_id = post.id;
    let author = post.username.clone();
    let likes = post.likes.clone();
    let comment_count = post.comments.len();

    let liked = {
        let state = state.clone();
        let likes = likes.clone();
        move || {
            let current = state.username.get();
            likes.iter().any(|liker| liker == &current)
        }
    };

    let on_toggle_like = {
        let state = state.clone();
        move |_| {
            let username = state.username.get_untracked();
            state
                .posts
                .update(|posts| store::toggle_like(posts, post_id, &username));
            state.persist_likes();
        }
    };

    let on_toggle_comments = move |_| {
        open_comment_input.update(|open| {
            *open = if *open == Some(post_id) {
                None
            } else {
                Some(post_id)
            };
        });
    };

    let busy = {
        let state = state.clone();
        move || state.loading.get() || state.deleting.get()
    };

    let owner_buttons = {
        let state = state.clone();
        let author = author.clone();
        let busy = busy.clone();
        move || {
            store::is_owner(&state.username.get(), &author).then(|| {
                let edit_disabled = busy.clone();
                let delete_disabled = busy.clone();
                view! {
                    <div class="post-buttons">
                        <button
                            class="action-button"
                            title="Edit"
                            aria-label="Edit post"
                            disabled=edit_disabled
                            on:click=move |_| on_start_edit.run(post_id)
                        >
                            "Edit"
                        </button>
                        <button
                            class="action-button delete"
                            title="Delete"
                            aria-label="Delete post"
                            disabled=delete_disabled
                            on:click=move |_| on_request_delete.run(post_id)
                        >
                            "Delete"
                        </button>
                    </div>
                }
            })
        }
    };

    let like_label = {
        let liked = liked.clone();
        move || if liked() { "Liked" } else { "Like" }
    };

    view! {
        <div class="post-card">
            <div class="post-header">
                <h3>{post.title.clone()}</h3>
                <div class="post-actions">
                    <span class="post-username">"@" {author.clone()}</span>
                    {owner_buttons}
                </div>
            </div>
            <div class="post-content">
                <p>{post.content.clone()}</p>
                <div class="post-date">{store::format_created(&post.created_datetime)}</div>
                <div class="post-footer">
                    <button class="like-button" class:liked=liked.clone() on:click=on_toggle_like>
                        <span>{like_label}</span>
                        <span class="likes-count">{format!("({})", likes.len())}</span>
                    </button>
                    <button
                        class="comment-toggle-btn"
                        aria-label="Add a comment"
                        on:click=on_toggle_comments
                    >
                        "Comment "
                        <span class="comments-count">{format!("({comment_count})")}</span>
                    </button>
                </div>
                <CommentSection
                    state=state.clone()
                    post_id=post_id
                    comments=post.comments.clone()
                    drafts=drafts
                    editing_comment=editing_comment
                    open_menu=open_menu
                    open_input=open_comment_input
                />
            </div>
        </div>
    }
}
