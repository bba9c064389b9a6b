use std::collections::HashMap;

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::comments::EditingComment;
use crate::components::post_card::PostCard;
use crate::dom;
use crate::state::AppState;
use crate::store;

#[component]
pub(crate) fn FeedPanel(state: AppState) -> impl IntoView {
    let title = RwSignal::new(String::new());
    let content = RwSignal::new(String::new());

    let editing_post_id = RwSignal::new(None::<i64>);
    let edit_title = RwSignal::new(String::new());
    let edit_content = RwSignal::new(String::new());
    let delete_post_id = RwSignal::new(None::<i64>);

    let comment_drafts = RwSignal::new(HashMap::<i64, String>::new());
    let editing_comment = RwSignal::new(None::<EditingComment>);
    let open_comment_menu = RwSignal::new(None::<i64>);
    let open_comment_input = RwSignal::new(None::<i64>);

    let on_create = Callback::new({
        let state = state.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();

            let title_value = title.get().trim().to_string();
            let content_value = content.get().trim().to_string();
            if !store::is_form_valid(&title_value, &content_value) {
                return;
            }

            let username = state.username.get();
            state.loading.set(true);
            let state2 = state.clone();
            spawn_local(async move {
                match api::create_post(&username, &title_value, &content_value).await {
                    Ok(created) => {
                        state2
                            .posts
                            .update(|posts| store::prepend_created(posts, created));
                        title.set(String::new());
                        content.set(String::new());
                        state2.show_success("Post created successfully!");
                    }
                    Err(err) => {
                        // Поля композера не трогаем, чтобы можно было
                        // повторить отправку.
                        dom::console_error(&format!("failed to create post: {err}"));
                        state2.show_error("Failed to create post");
                    }
                }
                state2.loading.set(false);
            });
        }
    });

    let on_start_edit = Callback::new({
        let state = state.clone();
        move |post_id: i64| {
            let posts = state.posts.get();
            let Some(post) = posts.iter().find(|post| post.id == post_id) else {
                return;
            };
            edit_title.set(post.title.clone());
            edit_content.set(post.content.clone());
            editing_post_id.set(Some(post_id));
        }
    });

    let on_cancel_edit = Callback::new(move |_: ()| {
        editing_post_id.set(None);
        edit_title.set(String::new());
        edit_content.set(String::new());
    });

    let on_save_edit = Callback::new({
        let state = state.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();

            let Some(post_id) = editing_post_id.get() else {
                return;
            };
            let title_value = edit_title.get().trim().to_string();
            let content_value = edit_content.get().trim().to_string();
            if !store::is_form_valid(&title_value, &content_value) {
                return;
            }

            state.loading.set(true);
            let state2 = state.clone();
            spawn_local(async move {
                match api::update_post(post_id, &title_value, &content_value).await {
                    Ok(updated) => {
                        state2
                            .posts
                            .update(|posts| store::apply_updated(posts, updated));
                        editing_post_id.set(None);
                        edit_title.set(String::new());
                        edit_content.set(String::new());
                        state2.show_success("Post updated successfully!");
                    }
                    Err(err) => {
                        // Диалог остаётся открытым с введёнными значениями.
                        dom::console_error(&format!("failed to update post: {err}"));
                        state2.show_error("Failed to update post");
                    }
                }
                state2.loading.set(false);
            });
        }
    });

    let on_request_delete = Callback::new(move |post_id: i64| {
        delete_post_id.set(Some(post_id));
    });

    let on_cancel_delete = Callback::new(move |_: ()| {
        delete_post_id.set(None);
    });

    let on_confirm_delete = Callback::new({
        let state = state.clone();
        move |_: ()| {
            let Some(post_id) = delete_post_id.get() else {
                return;
            };

            state.deleting.set(true);
            let state2 = state.clone();
            spawn_local(async move {
                match api::delete_post(post_id).await {
                    Ok(()) => {
                        state2.posts.update(|posts| store::remove_post(posts, post_id));
                        delete_post_id.set(None);
                        state2.show_success("Post deleted successfully!");
                    }
                    Err(err) => {
                        dom::console_error(&format!("failed to delete post: {err}"));
                        state2.show_error("Failed to delete post");
                    }
                }
                state2.deleting.set(false);
            });
        }
    });

    let avatar = {
        let state = state.clone();
        move || {
            state
                .username
                .get()
                .chars()
                .next()
                .map(|letter| letter.to_uppercase().to_string())
                .unwrap_or_else(|| "?".to_string())
        }
    };

    let create_disabled = {
        let state = state.clone();
        move || !store::is_form_valid(&title.get(), &content.get()) || state.loading.get()
    };

    let create_label = {
        let state = state.clone();
        move || if state.loading.get() { "Creating..." } else { "Create" }
    };

    let edit_modal = {
        let state = state.clone();
        move || {
            editing_post_id.get().map(|_| {
                let save_disabled = {
                    let state = state.clone();
                    move || {
                        !store::is_form_valid(&edit_title.get(), &edit_content.get())
                            || state.loading.get()
                    }
                };
                let cancel_disabled = {
                    let state = state.clone();
                    move || state.loading.get()
                };
                let save_label = {
                    let state = state.clone();
                    move || if state.loading.get() { "Saving..." } else { "Save" }
                };
                view! {
                    <div class="modal-overlay">
                        <div class="modal-content edit-modal">
                            <h2>"Edit item"</h2>
                            <form on:submit=move |ev| on_save_edit.run(ev)>
                                <div class="form-group">
                                    <label for="edit-title">"Title"</label>
                                    <input
                                        id="edit-title"
                                        placeholder="Hello world"
                                        prop:value=move || edit_title.get()
                                        on:input=move |ev| edit_title.set(event_target_value(&ev))
                                    />
                                </div>
                                <div class="form-group">
                                    <label for="edit-content">"Content"</label>
                                    <textarea
                                        id="edit-content"
                                        placeholder="Content here"
                                        prop:value=move || edit_content.get()
                                        on:input=move |ev| edit_content.set(event_target_value(&ev))
                                    ></textarea>
                                </div>
                                <div class="modal-actions">
                                    <button
                                        type="button"
                                        class="cancel-button"
                                        disabled=cancel_disabled
                                        on:click=move |_| on_cancel_edit.run(())
                                    >
                                        "Cancel"
                                    </button>
                                    <button type="submit" class="save-button" disabled=save_disabled>
                                        {save_label}
                                    </button>
                                </div>
                            </form>
                        </div>
                    </div>
                }
            })
        }
    };

    let delete_modal = {
        let state = state.clone();
        move || {
            delete_post_id.get().map(|_| {
                let cancel_disabled = {
                    let state = state.clone();
                    move || state.deleting.get()
                };
                let delete_disabled = {
                    let state = state.clone();
                    move || state.deleting.get()
                };
                let delete_label = {
                    let state = state.clone();
                    move || if state.deleting.get() { "Deleting..." } else { "Delete" }
                };
                view! {
                    <div class="modal-overlay">
                        <div class="modal-content delete-modal">
                            <h2>"Are you sure you want to delete this item?"</h2>
                            <div class="modal-actions">
                                <button
                                    class="cancel-button"
                                    disabled=cancel_disabled
                                    on:click=move |_| on_cancel_delete.run(())
                                >
                                    "Cancel"
                                </button>
                                <button
                                    class="delete-button"
                                    disabled=delete_disabled
                                    on:click=move |_| on_confirm_delete.run(())
                                >
                                    {delete_label}
                                </button>
                            </div>
                        </div>
                    </div>
                }
            })
        }
    };

    let state_for_username = state.clone();
    let state_for_logout = state.clone();
    let state_for_posts_each = state.clone();
    let state_for_cards = state.clone();

    view! {
        <div class="feed-container">
            <header class="feed-header">
                <div class="feed-header-content">
                    <h1>"CodeLeap Network"</h1>
                </div>
            </header>
            <div class="profile-area">
                <div class="profile-avatar">{avatar}</div>
                <div class="profile-info">
                    <span class="profile-label">"Logged in as:"</span>
                    <span class="profile-username">
                        {move || state_for_username.username.get()}
                    </span>
                </div>
                <button class="logout-button" on:click=move |_| state_for_logout.log_out()>
                    "Logout"
                </button>
            </div>
            <main class="feed-content">
                <div class="feed-content-inner">
                    <form class="post-form" on:submit=move |ev| on_create.run(ev)>
                        <h2>"What's on your mind?"</h2>

                        <div class="form-group">
                            <label for="title">"Title"</label>
                            <input
                                id="title"
                                placeholder="Hello world"
                                prop:value=move || title.get()
                                on:input=move |ev| title.set(event_target_value(&ev))
                            />
                        </div>

                        <div class="form-group">
                            <label for="content">"Content"</label>
                            <textarea
                                id="content"
                                placeholder="Content here"
                                prop:value=move || content.get()
                                on:input=move |ev| content.set(event_target_value(&ev))
                            ></textarea>
                        </div>

                        <div class="form-actions">
                            <button type="submit" class="submit-button" disabled=create_disabled>
                                {create_label}
                            </button>
                        </div>
                    </form>

                    <div class="posts-list">
                        <For
                            each=move || state_for_posts_each.posts.get()
                            key=|post| post.clone()
                            children=move |post| {
                                view! {
                                    <PostCard
                                        state=state_for_cards.clone()
                                        post=post
                                        drafts=comment_drafts
                                        editing_comment=editing_comment
                                        open_menu=open_comment_menu
                                        open_comment_input=open_comment_input
                                        on_start_edit=on_start_edit
                                        on_request_delete=on_request_delete
                                    />
                                }
                            }
                        />
                    </div>
                </div>
            </main>

            {edit_modal}
            {delete_modal}
        </div>
    }
}
