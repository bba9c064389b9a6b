use std::collections::HashMap;

use leptos::ev;
use leptos::html;
use leptos::prelude::*;

use crate::dom;
use crate::models::Comment;
use crate::region;
use crate::state::AppState;
use crate::store;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EditingComment {
    pub(crate) comment_id: i64,
    pub(crate) text: String,
}

#[component]
pub(crate) fn CommentSection(
    state: AppState,
    post_id: i64,
    comments: Vec<Comment>,
    drafts: RwSignal<HashMap<i64, String>>,
    editing_comment: RwSignal<Option<EditingComment>>,
    open_menu: RwSignal<Option<i64>>,
    open_input: RwSignal<Option<i64>>,
) -> impl IntoView {
    let composer_ref = NodeRef::<html::Textarea>::new();
    let has_comments = !comments.is_empty();

    let submit_comment = Callback::new({
        let state = state.clone();
        move |_: ()| {
            let text = drafts
                .get_untracked()
                .get(&post_id)
                .cloned()
                .unwrap_or_default()
                .trim()
                .to_string();
            if text.is_empty() {
                return;
            }

            let comment = Comment {
                id: state.allocate_comment_id(),
                username: state.username.get_untracked(),
                text,
                created_at: dom::now_iso(),
            };
            state
                .posts
                .update(|posts| store::add_comment(posts, post_id, comment));
            state.persist_comments();
            drafts.update(|entries| {
                entries.insert(post_id, String::new());
            });
        }
    });

    // Enter отправляет, Shift+Enter переносит строку.
    let composer = move || {
        (open_input.get() == Some(post_id)).then(|| {
            view! {
                <div class="add-comment-form">
                    <textarea
                        class="add-comment-input"
                        rows=3
                        placeholder="Add a comment..."
                        node_ref=composer_ref
                        prop:value=move || drafts.get().get(&post_id).cloned().unwrap_or_default()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            drafts.update(|entries| {
                                entries.insert(post_id, value);
                            });
                            if let Some(textarea) = composer_ref.get_untracked() {
                                dom::autosize_textarea(&textarea);
                            }
                        }
                        on:keydown=move |ev| {
                            if ev.key() == "Enter" && !ev.shift_key() {
                                ev.prevent_default();
                                submit_comment.run(());
                            }
                        }
                    ></textarea>
                    <button class="add-comment-btn" on:click=move |_| submit_comment.run(())>
                        "Send"
                    </button>
                </div>
            }
        })
    };

    let state_for_items = state.clone();
    move || {
        let visible = has_comments || open_input.get() == Some(post_id);
        visible.then(|| {
            let list = has_comments.then(|| {
                let items = comments
                    .iter()
                    .cloned()
                    .map(|comment| {
                        view! {
                            <CommentItem
                                state=state_for_items.clone()
                                post_id=post_id
                                comment=comment
                                editing_comment=editing_comment
                                open_menu=open_menu
                            />
                        }
                    })
                    .collect_view();
                view! { <ul class="comments-list">{items}</ul> }
            });

            view! {
                <div class="comments-section" class:has-comments=has_comments>
                    {list}
                    {composer}
                </div>
            }
        })
    }
}

#[component]
fn CommentItem(
    state: AppState,
    post_id: i64,
    comment: Comment,
    editing_comment: RwSignal<Option<EditingComment>>,
    open_menu: RwSignal<Option<i64>>,
) -> impl IntoView {
    let comment_id = comment.id;
    let trigger_ref = NodeRef::<html::Button>::new();
    let menu_ref = NodeRef::<html::Div>::new();
    let menu_pos = RwSignal::new((0.0_f64, 0.0_f64));

    // Меню закрывается кликом вне триггера и тела меню.
    let outside_click = window_event_listener(ev::mousedown, move |ev| {
        if open_menu.get_untracked() != Some(comment_id) {
            return;
        }

        let mut regions = Vec::new();
        if let Some(trigger) = trigger_ref.get_untracked() {
            regions.push(dom::element_region(&trigger));
        }
        if let Some(menu) = menu_ref.get_untracked() {
            regions.push(dom::element_region(&menu));
        }
        if region::is_outside(&regions, ev.client_x() as f64, ev.client_y() as f64) {
            open_menu.set(None);
        }
    });
    on_cleanup(move || outside_click.remove());

    let toggle_menu = move |_| {
        if open_menu.get_untracked() == Some(comment_id) {
            open_menu.set(None);
            return;
        }
        // Позиция пересчитывается от текущего места триггера при каждом
        // открытии.
        if let Some(trigger) = trigger_ref.get_untracked() {
            let (top, left) =
                region::dropdown_position(dom::element_region(&trigger), dom::scroll_y());
            menu_pos.set((top, left));
        }
        open_menu.set(Some(comment_id));
    };

    let start_edit = {
        let text = comment.text.clone();
        move |_| {
            editing_comment.set(Some(EditingComment {
                comment_id,
                text: text.clone(),
            }));
            open_menu.set(None);
        }
    };

    let delete_comment = {
        let state = state.clone();
        move |_| {
            state
                .posts
                .update(|posts| store::delete_comment(posts, post_id, comment_id));
            state.persist_comments();
            open_menu.set(None);
        }
    };

    let save_edit = Callback::new({
        let state = state.clone();
        move |_: ()| {
            let Some(editing) = editing_comment.get_untracked() else {
                return;
            };
            state.posts.update(|posts| {
                store::edit_comment(posts, post_id, editing.comment_id, &editing.text)
            });
            state.persist_comments();
            editing_comment.set(None);
        }
    });

    let cancel_edit = move |_| editing_comment.set(None);

    let menu = {
        let start_edit = start_edit.clone();
        let delete_comment = delete_comment.clone();
        move || {
            (open_menu.get() == Some(comment_id)).then(|| {
                let (top, left) = menu_pos.get();
                view! {
                    <div
                        class="comment-menu-dropdown"
                        node_ref=menu_ref
                        style=format!("position: fixed; top: {top}px; left: {left}px; z-index: 9999;")
                    >
                        <button class="comment-menu-item" on:click=start_edit.clone()>
                            "Edit"
                        </button>
                        <button class="comment-menu-item" on:click=delete_comment.clone()>
                            "Delete"
                        </button>
                    </div>
                }
            })
        }
    };

    let edit_form = move || {
        view! {
            <div class="comment-edit-form">
                <textarea
                    class="comment-edit-input"
                    prop:value=move || {
                        editing_comment
                            .get()
                            .map(|editing| editing.text)
                            .unwrap_or_default()
                    }
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        editing_comment.update(|editing| {
                            if let Some(editing) = editing {
                                editing.text = value;
                            }
                        });
                    }
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" && !ev.shift_key() {
                            ev.prevent_default();
                            save_edit.run(());
                        }
                    }
                ></textarea>
                <div class="modal-actions">
                    <button type="button" class="cancel-button" on:click=cancel_edit>
                        "Cancel"
                    </button>
                    <button type="button" class="save-button" on:click=move |_| save_edit.run(())>
                        "Save"
                    </button>
                </div>
            </div>
        }
    };

    let is_editing =
        move || editing_comment.get().is_some_and(|editing| editing.comment_id == comment_id);

    let body = {
        let state = state.clone();
        let author = comment.username.clone();
        let text = comment.text.clone();
        let menu = menu.clone();
        move || {
            if is_editing() {
                edit_form().into_any()
            } else {
                let actions = store::is_owner(&state.username.get(), &author).then(|| {
                    let menu = menu.clone();
                    view! {
                        <div class="comment-menu">
                            <button
                                class="comment-menu-btn"
                                node_ref=trigger_ref
                                aria-label="Open comment actions menu"
                                on:click=toggle_menu
                            >
                                "..."
                            </button>
                            {menu}
                        </div>
                    }
                });

                view! {
                    <span class="comment-main">
                        <span class="comment-username">{author.clone()}":"</span>
                        " "
                        {text.clone()}
                    </span>
                    {actions}
                }
                .into_any()
            }
        }
    };

    view! { <li class="comment-item">{body}</li> }
}
