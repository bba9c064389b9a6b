use std::time::Duration;

use leptos::prelude::*;

use crate::models::Post;
use crate::storage::{self, BrowserStorage};
use crate::store;

const TOAST_DISMISS: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ToastMessage {
    pub(crate) seq: u64,
    pub(crate) kind: ToastKind,
    pub(crate) text: String,
}

#[derive(Debug, Clone)]
pub(crate) struct AppState {
    pub(crate) username: RwSignal<String>,
    pub(crate) posts: RwSignal<Vec<Post>>,
    pub(crate) loading: RwSignal<bool>,
    pub(crate) deleting: RwSignal<bool>,
    pub(crate) toast: RwSignal<Option<ToastMessage>>,
    next_comment_id: RwSignal<i64>,
    toast_seq: RwSignal<u64>,
}

impl AppState {
    pub(crate) fn new() -> Self {
        Self {
            username: RwSignal::new(storage::load_username(&BrowserStorage).unwrap_or_default()),
            posts: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            deleting: RwSignal::new(false),
            toast: RwSignal::new(None),
            // Счётчик комментариев живёт в рамках сессии и после перезагрузки
            // начинается с 1 заново; сохранённые комментарии остаются со
            // старыми id.
            next_comment_id: RwSignal::new(1),
            toast_seq: RwSignal::new(0),
        }
    }

    pub(crate) fn signed_in(&self) -> bool {
        !self.username.get().is_empty()
    }

    pub(crate) fn sign_up(&self, username: &str) {
        let username = username.trim().to_string();
        if username.is_empty() {
            return;
        }
        if let Err(err) = storage::save_username(&BrowserStorage, &username) {
            self.show_error(err);
            return;
        }
        self.username.set(username);
    }

    pub(crate) fn log_out(&self) {
        if let Err(err) = storage::clear_username(&BrowserStorage) {
            self.show_error(err);
            return;
        }
        self.username.set(String::new());
    }

    pub(crate) fn allocate_comment_id(&self) -> i64 {
        let id = self.next_comment_id.get_untracked();
        self.next_comment_id.set(id + 1);
        id
    }

    pub(crate) fn show_success(&self, text: impl Into<String>) {
        self.show_toast(ToastKind::Success, text.into());
    }

    pub(crate) fn show_error(&self, text: impl Into<String>) {
        self.show_toast(ToastKind::Error, text.into());
    }

    fn show_toast(&self, kind: ToastKind, text: String) {
        let seq = self.toast_seq.get_untracked() + 1;
        self.toast_seq.set(seq);
        self.toast.set(Some(ToastMessage { seq, kind, text }));

        // Тост живёт фиксированное время; более новый тост таймер не трогает.
        let toast = self.toast;
        set_timeout(
            move || {
                if toast.get_untracked().is_some_and(|current| current.seq == seq) {
                    toast.set(None);
                }
            },
            TOAST_DISMISS,
        );
    }

    pub(crate) fn dismiss_toast(&self) {
        self.toast.set(None);
    }

    pub(crate) fn persist_likes(&self) {
        let snapshot = store::likes_by_post(&self.posts.get_untracked());
        if let Err(err) = storage::save_likes(&BrowserStorage, &snapshot) {
            self.show_error(err);
        }
    }

    pub(crate) fn persist_comments(&self) {
        let snapshot = store::comments_by_post(&self.posts.get_untracked());
        if let Err(err) = storage::save_comments(&BrowserStorage, &snapshot) {
            self.show_error(err);
        }
    }
}
