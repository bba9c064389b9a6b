use std::collections::HashMap;

use chrono::DateTime;

use crate::models::{Comment, Post, RemotePost};

// Непарсящиеся даты уходят в конец ленты.
fn created_sort_key(raw: &str) -> i64 {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.timestamp_micros())
        .unwrap_or(i64::MIN)
}

pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by_key(|post| std::cmp::Reverse(created_sort_key(&post.created_datetime)));
}

fn merged_post(
    remote: RemotePost,
    likes: &HashMap<i64, Vec<String>>,
    comments: &HashMap<i64, Vec<Comment>>,
) -> Post {
    Post {
        likes: likes.get(&remote.id).cloned().unwrap_or_default(),
        comments: comments.get(&remote.id).cloned().unwrap_or_default(),
        id: remote.id,
        username: remote.username,
        title: remote.title,
        content: remote.content,
        created_datetime: remote.created_datetime,
    }
}

/// Собирает ленту из серверной выборки и локально сохранённых лайков и
/// комментариев, новые посты сверху.
pub fn merge_remote(
    remote: Vec<RemotePost>,
    likes: &HashMap<i64, Vec<String>>,
    comments: &HashMap<i64, Vec<Comment>>,
) -> Vec<Post> {
    let mut posts: Vec<Post> = remote
        .into_iter()
        .map(|post| merged_post(post, likes, comments))
        .collect();
    sort_newest_first(&mut posts);
    posts
}

pub fn prepend_created(posts: &mut Vec<Post>, created: RemotePost) {
    posts.insert(
        0,
        Post {
            id: created.id,
            username: created.username,
            title: created.title,
            content: created.content,
            created_datetime: created.created_datetime,
            likes: Vec::new(),
            comments: Vec::new(),
        },
    );
}

// Лайки и комментарии поста переживают обновление: сервер про них не знает.
pub fn apply_updated(posts: &mut [Post], updated: RemotePost) {
    if let Some(post) = posts.iter_mut().find(|post| post.id == updated.id) {
        post.username = updated.username;
        post.title = updated.title;
        post.content = updated.content;
        post.created_datetime = updated.created_datetime;
    }
}

pub fn remove_post(posts: &mut Vec<Post>, id: i64) {
    posts.retain(|post| post.id != id);
}

pub fn toggle_like(posts: &mut [Post], id: i64, username: &str) {
    if let Some(post) = posts.iter_mut().find(|post| post.id == id) {
        if post.likes.iter().any(|liker| liker == username) {
            post.likes.retain(|liker| liker != username);
        } else {
            post.likes.push(username.to_string());
        }
    }
}

pub fn add_comment(posts: &mut [Post], post_id: i64, comment: Comment) {
    if let Some(post) = posts.iter_mut().find(|post| post.id == post_id) {
        post.comments.push(comment);
    }
}

pub fn edit_comment(posts: &mut [Post], post_id: i64, comment_id: i64, text: &str) {
    if let Some(post) = posts.iter_mut().find(|post| post.id == post_id)
        && let Some(comment) = post
            .comments
            .iter_mut()
            .find(|comment| comment.id == comment_id)
    {
        comment.text = text.to_string();
    }
}

pub fn delete_comment(posts: &mut [Post], post_id: i64, comment_id: i64) {
    if let Some(post) = posts.iter_mut().find(|post| post.id == post_id) {
        post.comments.retain(|comment| comment.id != comment_id);
    }
}

/// Снимок лайков всех постов для записи в локальное хранилище.
pub fn likes_by_post(posts: &[Post]) -> HashMap<i64, Vec<String>> {
    posts
        .iter()
        .map(|post| (post.id, post.likes.clone()))
        .collect()
}

/// Снимок комментариев всех постов для записи в локальное хранилище.
pub fn comments_by_post(posts: &[Post]) -> HashMap<i64, Vec<Comment>> {
    posts
        .iter()
        .map(|post| (post.id, post.comments.clone()))
        .collect()
}

/// Проверка владения: имена сравниваются без пробелов по краям и без учёта
/// регистра. Это только UI-ограничение, сервер запросы не фильтрует.
pub fn is_owner(current_username: &str, author: &str) -> bool {
    let current = current_username.trim().to_lowercase();
    let author = author.trim().to_lowercase();
    !current.is_empty() && !author.is_empty() && current == author
}

pub fn is_form_valid(title: &str, content: &str) -> bool {
    !title.trim().is_empty() && !content.trim().is_empty()
}

/// "2025-03-20T14:05:00Z" -> "March 20, 2025, 02:05 PM" (UTC).
pub fn format_created(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%B %-d, %Y, %I:%M %p").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote_post(id: i64, username: &str, created: &str) -> RemotePost {
        RemotePost {
            id,
            username: username.to_string(),
            title: format!("title {id}"),
            content: format!("content {id}"),
            created_datetime: created.to_string(),
        }
    }

    fn sample_post(id: i64, username: &str, created: &str) -> Post {
        Post {
            id,
            username: username.to_string(),
            title: format!("title {id}"),
            content: format!("content {id}"),
            created_datetime: created.to_string(),
            likes: Vec::new(),
            comments: Vec::new(),
        }
    }

    fn sample_comment(id: i64, username: &str, text: &str) -> Comment {
        Comment {
            id,
            username: username.to_string(),
            text: text.to_string(),
            created_at: "2025-03-20T12:00:00Z".to_string(),
        }
    }

    fn assert_newest_first(posts: &[Post]) {
        for pair in posts.windows(2) {
            assert!(
                created_sort_key(&pair[0].created_datetime)
                    >= created_sort_key(&pair[1].created_datetime),
                "posts must be ordered newest first"
            );
        }
    }

    #[test]
    fn merge_remote_sorts_newest_first() {
        let remote = vec![
            remote_post(1, "alice", "2025-03-18T10:00:00Z"),
            remote_post(2, "bob", "2025-03-20T10:00:00Z"),
            remote_post(3, "carol", "2025-03-19T10:00:00Z"),
        ];
        let posts = merge_remote(remote, &HashMap::new(), &HashMap::new());

        assert_eq!(
            posts.iter().map(|post| post.id).collect::<Vec<_>>(),
            vec![2, 3, 1]
        );
        assert_newest_first(&posts);
    }

    #[test]
    fn merge_remote_attaches_stored_likes_and_comments_by_id() {
        let remote = vec![
            remote_post(1, "alice", "2025-03-20T10:00:00Z"),
            remote_post(2, "bob", "2025-03-19T10:00:00Z"),
        ];
        let mut likes = HashMap::new();
        likes.insert(1, vec!["bob".to_string()]);
        let mut comments = HashMap::new();
        comments.insert(2, vec![sample_comment(1, "alice", "nice")]);

        let posts = merge_remote(remote, &likes, &comments);

        assert_eq!(posts[0].likes, vec!["bob".to_string()]);
        assert!(posts[0].comments.is_empty());
        assert!(posts[1].likes.is_empty());
        assert_eq!(posts[1].comments.len(), 1);
    }

    #[test]
    fn merge_remote_falls_back_to_empty_for_unknown_ids() {
        let remote = vec![remote_post(7, "alice", "2025-03-20T10:00:00Z")];
        let mut likes = HashMap::new();
        likes.insert(999, vec!["bob".to_string()]);

        let posts = merge_remote(remote, &likes, &HashMap::new());

        assert!(posts[0].likes.is_empty());
        assert!(posts[0].comments.is_empty());
    }

    #[test]
    fn merge_remote_on_fresh_device_sees_no_likes() {
        // Лайки живут на устройстве: чужая сессия той же выборки их не видит.
        let remote = vec![remote_post(1, "alice", "2025-03-20T10:00:00Z")];
        let mut alice_likes = HashMap::new();
        alice_likes.insert(1, vec!["Alice".to_string()]);

        let alice_view = merge_remote(remote.clone(), &alice_likes, &HashMap::new());
        let bob_view = merge_remote(remote, &HashMap::new(), &HashMap::new());

        assert_eq!(alice_view[0].likes.len(), 1);
        assert!(bob_view[0].likes.is_empty());
    }

    #[test]
    fn created_scenario_returns_post_with_empty_likes_and_comments() {
        let mut posts = Vec::new();
        prepend_created(
            &mut posts,
            RemotePost {
                id: 1,
                username: "Alice".to_string(),
                title: "Hello".to_string(),
                content: "World".to_string(),
                created_datetime: "2025-03-20T10:00:00Z".to_string(),
            },
        );

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].username, "Alice");
        assert_eq!(posts[0].title, "Hello");
        assert!(posts[0].likes.is_empty());
        assert!(posts[0].comments.is_empty());
    }

    #[test]
    fn prepend_created_keeps_order_non_increasing() {
        let remote = vec![remote_post(1, "alice", "2025-03-18T10:00:00Z")];
        let mut posts = merge_remote(remote, &HashMap::new(), &HashMap::new());

        prepend_created(&mut posts, remote_post(2, "bob", "2025-03-20T10:00:00Z"));

        assert_eq!(posts[0].id, 2);
        assert_newest_first(&posts);
    }

    #[test]
    fn apply_updated_replaces_fields_and_preserves_likes_and_comments() {
        let mut posts = vec![sample_post(1, "alice", "2025-03-20T10:00:00Z")];
        posts[0].likes.push("bob".to_string());
        posts[0].comments.push(sample_comment(1, "bob", "hi"));

        apply_updated(
            &mut posts,
            RemotePost {
                id: 1,
                username: "alice".to_string(),
                title: "new title".to_string(),
                content: "new content".to_string(),
                created_datetime: "2025-03-20T10:00:00Z".to_string(),
            },
        );

        assert_eq!(posts[0].title, "new title");
        assert_eq!(posts[0].content, "new content");
        assert_eq!(posts[0].likes, vec!["bob".to_string()]);
        assert_eq!(posts[0].comments.len(), 1);
    }

    #[test]
    fn apply_updated_ignores_unknown_id() {
        let mut posts = vec![sample_post(1, "alice", "2025-03-20T10:00:00Z")];
        let before = posts.clone();

        apply_updated(&mut posts, remote_post(999, "ghost", "2025-03-21T10:00:00Z"));

        assert_eq!(posts, before);
    }

    #[test]
    fn remove_post_removes_only_matching_id() {
        let mut posts = vec![
            sample_post(1, "alice", "2025-03-20T10:00:00Z"),
            sample_post(2, "bob", "2025-03-19T10:00:00Z"),
        ];

        remove_post(&mut posts, 1);

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, 2);
    }

    #[test]
    fn toggle_like_adds_then_removes() {
        let mut posts = vec![sample_post(1, "alice", "2025-03-20T10:00:00Z")];

        toggle_like(&mut posts, 1, "bob");
        assert_eq!(posts[0].likes, vec!["bob".to_string()]);

        toggle_like(&mut posts, 1, "bob");
        assert!(posts[0].likes.is_empty());
    }

    #[test]
    fn toggle_like_twice_is_identity() {
        let mut posts = vec![sample_post(1, "alice", "2025-03-20T10:00:00Z")];
        posts[0].likes = vec!["carol".to_string(), "dave".to_string()];
        let before = posts[0].likes.clone();

        toggle_like(&mut posts, 1, "bob");
        toggle_like(&mut posts, 1, "bob");

        assert_eq!(posts[0].likes, before);
    }

    #[test]
    fn toggle_like_keeps_other_likers() {
        let mut posts = vec![sample_post(1, "alice", "2025-03-20T10:00:00Z")];
        posts[0].likes = vec!["carol".to_string(), "bob".to_string(), "dave".to_string()];

        toggle_like(&mut posts, 1, "bob");

        assert_eq!(
            posts[0].likes,
            vec!["carol".to_string(), "dave".to_string()]
        );
    }

    #[test]
    fn add_comment_appends_in_order() {
        let mut posts = vec![sample_post(1, "alice", "2025-03-20T10:00:00Z")];

        add_comment(&mut posts, 1, sample_comment(1, "bob", "first"));
        add_comment(&mut posts, 1, sample_comment(2, "carol", "second"));

        let texts: Vec<&str> = posts[0]
            .comments
            .iter()
            .map(|comment| comment.text.as_str())
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn edit_comment_changes_only_target_text() {
        let mut posts = vec![sample_post(1, "alice", "2025-03-20T10:00:00Z")];
        add_comment(&mut posts, 1, sample_comment(1, "bob", "first"));
        add_comment(&mut posts, 1, sample_comment(2, "carol", "second"));
        let untouched = posts[0].comments[0].clone();

        edit_comment(&mut posts, 1, 2, "edited");

        assert_eq!(posts[0].comments[0], untouched);
        let edited = &posts[0].comments[1];
        assert_eq!(edited.text, "edited");
        assert_eq!(edited.id, 2);
        assert_eq!(edited.username, "carol");
        assert_eq!(edited.created_at, "2025-03-20T12:00:00Z");
    }

    #[test]
    fn delete_comment_removes_exactly_one_and_keeps_order() {
        let mut posts = vec![sample_post(1, "alice", "2025-03-20T10:00:00Z")];
        add_comment(&mut posts, 1, sample_comment(1, "bob", "first"));
        add_comment(&mut posts, 1, sample_comment(2, "carol", "second"));
        add_comment(&mut posts, 1, sample_comment(3, "dave", "third"));

        delete_comment(&mut posts, 1, 2);

        let ids: Vec<i64> = posts[0].comments.iter().map(|comment| comment.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn snapshots_cover_every_post() {
        let mut posts = vec![
            sample_post(1, "alice", "2025-03-20T10:00:00Z"),
            sample_post(2, "bob", "2025-03-19T10:00:00Z"),
        ];
        toggle_like(&mut posts, 1, "bob");
        add_comment(&mut posts, 2, sample_comment(1, "alice", "hi"));

        let likes = likes_by_post(&posts);
        let comments = comments_by_post(&posts);

        assert_eq!(likes.get(&1), Some(&vec!["bob".to_string()]));
        assert_eq!(likes.get(&2), Some(&Vec::new()));
        assert_eq!(comments.get(&1), Some(&Vec::new()));
        assert_eq!(comments.get(&2).map(Vec::len), Some(1));
    }

    #[test]
    fn comments_survive_simulated_reload() {
        let remote = vec![remote_post(1, "alice", "2025-03-20T10:00:00Z")];
        let mut posts = merge_remote(remote.clone(), &HashMap::new(), &HashMap::new());
        add_comment(&mut posts, 1, sample_comment(1, "bob", "still here"));
        let stored = comments_by_post(&posts);

        // Перезагрузка: свежая лента из той же выборки и сохранённого снимка.
        let reloaded = merge_remote(remote, &HashMap::new(), &stored);

        assert_eq!(reloaded[0].comments.len(), 1);
        assert_eq!(reloaded[0].comments[0].text, "still here");
    }

    #[test]
    fn is_owner_ignores_case_and_surrounding_whitespace() {
        assert!(is_owner("Alice", "alice"));
        assert!(is_owner("  alice  ", "ALICE"));
        assert!(!is_owner("alice", "bob"));
    }

    #[test]
    fn is_owner_rejects_blank_names() {
        assert!(!is_owner("", ""));
        assert!(!is_owner("   ", "   "));
        assert!(!is_owner("alice", ""));
    }

    #[test]
    fn is_form_valid_requires_both_fields_after_trim() {
        assert!(is_form_valid("title", "content"));
        assert!(!is_form_valid("  ", "content"));
        assert!(!is_form_valid("title", "  "));
        assert!(!is_form_valid("", ""));
    }

    #[test]
    fn format_created_renders_long_date() {
        assert_eq!(
            format_created("2025-03-20T14:05:00Z"),
            "March 20, 2025, 02:05 PM"
        );
    }

    #[test]
    fn format_created_falls_back_to_raw_value() {
        assert_eq!(format_created("not-a-date"), "not-a-date");
    }

    #[test]
    fn unparseable_dates_sink_to_the_bottom() {
        let remote = vec![
            remote_post(1, "alice", "garbage"),
            remote_post(2, "bob", "2025-03-20T10:00:00Z"),
        ];
        let posts = merge_remote(remote, &HashMap::new(), &HashMap::new());

        assert_eq!(posts[0].id, 2);
        assert_eq!(posts[1].id, 1);
    }
}
