use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct RemotePost {
    pub id: i64,
    pub username: String,
    pub title: String,
    pub content: String,
    pub created_datetime: String,
}

// Объединённое представление: серверные поля плюс локальные лайки и
// комментарии. Целиком на сервер никогда не уходит.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Post {
    pub id: i64,
    pub username: String,
    pub title: String,
    pub content: String,
    pub created_datetime: String,
    pub likes: Vec<String>,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub username: String,
    pub text: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostsPage {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<RemotePost>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePostRequest {
    pub username: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
}
