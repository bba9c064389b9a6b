use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Публичная модель поста.
pub struct Post {
    /// Идентификатор поста (назначается сервером).
    pub id: i64,
    /// Имя автора поста.
    pub username: String,
    /// Заголовок поста.
    pub title: String,
    /// Содержимое поста.
    pub content: String,
    /// Дата и время создания поста (UTC).
    pub created_datetime: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Страница списка постов, как её возвращает удалённая коллекция.
///
/// Ссылки `next`/`previous` клиент не обходит: приложению нужна только
/// текущая выборка `results`.
pub struct PostsPage {
    /// Общее количество постов в коллекции.
    pub count: u64,
    /// Ссылка на следующую страницу, если она есть.
    pub next: Option<String>,
    /// Ссылка на предыдущую страницу, если она есть.
    pub previous: Option<String>,
    /// Посты текущей страницы.
    pub results: Vec<Post>,
}
