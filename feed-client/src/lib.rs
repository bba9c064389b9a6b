//! Клиентская библиотека для работы с удалённой коллекцией постов по HTTP.
//!
//! Коллекция поддерживает четыре операции: список, создание, обновление и
//! удаление постов (`reqwest`). Аутентификации нет: автор передаётся полем
//! `username` при создании, сервер принимает его как есть.
//!
//! Лайки и комментарии через эту библиотеку не проходят — они живут только
//! на устройстве пользователя.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{FeedClientError, FeedClientResult};
pub use models::{Post, PostsPage};

use http_client::HttpClient;

#[derive(Debug, Clone)]
/// Клиент удалённой коллекции постов.
pub struct FeedClient {
    http_client: HttpClient,
}

impl FeedClient {
    /// Создаёт клиент с базовым URL коллекции, например
    /// `https://dev.codeleap.co.uk/careers`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(base_url),
        }
    }

    /// Возвращает текущую страницу списка постов.
    ///
    /// Ссылки пагинации из ответа не обходятся: приложению достаточно
    /// текущей выборки.
    pub async fn list_posts(&self) -> FeedClientResult<PostsPage> {
        self.http_client.list_posts().await
    }

    /// Создаёт новый пост от имени `username`.
    pub async fn create_post(
        &self,
        username: &str,
        title: &str,
        content: &str,
    ) -> FeedClientResult<Post> {
        self.http_client.create_post(username, title, content).await
    }

    /// Обновляет заголовок и содержимое поста по идентификатору.
    pub async fn update_post(&self, id: i64, title: &str, content: &str) -> FeedClientResult<Post> {
        self.http_client.update_post(id, title, content).await
    }

    /// Удаляет пост по идентификатору.
    pub async fn delete_post(&self, id: i64) -> FeedClientResult<()> {
        self.http_client.delete_post(id).await
    }
}
