use reqwest::{Client, Method};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{FeedClientError, FeedClientResult};
use crate::models::{Post, PostsPage};

#[derive(Debug, Serialize)]
struct CreatePostRequestDto<'a> {
    username: &'a str,
    title: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdatePostRequestDto<'a> {
    title: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    detail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PostDto {
    id: i64,
    username: String,
    title: String,
    content: String,
    created_datetime: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
struct PostsPageDto {
    count: u64,
    next: Option<String>,
    previous: Option<String>,
    results: Vec<PostDto>,
}

impl From<PostDto> for Post {
    fn from(value: PostDto) -> Self {
        Self {
            id: value.id,
            username: value.username,
            title: value.title,
            content: value.content,
            created_datetime: value.created_datetime,
        }
    }
}

impl From<PostsPageDto> for PostsPage {
    fn from(value: PostsPageDto) -> Self {
        Self {
            count: value.count,
            next: value.next,
            previous: value.previous,
            results: value.results.into_iter().map(Post::from).collect(),
        }
    }
}

#[derive(Debug, Clone)]
/// HTTP-клиент для работы с удалённой коллекцией постов.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт новый HTTP-клиент с базовым URL коллекции.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: base_url.into(),
            client,
        }
    }

    // Коллекция ожидает завершающий слэш: "{base}/" и "{base}/{id}/".
    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode_error(response: reqwest::Response) -> FeedClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body
                .detail
                .unwrap_or_else(|| format!("http status {status}")),
            Err(_) => format!("http status {status}"),
        };
        FeedClientError::from_http_status(status, Some(message))
    }

    /// универсальный helper для отправки запросов с json-payload
    async fn send_json<TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        body: &TReq,
    ) -> FeedClientResult<TRes>
    where
        TReq: Serialize,
        TRes: DeserializeOwned,
    {
        let url = self.endpoint(path);

        let response = self
            .client
            .request(method, url)
            .json(body)
            .send()
            .await
            .map_err(FeedClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .json::<TRes>()
            .await
            .map_err(FeedClientError::from_reqwest)
    }

    /// Возвращает текущую страницу списка постов.
    pub async fn list_posts(&self) -> FeedClientResult<PostsPage> {
        let url = self.endpoint("/");

        let response = self
            .client
            .request(Method::GET, url)
            .send()
            .await
            .map_err(FeedClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        let dto = response
            .json::<PostsPageDto>()
            .await
            .map_err(FeedClientError::from_reqwest)?;
        Ok(dto.into())
    }

    /// Создаёт пост от имени указанного пользователя.
    pub async fn create_post(
        &self,
        username: &str,
        title: &str,
        content: &str,
    ) -> FeedClientResult<Post> {
        let payload = CreatePostRequestDto {
            username,
            title,
            content,
        };
        let dto: PostDto = self.send_json(Method::POST, "/", &payload).await?;
        Ok(dto.into())
    }

    /// Обновляет заголовок и содержимое поста по идентификатору.
    pub async fn update_post(&self, id: i64, title: &str, content: &str) -> FeedClientResult<Post> {
        let payload = UpdatePostRequestDto { title, content };
        let dto: PostDto = self
            .send_json(Method::PATCH, &format!("{id}/"), &payload)
            .await?;
        Ok(dto.into())
    }

    /// Удаляет пост по идентификатору.
    pub async fn delete_post(&self, id: i64) -> FeedClientResult<()> {
        let url = self.endpoint(&format!("{id}/"));

        let response = self
            .client
            .request(Method::DELETE, url)
            .send()
            .await
            .map_err(FeedClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        Ok(())
    }
}
