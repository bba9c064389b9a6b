use gloo_net::http::Request;
use serde::de::DeserializeOwned;

use crate::models::{CreatePostRequest, PostsPage, RemotePost, UpdatePostRequest};

const API_BASE_URL: &str = match option_env!("FEED_API_URL") {
    Some(value) => value,
    None => "https://dev.codeleap.co.uk/careers",
};

#[derive(Debug, Clone)]
pub(crate) enum ApiError {
    Network(String),
    Http { status: u16, message: String },
    Decode(String),
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Http { status, message } => write!(f, "http error {status}: {message}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

// Коллекция ожидает завершающий слэш: "{base}/" и "{base}/{id}/".
fn endpoint(path: &str) -> String {
    format!(
        "{}/{}",
        API_BASE_URL.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

async fn parse_json<T: DeserializeOwned>(response: gloo_net::http::Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

async fn parse_error_body(response: gloo_net::http::Response) -> ApiError {
    let status = response.status();
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "request failed".to_string());

    let fallback = match status {
        400 => "bad request".to_string(),
        404 => "post not found".to_string(),
        500..=599 => "server error".to_string(),
        _ => format!("http status {status}"),
    };

    let message = if text.trim().is_empty() { fallback } else { text };

    ApiError::Http { status, message }
}

pub(crate) async fn list_posts() -> Result<Vec<RemotePost>, ApiError> {
    let response = Request::get(&endpoint("/"))
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    let page: PostsPage = parse_json(response).await?;
    Ok(page.results)
}

pub(crate) async fn create_post(
    username: &str,
    title: &str,
    content: &str,
) -> Result<RemotePost, ApiError> {
    let payload = CreatePostRequest {
        username: username.to_string(),
        title: title.to_string(),
        content: content.to_string(),
    };

    let response = Request::post(&endpoint("/"))
        .json(&payload)
        .map_err(|err| ApiError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    parse_json(response).await
}

pub(crate) async fn update_post(
    id: i64,
    title: &str,
    content: &str,
) -> Result<RemotePost, ApiError> {
    let payload = UpdatePostRequest {
        title: title.to_string(),
        content: content.to_string(),
    };

    let response = Request::patch(&endpoint(&format!("{id}/")))
        .json(&payload)
        .map_err(|err| ApiError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    parse_json(response).await
}

pub(crate) async fn delete_post(id: i64) -> Result<(), ApiError> {
    let response = Request::delete(&endpoint(&format!("{id}/")))
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    Ok(())
}
