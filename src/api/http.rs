//! HTTP Client
//!
//! JSON request helper shared by the endpoint bindings. `reqwest` runs on
//! the browser's `fetch` when built for wasm32.

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Send a request and decode the JSON response into `T`
pub async fn send_json<B, T>(client: &Client, method: Method, url: &str, body: Option<&B>) -> Result<T, ApiError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let mut request = client
        .request(method.clone(), url)
        .header("Accept", "application/json");
    if let Some(body) = body {
        request = request.json(body);
    }

    log::debug!("[API] {} {}", method, url);
    let response = request.send().await?;

    let status = response.status();
    if !status.is_success() {
        log::warn!("[API] {} {} -> {}", method, url, status);
        return Err(ApiError::Status(status.as_u16()));
    }

    Ok(response.json::<T>().await?)
}
