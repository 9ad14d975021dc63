use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::{client::model::error::ApiError, model::api::ErrorDto};

/// Sends a request, mapping transport failures to a 500 `ApiError`.
pub async fn send_request(request: RequestBuilder) -> Result<Response, ApiError> {
    request
        .send()
        .await
        .map_err(|e| ApiError::new(500, format!("Failed to send request: {}", e)))
}

/// Parses a JSON body on success, or the `{statusCode, statusMessage}` body on failure.
pub async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status().as_u16();

    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::new(500, format!("Failed to parse response: {}", e)))
    } else {
        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorDto>(&body) {
            Ok(error_dto) => error_dto.status_message,
            Err(_) if body.is_empty() => "Unknown error".to_string(),
            Err(_) => body,
        };

        Err(ApiError::new(status, message))
    }
}

/// Sends a request and parses its response.
pub async fn fetch<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = send_request(request).await?;
    parse_response(response).await
}
