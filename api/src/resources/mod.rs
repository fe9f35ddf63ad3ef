pub mod job;
pub mod tileset;
pub mod tileset_source;

use crate::error::{Error, Result};
use reqwest::{blocking::Response as HttpResponse, StatusCode};
use serde::Deserialize;

/// Body returned by the tilesets API alongside a non-2xx status.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    message: Option<String>,
}

/// Body of write calls which only acknowledge the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Fail with `Error::Api` unless the response has a success status.
pub(crate) fn check_status(http_response: HttpResponse) -> Result<HttpResponse> {
    let status_code = http_response.status();
    if status_code.is_success() {
        return Ok(http_response);
    }

    // The body is informational only, a response we cannot read still yields the status.
    let body = http_response.text().unwrap_or_default();
    Err(Error::Api {
        status_code,
        message: error_message(status_code, &body),
    })
}

/// Decode the JSON body of a successful response.
pub(crate) fn into_result<SuccessT>(http_response: HttpResponse) -> Result<SuccessT>
where
    for<'de> SuccessT: Deserialize<'de>,
{
    check_status(http_response)?
        .json::<SuccessT>()
        .map_err(Error::BadJsonResponse)
}

fn error_message(status_code: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody {
            message: Some(message),
        }) => message,
        _ if body.trim().is_empty() => status_code
            .canonical_reason()
            .unwrap_or_default()
            .to_owned(),
        _ => body.trim().to_owned(),
    }
}
