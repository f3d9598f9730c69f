use reqwest::{Client, StatusCode};

use super::{FetchConfig, FetchError, GeodataService};
use crate::model::overpass::{OverpassQuery, OverpassResponse};

/// [`GeodataService`] backed by an Overpass interpreter over HTTP. the query is
/// sent as the form-encoded `data` field of a POST.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: Client,
    endpoint: String,
}

impl OverpassClient {
    pub fn new(config: &FetchConfig) -> Result<OverpassClient, FetchError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| FetchError::ClientBuildError(e.to_string()))?;
        Ok(OverpassClient {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

impl GeodataService for OverpassClient {
    async fn query(&self, query: &OverpassQuery) -> Result<OverpassResponse, FetchError> {
        let ql = query.to_string();
        log::debug!("POST {}\n{ql}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("data", ql)])
            .send()
            .await
            .map_err(classify_request_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::TransientFetchError(format!("failure reading body: {e}")))?;
        if !status.is_success() {
            return Err(classify_status(status, &body));
        }

        let decoded: OverpassResponse = serde_json::from_str(&body).map_err(|e| {
            FetchError::TransientFetchError(format!("failure decoding response: {e}"))
        })?;
        match decoded.runtime_error() {
            Some(remark) if decoded.elements.is_empty() => {
                Err(FetchError::TransientFetchError(String::from(remark)))
            }
            _ => Ok(decoded),
        }
    }
}

fn classify_request_error(e: reqwest::Error) -> FetchError {
    if e.is_builder() {
        FetchError::RequestRejected(e.to_string())
    } else {
        FetchError::TransientFetchError(e.to_string())
    }
}

/// rate limiting and server errors are retried, any other failure status is not.
fn classify_status(status: StatusCode, body: &str) -> FetchError {
    let snippet = body.chars().take(200).collect::<String>();
    let msg = format!("{status}: {snippet}");
    if status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
        || status.is_server_error()
    {
        FetchError::TransientFetchError(msg)
    } else {
        FetchError::RequestRejected(msg)
    }
}
