use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TfsError {
    #[error("HTTP request to {url} failed")]
    HttpError {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to serialize request body")]
    SerdeJson(#[from] serde_json::Error),
    #[error("failed to decode response from {url} (HTTP {status})")]
    Decode {
        url: String,
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },
    #[error("empty response from {url} (HTTP {status})")]
    EmptyBody { url: String, status: StatusCode },
}

/// Client for the changeset reporting service.
///
/// Every call is a single attempt with no timeout: the process waits for as
/// long as the service takes to answer.
pub struct TfsServiceClient {
    client: Client,
    service_url: String,
}

impl TfsServiceClient {
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            service_url: service_url.into(),
        }
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    /// POSTs `body` as JSON and decodes the response body as `T`.
    ///
    /// The status code is logged but not checked, so a failed call shows up
    /// as a [`TfsError::Decode`] carrying the status. Only the first JSON
    /// value of the body is decoded; anything after it is ignored.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        body: &(impl Serialize + ?Sized),
    ) -> Result<T, TfsError> {
        let payload = serde_json::to_vec(body)?;

        log::debug!("Request: POST {}", self.service_url);

        let response = self
            .client
            .post(&self.service_url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|source| self.http_error(source))?;
        let status = response.status();

        log::debug!("Response status: {}", status);
        if !status.is_success() {
            log::warn!("Service answered with HTTP {}", status);
        }

        // Consumes the response, releasing the connection before decoding.
        let bytes = response
            .bytes()
            .await
            .map_err(|source| self.http_error(source))?;
        log::debug!("Response body: {}", String::from_utf8_lossy(&bytes));

        let mut values = serde_json::Deserializer::from_slice(&bytes).into_iter::<T>();
        match values.next() {
            Some(decoded) => decoded.map_err(|source| TfsError::Decode {
                url: self.service_url.clone(),
                status,
                source,
            }),
            None => Err(TfsError::EmptyBody {
                url: self.service_url.clone(),
                status,
            }),
        }
    }

    fn http_error(&self, source: reqwest::Error) -> TfsError {
        TfsError::HttpError {
            url: self.service_url.clone(),
            source,
        }
    }
}
