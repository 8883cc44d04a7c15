use std::time::Duration;
use log::{debug, trace, error, info};
use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::request::{
  GenerateRequest, GenerateResponse, ModelDescriptor, TagsResponse
};

const TAGS_PATH: &str = "/api/tags";
const GENERATE_PATH: &str = "/api/generate";

/// HTTP client for an Ollama-compatible inference server
#[derive(Debug, Clone)]
pub struct OllamaClient
{   base_url: String
  , http_client: reqwest::Client
}

impl OllamaClient
{   /// Build a client with explicit connect and request timeouts
    pub fn new(
      base_url: &str
    , timeout: Duration
    ) -> Result<Self, Error>
    {   debug!("Creating OllamaClient for {}", base_url);
        let http_client = reqwest::Client::builder()
          .connect_timeout(Duration::from_secs(
            crate::config::CONNECT_TIMEOUT_SECS
          ))
          .timeout(timeout)
          .build()
          .map_err(|e| {
            error!("Failed to build HTTP client: {}", e);
            Error::Other(e.to_string())
          })?;

        Ok(OllamaClient
        {   base_url: base_url.trim_end_matches('/').to_string()
          , http_client
        })
    }

    pub fn base_url(&self) -> &str
    {   &self.base_url
    }

    /// `GET {base}/api/tags`, models in server order
    pub async fn list_models(&self)
      -> Result<Vec<ModelDescriptor>, Error>
    {   let url = format!("{}{}", self.base_url, TAGS_PATH);
        debug!("Listing models from {}", url);

        let response = self.http_client
          .get(&url)
          .send()
          .await
          .map_err(|e| classify_transport(e, &self.base_url))?;

        let tags: TagsResponse = read_json(response).await?;
        let models = tags.into_models();
        info!("Server reports {} models", models.len());
        Ok(models)
    }

    /// `POST {base}/api/generate` with streaming disabled
    pub async fn generate(
      &self
    , model: &str
    , prompt: &str
    ) -> Result<String, Error>
    {   let url = format!("{}{}", self.base_url, GENERATE_PATH);
        let request = GenerateRequest::new(
          model.to_string()
        , prompt.to_string()
        );
        debug!("Requesting completion from {} with {}", url, model);
        trace!("Generate request: {:?}", request);

        let response = self.http_client
          .post(&url)
          .json(&request)
          .send()
          .await
          .map_err(|e| classify_transport(e, &self.base_url))?;

        let generated: GenerateResponse = read_json(response).await?;
        debug!("Completion is {} bytes", generated.response.len());
        Ok(generated.response)
    }
}

async fn read_json<T: DeserializeOwned>(
  response: reqwest::Response
) -> Result<T, Error>
{   let status = response.status();
    trace!("Response status: {}", status);

    if !status.is_success()
    {   let body = response.text().await
          .unwrap_or_else(|_| "Unknown error".to_string());
        error!("Server returned {}: {}", status, body);
        return Err(Error::HttpStatus
        {   status: status.as_u16()
          , body
        });
    }

    let body = response.text().await.map_err(|e| {
      error!("Failed to read response body: {}", e);
      Error::HttpError(e.to_string())
    })?;
    trace!("Response body: {}", body);

    serde_json::from_str(&body).map_err(|e| {
      error!("Parse error: {}", e);
      Error::ParseError(e.to_string())
    })
}

/// Map a reqwest failure onto the probe's error classes
pub fn classify_transport(err: reqwest::Error, base_url: &str) -> Error
{   if is_connection_refused(&err)
    {   error!("Connection refused at {}: {}", base_url, err);
        return Error::ConnectionRefused
        {   url: base_url.to_string()
          , detail: err.to_string()
        };
    }
    if err.is_timeout()
    {   error!("Request to {} timed out", base_url);
        return Error::Timeout(base_url.to_string());
    }
    error!("HTTP error: {}", err);
    Error::HttpError(err.to_string())
}

/// Walks the source chain looking for an ECONNREFUSED io error
fn is_connection_refused(err: &reqwest::Error) -> bool
{   let mut source: Option<&(dyn std::error::Error + 'static)>
      = Some(err as &(dyn std::error::Error + 'static));
    while let Some(cause) = source
    {   if let Some(io) = cause.downcast_ref::<std::io::Error>()
        {   if io.kind() == std::io::ErrorKind::ConnectionRefused
            {   return true;
            }
        }
        source = cause.source();
    }
    false
}
