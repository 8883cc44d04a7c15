//! Wire types for the inference server's HTTP API

use serde::{Deserialize, Serialize};

/// Body of `GET /api/tags`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagsResponse
{   #[serde(default)]
    pub models: Option<Vec<ModelDescriptor>>
}

impl TagsResponse
{   /// Models in server order; a missing field counts as empty
    pub fn into_models(self) -> Vec<ModelDescriptor>
    {   self.models.unwrap_or_default()
    }
}

/// One model reported by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor
{   pub name: String
  , /// Everything else the server sends (size, digest, details, ...)
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>
}

impl ModelDescriptor
{   pub fn named(name: &str) -> Self
    {   ModelDescriptor
        {   name: name.to_string()
          , metadata: serde_json::Map::new()
        }
    }
}

/// Body of `POST /api/generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest
{   pub model: String
  , pub prompt: String
  , pub stream: bool
}

impl GenerateRequest
{   /// Non-streaming request; `stream` is always false
    pub fn new(model: String, prompt: String) -> Self
    {   GenerateRequest
        {   model
          , prompt
          , stream: false
        }
    }
}

/// Response of `POST /api/generate` with streaming disabled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse
{   pub response: String
}
