//! The three-step connectivity probe: list, resolve, generate

use std::io::Write;
use log::{debug, warn};

use crate::config::ProbeConfig;
use crate::error::Error;
use crate::providers::OllamaClient;
use crate::report::Reporter;
use crate::request::ModelDescriptor;

/// Static system instruction embedded in the test prompt
pub const SYSTEM_INSTRUCTION: &str
  = "You are a helpful assistant. Keep your answers short.";

/// Static user instruction embedded in the test prompt
pub const USER_INSTRUCTION: &str
  = "Reply with a one-sentence greeting to confirm you are working.";

/// Single-turn prompt sent to the generate endpoint
pub fn test_prompt() -> String
{   format!(
      "System: {}\n\nUser: {}\n\nAssistant:",
      SYSTEM_INSTRUCTION, USER_INSTRUCTION
    )
}

/// Pipeline position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage
{   ListingModels
  , ResolvingModel
  , GeneratingCompletion
  , Done
  , Failed
}

/// Outcome of model resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelChoice
{   /// The requested model is installed
    Requested(String)
  , /// The requested model is missing; the first listed one is used
    Fallback
    {   requested: String
      , substitute: String
    }
}

impl ModelChoice
{   /// Model name actually sent to the generate endpoint
    pub fn effective(&self) -> &str
    {   match self
        {   ModelChoice::Requested(name) => name
          , ModelChoice::Fallback { substitute, .. } => substitute
        }
    }

    pub fn is_fallback(&self) -> bool
    {   matches!(self, ModelChoice::Fallback { .. })
    }
}

/// Exact, case-sensitive search; first entry wins on a miss
pub fn resolve_model(
  models: &[ModelDescriptor]
, requested: &str
) -> Result<ModelChoice, Error>
{   if models.iter().any(|m| m.name == requested)
    {   debug!("Requested model {} is available", requested);
        return Ok(ModelChoice::Requested(requested.to_string()));
    }

    match models.first()
    {   Some(first) => {
          warn!(
            "Model {} not found, falling back to {}",
            requested, first.name
          );
          Ok(ModelChoice::Fallback
          {   requested: requested.to_string()
            , substitute: first.name.clone()
          })
        }
      , None => Err(Error::NoModelsAvailable)
    }
}

/// Everything a successful run produced
#[derive(Debug, Clone)]
pub struct ProbeSummary
{   pub models: Vec<ModelDescriptor>
  , pub choice: ModelChoice
  , pub completion: String
}

/// Drives one probe run against a single endpoint
pub struct Prober
{   client: OllamaClient
  , requested_model: String
  , stage: Stage
}

impl Prober
{   pub fn new(config: &ProbeConfig) -> Result<Self, Error>
    {   let client = OllamaClient::new(&config.api_url, config.timeout)?;
        Ok(Prober::with_client(client, &config.model))
    }

    pub fn with_client(client: OllamaClient, requested_model: &str) -> Self
    {   Prober
        {   client
          , requested_model: requested_model.to_string()
          , stage: Stage::ListingModels
        }
    }

    pub fn stage(&self) -> Stage
    {   self.stage
    }

    fn advance(&mut self, next: Stage)
    {   debug!("Probe stage {:?} -> {:?}", self.stage, next);
        self.stage = next;
    }

    /// Runs all three steps, stopping at the first error
    pub async fn run<W: Write>(
      &mut self
    , reporter: &mut Reporter<W>
    ) -> Result<ProbeSummary, Error>
    {   let result = self.run_steps(reporter).await;
        match &result
        {   Ok(_) => self.advance(Stage::Done)
          , Err(e) => {
              debug!("Probe failed during {:?}: {}", self.stage, e);
              self.advance(Stage::Failed);
            }
        }
        result
    }

    async fn run_steps<W: Write>(
      &mut self
    , reporter: &mut Reporter<W>
    ) -> Result<ProbeSummary, Error>
    {   reporter.connecting(self.client.base_url());
        let models = self.client.list_models().await?;
        reporter.models_listed(&models);

        self.advance(Stage::ResolvingModel);
        let choice = resolve_model(&models, &self.requested_model)?;
        match &choice
        {   ModelChoice::Requested(name) => reporter.model_found(name)
          , ModelChoice::Fallback { requested, substitute } => {
              reporter.model_substituted(requested, substitute)
            }
        }

        self.advance(Stage::GeneratingCompletion);
        let model = choice.effective().to_string();
        reporter.generating(&model);
        let completion = self.client.generate(&model, &test_prompt()).await?;
        reporter.completion(&completion);

        Ok(ProbeSummary
        {   models
          , choice
          , completion
        })
    }
}
