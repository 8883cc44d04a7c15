pub mod error;
pub mod config;
pub mod providers;
pub mod request;
pub mod probe;
pub mod report;

/*

deepseek-probe: a one-shot check that a local inference server
(Ollama API) is reachable, has the configured model, and can
answer a prompt.

  1. GET  {DEEPSEEK_API_URL}/api/tags       list installed models
  2. pick DEEPSEEK_MODEL, or the first listed model if it is missing
  3. POST {DEEPSEEK_API_URL}/api/generate   one non-streaming completion

Any failure stops the run, prints troubleshooting text for its
class and exits with status 1.

*/

use std::io::Write;
use log::{debug, info};

pub use config::ProbeConfig;
pub use error::{Error, ErrorCategory};
pub use probe::{ModelChoice, Prober, ProbeSummary, Stage};
pub use report::Reporter;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// Runs the probe and renders the outcome; returns the exit code
pub async fn run<W: Write>(
  config: &ProbeConfig
, reporter: &mut Reporter<W>
) -> u8
{   debug!("Starting probe of {}", config.api_url);
    let outcome = match Prober::new(config)
    {   Ok(mut prober) => prober.run(reporter).await
      , Err(e) => Err(e)
    };
    finish(outcome.map(|summary| {
      info!("Probe succeeded with model {}", summary.choice.effective());
    }), reporter)
}

/// Reports a terminal outcome and maps it to an exit code
pub fn finish<W: Write>(
  outcome: Result<(), Error>
, reporter: &mut Reporter<W>
) -> u8
{   match outcome
    {   Ok(()) => {
          reporter.success();
          EXIT_SUCCESS
        }
      , Err(e) => {
          reporter.failure(&e);
          EXIT_FAILURE
        }
    }
}
