//! Console rendering for a probe run

use std::io::Write;
use log::trace;

use crate::error::Error;
use crate::request::ModelDescriptor;

pub const OK: &str = "✅";
pub const WARN: &str = "⚠️ ";
pub const FAIL: &str = "❌";

/// Printed after every failure, whatever its class
pub const REMINDER: &str
  = "Make sure the inference server is running and the model is pulled \
     (e.g. `ollama pull <model>`).";

/// Writes human-readable status lines
/// Write errors are ignored
pub struct Reporter<W: Write>
{   out: W
}

impl<W: Write> Reporter<W>
{   pub fn new(out: W) -> Self
    {   Reporter { out }
    }

    pub fn into_inner(self) -> W
    {   self.out
    }

    fn line(&mut self, text: &str)
    {   trace!("report: {}", text);
        let _ = writeln!(self.out, "{}", text);
    }

    pub fn connecting(&mut self, url: &str)
    {   self.line(&format!("Testing connection to {}", url));
    }

    pub fn models_listed(&mut self, models: &[ModelDescriptor])
    {   self.line(&format!("{} Connected. Available models:", OK));
        if models.is_empty()
        {   self.line("   (none)");
        }
        for model in models
        {   self.line(&format!("   - {}", model.name));
        }
    }

    pub fn model_found(&mut self, name: &str)
    {   self.line(&format!("{} Model '{}' is available", OK, name));
    }

    pub fn model_substituted(&mut self, requested: &str, substitute: &str)
    {   self.line(&format!(
          "{} Model '{}' not found. Using '{}' instead.",
          WARN, requested, substitute
        ));
    }

    pub fn generating(&mut self, model: &str)
    {   self.line(&format!("Sending test prompt to '{}'...", model));
    }

    pub fn completion(&mut self, text: &str)
    {   self.line(&format!("{} Response received:", OK));
        self.line(text);
    }

    pub fn success(&mut self)
    {   self.line(&format!(
          "{} All checks passed. The inference server is ready.",
          OK
        ));
    }

    /// Troubleshooting text keyed on the failure class, then the reminder
    pub fn failure(&mut self, err: &Error)
    {   match err
        {   Error::ConnectionRefused { url, .. } => {
              self.line(&format!("{} Connection refused at {}", FAIL, url));
              self.line("Troubleshooting:");
              self.line("  1. Start the inference server (e.g. `ollama serve`).");
              self.line(&format!(
                "  2. Check that the UI/port is reachable: open {} in a browser.",
                url
              ));
              self.line(
                "  3. Try an explicit loopback address (127.0.0.1) instead of localhost."
              );
              self.line("  4. Check firewall rules for the server port.");
              self.line(
                "  5. Verify the port the server listens on (Ollama defaults to 11434)."
              );
            }
          , Error::HttpStatus { status, body } => {
              self.line(&format!("{} HTTP error response", FAIL));
              self.line(&format!("Status code: {}", status));
              self.line(&format!("Response body: {}", body));
            }
          , _ => {
              self.line(&format!("{} {}", FAIL, err));
            }
        }
        self.line("");
        self.line(REMINDER);
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    fn render(f: impl FnOnce(&mut Reporter<Vec<u8>>)) -> String
    {   let mut reporter = Reporter::new(Vec::new());
        f(&mut reporter);
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn lists_every_model()
    {   let text = render(|r| r.models_listed(&[
          ModelDescriptor::named("a")
        , ModelDescriptor::named("b")
        ]));
        assert!(text.contains("   - a\n"));
        assert!(text.contains("   - b\n"));
    }

    #[test]
    fn other_failures_print_raw_message()
    {   let text = render(|r| r.failure(&Error::NoModelsAvailable));
        assert!(text.contains("No models available"));
        assert!(text.contains(REMINDER));
        assert!(!text.contains("Troubleshooting"));
    }

    #[test]
    fn failure_sections_follow_variant()
    {   let text = render(|r| r.failure(&Error::HttpStatus
        {   status: 503
          , body: "loading".to_string()
        }));
        assert!(text.contains("Status code: 503"));
        assert!(text.contains("Response body: loading"));
        assert!(!text.contains("Troubleshooting"));

        let text = render(|r| r.failure(&Error::ConnectionRefused
        {   url: "http://127.0.0.1:9".to_string()
          , detail: "refused".to_string()
        }));
        assert!(text.contains("Connection refused at http://127.0.0.1:9"));
        assert!(text.contains("Troubleshooting:"));
        assert!(!text.contains("Status code"));
    }
}
