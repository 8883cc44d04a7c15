use std::fmt;

/// Error type for every step of a probe run
/// Implements Clone so tests can compare outcomes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// A required environment variable is missing or empty
    MissingConfig(String)
  , /// A configuration value could not be parsed
    InvalidConfiguration(String)
  , /// The target host rejected the TCP connection
    ConnectionRefused
    {   url: String
      , detail: String
    }
  , /// The server answered with a non-success status
    HttpStatus
    {   status: u16
      , body: String
    }
  , /// Any other transport failure (DNS, reset, TLS, ...)
    HttpError(String)
  , /// The request did not finish within the configured timeout
    Timeout(String)
  , /// Failed to parse a server response
    ParseError(String)
  , /// The server lists no models at all
    NoModelsAvailable
  , /// Generic error
    Other(String)
}

/// Failure classes, used only to pick troubleshooting text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory
{   ConnectionRefused
  , HttpResponse
  , Other
}

impl Error
{   pub fn category(&self) -> ErrorCategory
    {   match self
        {   Error::ConnectionRefused { .. } => {
              ErrorCategory::ConnectionRefused
            }
          , Error::HttpStatus { .. } => ErrorCategory::HttpResponse
          , _ => ErrorCategory::Other
        }
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::MissingConfig(var) => {
              write!(f, "Environment variable {} is not set", var)
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::ConnectionRefused { url, detail } => {
              write!(f, "Connection refused at {}: {}", url, detail)
            }
          , Error::HttpStatus { status, body } => {
              write!(f, "HTTP error {}: {}", status, body)
            }
          , Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::Timeout(url) => {
              write!(f, "Request to {} timed out", url)
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::NoModelsAvailable => {
              write!(f, "No models available on the server")
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Other(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}
