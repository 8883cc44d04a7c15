//! Inference server clients

pub mod ollama;

// Re-export for convenience
pub use ollama::OllamaClient;
