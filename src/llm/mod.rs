//! Text generation over an OpenAI-compatible HTTP endpoint.

pub mod client;

pub use client::{
    CallProfile, Credentials, GenerationClient, GenerationResult, TextGenerator, DEFAULT_MODEL,
};
