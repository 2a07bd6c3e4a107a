//! Google Gemini API client.
//!
//! Implements `GenerativeClient` against the Generative Language API's
//! `generateContent` method.

mod api;
mod client;
mod config;

pub use client::GeminiClient;
pub use config::GeminiConfig;
