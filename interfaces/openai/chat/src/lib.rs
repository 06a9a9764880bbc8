//! Minimal OpenAI chat-completion client.

pub mod index;
