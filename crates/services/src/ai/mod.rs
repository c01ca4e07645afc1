pub mod client;
pub mod extract;
pub mod prompts;
pub mod schema;

pub use client::{Attachment, GenAiClient, GenAiConfig, GenerateReply, GenerateRequest, WebCitation};
