// Letter composition, generation and history.
// All LLM calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod header;
pub mod phone;
pub mod prompts;
pub mod store;
