// Resume scoring pipeline: extract text, prompt the model, parse, tabulate.
// All model calls go through llm_client::ModelClient.

pub mod criteria;
pub mod handlers;
pub mod prompts;
pub mod report;
pub mod score;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;
