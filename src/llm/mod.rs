pub mod client;
pub mod prompts;
pub mod response;

pub use client::{generate_with_retry, AnthropicClient, AnthropicConfig, ModelClient, RetryConfig};
pub use prompts::{build_evaluation_prompt, build_summary_prompt, EVALUATOR_SYSTEM_PROMPT};
pub use response::{parse_evaluation, parse_summary, ParsedEvaluation, ParsedSummary};
