//! Intent classification backed by Claude tool use.
//!
//! The classifier receives the shopper's message together with the registered
//! operations as tools, and returns either one chosen tool with its JSON
//! arguments or plain text. It never executes anything itself.

mod client;
pub mod error;
pub mod types;

pub use client::ClaudeClient;
pub use error::ClassifierError;

use std::fmt::Write;

use async_trait::async_trait;
use tracing::instrument;

use crate::operations::OperationDescriptor;

use types::{ChatResponse, ContentBlock, Tool};

/// What the classifier decided for one message.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Run the named operation with these arguments.
    Invoke {
        /// Tool name as returned by the classifier.
        name: String,
        /// Raw JSON arguments.
        arguments: serde_json::Value,
        /// Any text the classifier returned alongside the tool call.
        text: Option<String>,
    },
    /// No operation chosen; optional free-text answer.
    Reply(Option<String>),
}

/// Maps a shopper message to at most one operation.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Classify `message` against the available operations.
    async fn classify(
        &self,
        message: &str,
        operations: &[OperationDescriptor],
    ) -> Result<Decision, ClassifierError>;
}

/// Claude-backed intent classifier.
#[derive(Clone)]
pub struct ClaudeIntentClassifier {
    client: ClaudeClient,
}

impl ClaudeIntentClassifier {
    /// Create a classifier using the given client.
    #[must_use]
    pub const fn new(client: ClaudeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IntentClassifier for ClaudeIntentClassifier {
    #[instrument(skip(self, message, operations), fields(message_len = message.len()))]
    async fn classify(
        &self,
        message: &str,
        operations: &[OperationDescriptor],
    ) -> Result<Decision, ClassifierError> {
        let tools = operations.iter().map(to_tool).collect();
        let response = self
            .client
            .choose_tool(message, build_system_prompt(operations), tools)
            .await?;

        tracing::debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = ?response.stop_reason,
            "Classifier responded"
        );

        Ok(interpret_response(response))
    }
}

/// Offer an operation to Claude as a tool.
fn to_tool(descriptor: &OperationDescriptor) -> Tool {
    Tool {
        name: descriptor.name.as_str().to_string(),
        description: descriptor.description.to_string(),
        input_schema: descriptor.parameter_schema.clone(),
    }
}

/// Build the system prompt for intent classification.
fn build_system_prompt(operations: &[OperationDescriptor]) -> String {
    let mut prompt = String::from(
        "You are a shopping assistant for an online store. \
         Decide whether the shopper's message needs one of these tools:\n",
    );

    for operation in operations {
        let _ = writeln!(prompt, "- {}: {}", operation.name, operation.description);
    }

    prompt.push_str(
        "\nRules:\n\
         1. Call at most one tool\n\
         2. Only pass sizes, colors, URLs and IDs the shopper actually mentioned\n\
         3. If no tool fits, answer briefly in the shopper's language",
    );

    prompt
}

/// Turn a response into a decision: the first tool use wins, otherwise the text.
fn interpret_response(response: ChatResponse) -> Decision {
    let mut tool_call = None;
    let mut texts = Vec::new();

    for block in response.content {
        match block {
            ContentBlock::ToolUse { name, input, .. } => {
                if tool_call.is_none() {
                    tool_call = Some((name, input));
                }
            }
            ContentBlock::Text { text } => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    texts.push(trimmed.to_string());
                }
            }
        }
    }

    let text = (!texts.is_empty()).then(|| texts.join("\n"));

    match tool_call {
        Some((name, arguments)) => Decision::Invoke {
            name,
            arguments,
            text,
        },
        None => Decision::Reply(text),
    }
}
