//! Text-generation collaborator boundary.
//!
//! # Responsibility
//! - Define the prompt shape and the one `generate` operation.
//!
//! # Invariants
//! - The model is an untrusted text source; no formatting is assumed
//!   beyond "may contain a JSON array somewhere in the text".

use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Structured prompt input built from project attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSpec {
    pub project_name: String,
    pub project_description: String,
    pub project_type: String,
    pub team_size: String,
    pub duration: String,
    pub complexity: String,
}

impl PromptSpec {
    /// Renders the instruction text sent to the model.
    ///
    /// The wording pins the expected output contract: a JSON array of
    /// objects with `title`, `priority` and a relative `due_date`.
    pub fn render(&self) -> String {
        format!(
            "Generate a checklist for a project with the following details:\n\
             \n\
             - Project Name: {name}\n\
             - Project Description: {description}\n\
             - Project Type: {project_type}\n\
             - Team Size: {team_size}\n\
             - Duration: {duration}\n\
             - Complexity: {complexity}\n\
             \n\
             Generate a list of essential checklist items organized by priority \
             (low, medium, high) with appropriate due dates relative to the \
             project duration.\n\
             Format the response as a valid JSON array with objects having these \
             properties:\n\
             - title (string): Task title\n\
             - priority (string): \"low\", \"medium\", or \"high\"\n\
             - due_date (string): Relative time from project start (e.g., \"1 week\", \"2 months\")",
            name = self.project_name,
            description = self.project_description,
            project_type = self.project_type,
            team_size = self.team_size,
            duration = self.duration,
            complexity = self.complexity,
        )
    }
}

/// Failure at the generation collaborator boundary.
///
/// Kept distinct from parse errors: an unreachable model and an
/// unparseable response are different user-facing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Model endpoint unreachable or timed out.
    Unavailable(String),
    /// Request rejected for credential reasons.
    Unauthorized(String),
}

impl Display for GenerationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "generation model unavailable: {message}"),
            Self::Unauthorized(message) => {
                write!(f, "generation request unauthorized: {message}")
            }
        }
    }
}

impl Error for GenerationError {}

/// One-operation boundary to the external text-generation model.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Produces raw text for the rendered prompt. No streaming.
    async fn generate(&self, prompt: &PromptSpec) -> Result<String, GenerationError>;
}
