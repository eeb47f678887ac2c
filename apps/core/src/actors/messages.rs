use tokio::sync::oneshot;

use crate::brain::{EntityTag, Intent, Reply};

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Messages that can be sent to the chat service actor.
#[derive(Debug)]
pub enum ChatMessage {
    /// Answer one user message.
    Classify {
        text: String,
        /// A channel to send the reply back.
        responder: oneshot::Sender<Result<Reply, AppError>>,
    },
    /// Suggest prompts for a partially typed message.
    Suggest {
        partial: String,
        responder: oneshot::Sender<Vec<String>>,
    },
    /// Tag the entity kinds present in a message.
    ExtractEntities {
        text: String,
        responder: oneshot::Sender<Vec<EntityTag>>,
    },
    /// Append a response to a pattern.
    AddPattern {
        pattern: String,
        response: String,
        responder: oneshot::Sender<()>,
    },
    /// Append a response to an intent.
    AddIntentResponse {
        intent: Intent,
        response: String,
        responder: oneshot::Sender<()>,
    },
    /// Stop the actor loop. Queued messages behind it are dropped.
    Shutdown { responder: oneshot::Sender<()> },
}
