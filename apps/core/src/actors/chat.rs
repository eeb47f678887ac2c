use crate::actors::messages::{AppError, ChatMessage};
use crate::brain::{ChatEngine, EntityTag, Intent, Reply};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout, Duration};
use tracing::{info, instrument, warn};

/// Time allowed for any single request to be answered
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

const CHANNEL_CAPACITY: usize = 32;

/// A handle to the chat service actor.
///
/// Cheap to clone; every clone talks to the same engine. Dropping the last
/// handle stops the actor.
#[derive(Clone)]
pub struct ChatServiceHandle {
    sender: mpsc::Sender<ChatMessage>,
    engine: Arc<ChatEngine>,
}

impl ChatServiceHandle {
    /// Spawns the actor on the current tokio runtime and returns a handle.
    pub fn new(engine: ChatEngine) -> Self {
        Self::from_shared(Arc::new(engine))
    }

    pub fn from_shared(engine: Arc<ChatEngine>) -> Self {
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        let runner = ChatServiceRunner {
            receiver,
            engine: Arc::clone(&engine),
        };
        tokio::spawn(async move { runner.run().await });
        Self { sender, engine }
    }

    /// The engine behind this service
    pub fn engine(&self) -> &Arc<ChatEngine> {
        &self.engine
    }

    async fn request<T>(
        &self,
        operation: &str,
        build: impl FnOnce(oneshot::Sender<T>) -> ChatMessage,
    ) -> Result<T, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(build(send))
            .await
            .map_err(|_| AppError::Service(format!("chat service is not running ({})", operation)))?;
        timeout(REQUEST_TIMEOUT, recv)
            .await?
            .map_err(|_| AppError::Service(format!("chat service dropped the {} request", operation)))
    }

    #[instrument(skip(self, text))]
    pub async fn classify(&self, text: impl Into<String>) -> Result<Reply, AppError> {
        let text = text.into();
        self.request("classify", |responder| ChatMessage::Classify { text, responder })
            .await?
    }

    pub async fn suggest(&self, partial: impl Into<String>) -> Result<Vec<String>, AppError> {
        let partial = partial.into();
        self.request("suggest", |responder| ChatMessage::Suggest { partial, responder })
            .await
    }

    pub async fn extract_entities(&self, text: impl Into<String>) -> Result<Vec<EntityTag>, AppError> {
        let text = text.into();
        self.request("extract_entities", |responder| ChatMessage::ExtractEntities { text, responder })
            .await
    }

    pub async fn add_pattern(
        &self,
        pattern: impl Into<String>,
        response: impl Into<String>,
    ) -> Result<(), AppError> {
        let (pattern, response) = (pattern.into(), response.into());
        self.request("add_pattern", |responder| ChatMessage::AddPattern {
            pattern,
            response,
            responder,
        })
        .await
    }

    pub async fn add_intent_response(
        &self,
        intent: Intent,
        response: impl Into<String>,
    ) -> Result<(), AppError> {
        let response = response.into();
        self.request("add_intent_response", |responder| ChatMessage::AddIntentResponse {
            intent,
            response,
            responder,
        })
        .await
    }

    /// Stop the actor. Later requests fail with `AppError::Service`.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.request("shutdown", |responder| ChatMessage::Shutdown { responder })
            .await
    }
}

// --- Actor Runner ---
struct ChatServiceRunner {
    receiver: mpsc::Receiver<ChatMessage>,
    engine: Arc<ChatEngine>,
}

impl ChatServiceRunner {
    async fn run(mut self) {
        info!("Chat service started");
        while let Some(msg) = self.receiver.recv().await {
            if !self.handle_message(msg) {
                break;
            }
        }
        info!("Chat service stopped");
    }

    /// Returns false once the loop should stop
    fn handle_message(&self, msg: ChatMessage) -> bool {
        match msg {
            ChatMessage::Classify { text, responder } => {
                let engine = Arc::clone(&self.engine);
                tokio::spawn(async move {
                    let reply = engine.classify(&text);
                    if responder.send(Ok(reply)).is_err() {
                        warn!("Classify caller went away before the reply was ready");
                    }
                });
            }
            ChatMessage::Suggest { partial, responder } => {
                respond(responder, self.engine.suggest(&partial), "suggest");
            }
            ChatMessage::ExtractEntities { text, responder } => {
                respond(responder, self.engine.extract_entities(&text), "extract_entities");
            }
            ChatMessage::AddPattern {
                pattern,
                response,
                responder,
            } => {
                self.engine.add_pattern(&pattern, &response);
                respond(responder, (), "add_pattern");
            }
            ChatMessage::AddIntentResponse {
                intent,
                response,
                responder,
            } => {
                self.engine.add_intent_response(intent, &response);
                respond(responder, (), "add_intent_response");
            }
            ChatMessage::Shutdown { responder } => {
                info!("Chat service shutting down...");
                respond(responder, (), "shutdown");
                return false;
            }
        }
        true
    }
}

fn respond<T>(responder: oneshot::Sender<T>, value: T, operation: &str) {
    if responder.send(value).is_err() {
        warn!("Responder for {} was dropped", operation);
    }
}
