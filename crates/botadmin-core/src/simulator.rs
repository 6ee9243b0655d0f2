//! Chat simulator for exercising the bot's reply pipeline by hand.
//!
//! The simulator owns an append-only transcript and a two-state machine
//! per turn cycle: `AwaitingInput` -> `AwaitingResponse` -> `AwaitingInput`.
//! Because only one response may be pending at a time, assistant turns can
//! never interleave or arrive out of order.
//!
//! A transport failure is converted into a synthesized assistant turn (the
//! "Error Handler" agent) rather than a dropped message -- the simulator
//! never leaves a user turn unanswered.

use std::future::Future;

use tracing::{debug, warn};

use botadmin_types::chat::{ChatReply, ConversationTurn, TurnMetadata};
use botadmin_types::error::{ApiError, SendError};

/// Fixed content of the synthesized turn appended when the backend is
/// unreachable.
pub const CONNECTION_ERROR_MESSAGE: &str = "\u{274c} **Error de conexi\u{f3}n**\n\n\
No pude conectarme con el servidor. Por favor verifica que el backend est\u{e9} funcionando.";

/// Marker content used when the backend answers with an empty body.
pub const EMPTY_RESPONSE_MESSAGE: &str = "Error: respuesta vac\u{ed}a";

/// Sends one simulator message to the bot pipeline.
///
/// `history` is the full transcript prior to the message being sent.
/// Implementations live in botadmin-infra.
pub trait ChatBackend: Send + Sync {
    fn send(
        &self,
        message: &str,
        history: &[ConversationTurn],
    ) -> impl Future<Output = Result<ChatReply, ApiError>> + Send;
}

/// Where the simulator is inside a turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatorState {
    AwaitingInput,
    AwaitingResponse,
}

/// How a completed turn cycle was answered.
#[derive(Debug)]
pub enum TurnOutcome {
    /// The backend answered; metadata was merged onto the assistant turn.
    Answered,
    /// The backend failed; a fallback turn was appended instead.
    Fallback(ApiError),
}

/// Append-only transcript of user/assistant turns.
pub struct ConversationSimulator<B: ChatBackend> {
    backend: B,
    turns: Vec<ConversationTurn>,
    state: SimulatorState,
}

impl<B: ChatBackend> ConversationSimulator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            turns: Vec::new(),
            state: SimulatorState::AwaitingInput,
        }
    }

    /// The transcript, in strict submission order.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn state(&self) -> SimulatorState {
        self.state
    }

    /// Send one user message through the pipeline.
    ///
    /// Empty/whitespace input and sends while a response is pending are
    /// rejected without touching the transcript. Otherwise the user turn
    /// is appended immediately (optimistic) and exactly one request is
    /// issued carrying the message plus the prior transcript; the
    /// assistant turn -- genuine or fallback -- is appended before the
    /// machine returns to `AwaitingInput`.
    pub async fn send_message(&mut self, text: &str) -> Result<TurnOutcome, SendError> {
        let message = text.trim();
        if message.is_empty() {
            return Err(SendError::EmptyMessage);
        }
        if self.state == SimulatorState::AwaitingResponse {
            return Err(SendError::ResponsePending);
        }

        self.turns.push(ConversationTurn::user(message.to_string()));
        self.state = SimulatorState::AwaitingResponse;

        // History excludes the user turn just appended; the message rides
        // in its own field.
        let history_end = self.turns.len() - 1;
        let result = self.backend.send(message, &self.turns[..history_end]).await;

        let outcome = match result {
            Ok(reply) => {
                debug!(agent = %reply.agent_used, intent = %reply.intent, "simulator reply");
                let content = if reply.response.trim().is_empty() {
                    EMPTY_RESPONSE_MESSAGE.to_string()
                } else {
                    reply.response.clone()
                };
                self.turns
                    .push(ConversationTurn::assistant(content, TurnMetadata::from_reply(&reply)));
                TurnOutcome::Answered
            }
            Err(e) => {
                warn!(error = %e, "simulator request failed, appending fallback turn");
                self.turns.push(ConversationTurn::assistant(
                    CONNECTION_ERROR_MESSAGE.to_string(),
                    TurnMetadata::error_handler(),
                ));
                TurnOutcome::Fallback(e)
            }
        };

        self.state = SimulatorState::AwaitingInput;
        Ok(outcome)
    }
}
