//! Chat session: the conversation plus the gate that serializes requests.
//!
//! A request is split into three steps so a UI can keep drawing while the
//! network call runs elsewhere:
//!
//! 1. `begin_*` validates the input, takes the gate and appends the entry
//!    that must be visible before the request goes out.
//! 2. `run` performs the call on any [`Transport`] and turns the outcome
//!    into the bot's reply text. Failures never escape this step.
//! 3. [`Session::finish`] appends the reply and only then releases the gate.
//!
//! [`Session::ask`] and [`Session::upload`] chain the three steps for
//! callers that can simply await.

use tracing::{debug, warn};

use crate::gate::{Gate, GatePermit};
use crate::message::{Conversation, Message};
use crate::transport::{Transport, UploadFile, UploadStatus};

/// Shown when an ask fails for any reason.
pub const ASK_FAILED: &str = "Kunde inte nå mentorn. Är servern igång?";

/// Shown when an upload fails or the service rejects it.
pub const UPLOAD_FAILED: &str = "Kunde inte ladda upp filen.";

/// Progress entry appended before an upload is sent.
pub fn upload_progress(name: &str) -> String {
    format!("Laddar upp: {name}...")
}

/// Confirmation appended after a successful upload.
pub fn upload_done(name: &str) -> String {
    format!("Analys klar! Jag har nu läst in \"{name}\".")
}

/// Why a submission was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejected {
    /// The trimmed text was empty.
    #[error("nothing to send")]
    Empty,
    /// Another request is still outstanding.
    #[error("a request is already in progress")]
    Busy,
}

/// One chat session.
#[derive(Debug, Default)]
pub struct Session {
    conversation: Conversation,
    gate: Gate,
}

impl Session {
    /// Create a session with an empty conversation and an idle gate.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Handle to this session's gate.
    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    /// Whether a request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    /// Start sending `raw` as a user message.
    ///
    /// On success the user's message is already in the conversation.
    pub fn begin_ask(&mut self, raw: &str) -> Result<PendingAsk, Rejected> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(Rejected::Empty);
        }
        let permit = self.gate.try_enter().ok_or(Rejected::Busy)?;

        self.conversation.push(Message::user(text));
        debug!(chars = text.chars().count(), "ask started");

        Ok(PendingAsk {
            message: text.to_string(),
            permit,
        })
    }

    /// Start uploading `file`.
    ///
    /// On success a progress entry naming the file is already in the
    /// conversation.
    pub fn begin_upload(&mut self, file: UploadFile) -> Result<PendingUpload, Rejected> {
        let permit = self.gate.try_enter().ok_or(Rejected::Busy)?;

        self.conversation
            .push(Message::bot(upload_progress(file.name())));
        debug!(name = file.name(), "upload started");

        Ok(PendingUpload { file, permit })
    }

    /// Append the reply from a finished request and release the gate.
    pub fn finish(&mut self, reply: Reply) {
        let Reply { text, permit } = reply;
        self.conversation.push(Message::bot(text));
        permit.release();
    }

    /// Send `raw` and wait for the reply.
    pub async fn ask<T: Transport>(&mut self, transport: &T, raw: &str) -> Result<(), Rejected> {
        let pending = self.begin_ask(raw)?;
        let reply = pending.run(transport).await;
        self.finish(reply);
        Ok(())
    }

    /// Upload `file` and wait for the outcome.
    pub async fn upload<T: Transport>(
        &mut self,
        transport: &T,
        file: UploadFile,
    ) -> Result<(), Rejected> {
        let pending = self.begin_upload(file)?;
        let reply = pending.run(transport).await;
        self.finish(reply);
        Ok(())
    }
}

/// An accepted ask that has not been sent yet.
#[derive(Debug)]
pub struct PendingAsk {
    message: String,
    permit: GatePermit,
}

impl PendingAsk {
    /// The trimmed text that will be sent.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Send the message and produce the bot's reply.
    pub async fn run<T: Transport>(self, transport: &T) -> Reply {
        let text = match transport.ask(&self.message).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "ask failed");
                ASK_FAILED.to_string()
            }
        };

        Reply {
            text,
            permit: self.permit,
        }
    }
}

/// An accepted upload that has not been sent yet.
#[derive(Debug)]
pub struct PendingUpload {
    file: UploadFile,
    permit: GatePermit,
}

impl PendingUpload {
    pub fn file(&self) -> &UploadFile {
        &self.file
    }

    /// Upload the file and produce the bot's reply.
    pub async fn run<T: Transport>(self, transport: &T) -> Reply {
        let text = match transport.upload(&self.file).await {
            Ok(UploadStatus::Success) => upload_done(self.file.name()),
            Ok(UploadStatus::Rejected(status)) => {
                warn!(name = self.file.name(), %status, "upload rejected");
                UPLOAD_FAILED.to_string()
            }
            Err(e) => {
                warn!(name = self.file.name(), error = %e, "upload failed");
                UPLOAD_FAILED.to_string()
            }
        };

        Reply {
            text,
            permit: self.permit,
        }
    }
}

/// Bot reply for a finished request. Holds the gate until applied.
#[derive(Debug)]
pub struct Reply {
    text: String,
    permit: GatePermit,
}

impl Reply {
    pub fn text(&self) -> &str {
        &self.text
    }
}
