use serde::{Deserialize, Serialize};

/// Largest inbox the host grants; replies carry the bulk data.
pub const DEFAULT_INBOX_SIZE: usize = 8200;
/// Smallest outbox the host grants; requests are a handful of integers.
pub const DEFAULT_OUTBOX_SIZE: usize = 636;
/// Largest array transfer a consumer is asked to make room for.
pub const DEFAULT_MAX_ARRAY_COUNT: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommConfig {
    pub inbox_size: usize,
    pub outbox_size: usize,
    /// An ArrayStart announcing more items is rejected as out of range.
    pub max_array_count: usize,
    /// Shown for an Error message without usable text.
    pub unknown_error_text: String,
    /// Shown when a second request arrives while one is deferred.
    pub already_pending_text: String,
    /// Shown when a task transfer names a list other than the open one.
    pub list_mismatch_text: String,
    /// Shown when the deferred request fails to transmit at the handshake.
    pub send_failed_text: String,
    /// Prefix of the notice shown for a malformed inbound message.
    pub bad_message_prefix: String,
}

impl Default for CommConfig {
    fn default() -> Self {
        Self {
            inbox_size: DEFAULT_INBOX_SIZE,
            outbox_size: DEFAULT_OUTBOX_SIZE,
            max_array_count: DEFAULT_MAX_ARRAY_COUNT,
            unknown_error_text: "Unknown error".to_owned(),
            already_pending_text: "Internal error: already sending msg".to_owned(),
            list_mismatch_text: "Warning: list ID mismatch".to_owned(),
            send_failed_text: "Failed to send request".to_owned(),
            bad_message_prefix: "Bad message: ".to_owned(),
        }
    }
}

impl CommConfig {
    pub fn with_buffer_sizes(mut self, inbox_size: usize, outbox_size: usize) -> Self {
        self.inbox_size = inbox_size;
        self.outbox_size = outbox_size;
        self
    }

    pub fn with_max_array_count(mut self, max_array_count: usize) -> Self {
        self.max_array_count = max_array_count;
        self
    }

    pub fn with_unknown_error_text(mut self, text: impl Into<String>) -> Self {
        self.unknown_error_text = text.into();
        self
    }

    pub fn with_already_pending_text(mut self, text: impl Into<String>) -> Self {
        self.already_pending_text = text.into();
        self
    }
}
