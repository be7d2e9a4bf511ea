use crate::domain::email::{Draft, Email, EmailId, EmailSummary, Mailbox};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered {status}")]
    Status { status: u16 },

    /// Non-success answer that carried an `{error}` body.
    #[error("{error}")]
    Rejected { status: u16, error: String },

    #[error("unexpected response shape: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Remote collection of mailboxes. Nothing is cached: every call goes to the server.
pub trait MailboxStore: Send + Sync {
    /// Summaries in server order.
    fn list_mailbox(&self, mailbox: Mailbox) -> StoreResult<Vec<EmailSummary>>;
    fn get_email(&self, id: EmailId) -> StoreResult<Email>;

    fn mark_read(&self, id: EmailId) -> StoreResult<()>;
    fn set_archived(&self, id: EmailId, archived: bool) -> StoreResult<()>;

    /// Returns the server's confirmation message.
    fn send_email(&self, draft: &Draft) -> StoreResult<String>;
}
