use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

pub type EmailId = u32;

/// One of the three server-side collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mailbox {
    #[default]
    Inbox,
    Sent,
    Archive,
}

impl Mailbox {
    pub const ALL: [Mailbox; 3] = [Mailbox::Inbox, Mailbox::Sent, Mailbox::Archive];

    /// Path segment used by the REST service.
    pub fn as_str(self) -> &'static str {
        match self {
            Mailbox::Inbox => "inbox",
            Mailbox::Sent => "sent",
            Mailbox::Archive => "archive",
        }
    }

    /// Header text shown above the list.
    pub fn title(self) -> &'static str {
        match self {
            Mailbox::Inbox => "Inbox",
            Mailbox::Sent => "Sent",
            Mailbox::Archive => "Archive",
        }
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mailbox `{0}` (expected inbox, sent or archive)")]
pub struct ParseMailboxError(String);

impl FromStr for Mailbox {
    type Err = ParseMailboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inbox" => Ok(Mailbox::Inbox),
            "sent" => Ok(Mailbox::Sent),
            "archive" | "archived" => Ok(Mailbox::Archive),
            other => Err(ParseMailboxError(other.to_string())),
        }
    }
}

/// What a mailbox listing carries per message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmailSummary {
    pub id: EmailId,
    pub sender: String,
    #[serde(default)]
    pub subject: String,
    pub timestamp: String,
    #[serde(default)]
    pub read: bool,
}

/// Full message as returned by `GET /emails/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Email {
    pub id: EmailId,
    pub sender: String,
    #[serde(deserialize_with = "recipients_list")]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    pub timestamp: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub archived: bool,
}

impl Email {
    pub fn recipients_line(&self) -> String {
        self.recipients.join(", ")
    }
}

/// Accepts either `["a@x", "b@x"]` or `"a@x, b@x"`.
fn recipients_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        List(Vec<String>),
        Joined(String),
    }

    Ok(match Wire::deserialize(deserializer)? {
        Wire::List(v) => v,
        Wire::Joined(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

/// Contents of the compose form; also the body of `POST /emails`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Draft {
    pub recipients: String,
    pub subject: String,
    pub body: String,
}
