use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::domain::email::{Draft, Email, EmailId, EmailSummary, Mailbox};
use crate::store::repo::{MailboxStore, StoreResult};

/// Identifies the view transition that issued a job.
pub type Generation = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    ListMailbox(Mailbox),
    GetEmail(EmailId),
    MarkRead(EmailId),
    SetArchived { id: EmailId, archived: bool },
    Send(Draft),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub generation: Generation,
    pub job: Job,
}

#[derive(Debug)]
pub enum Outcome {
    Listed {
        mailbox: Mailbox,
        result: StoreResult<Vec<EmailSummary>>,
    },
    Fetched {
        id: EmailId,
        result: StoreResult<Email>,
    },
    MarkedRead {
        id: EmailId,
        result: StoreResult<()>,
    },
    Archived {
        id: EmailId,
        archived: bool,
        result: StoreResult<()>,
    },
    Sent(StoreResult<String>),
}

#[derive(Debug)]
pub struct Completion {
    pub generation: Generation,
    pub outcome: Outcome,
}

pub fn execute(store: &dyn MailboxStore, job: Job) -> Outcome {
    match job {
        Job::ListMailbox(mailbox) => Outcome::Listed {
            mailbox,
            result: store.list_mailbox(mailbox),
        },
        Job::GetEmail(id) => Outcome::Fetched {
            id,
            result: store.get_email(id),
        },
        Job::MarkRead(id) => Outcome::MarkedRead {
            id,
            result: store.mark_read(id),
        },
        Job::SetArchived { id, archived } => Outcome::Archived {
            id,
            archived,
            result: store.set_archived(id, archived),
        },
        Job::Send(draft) => Outcome::Sent(store.send_email(&draft)),
    }
}

/// Runs each ticket on its own thread so a slow request never blocks the UI
/// or other requests. Completions arrive on the receiver returned by `new`
/// in whatever order the server answers.
pub struct Worker {
    store: Arc<dyn MailboxStore>,
    tx: Sender<Completion>,
}

impl Worker {
    pub fn new(store: Arc<dyn MailboxStore>) -> (Self, Receiver<Completion>) {
        let (tx, rx) = mpsc::channel();
        (Self { store, tx }, rx)
    }

    pub fn submit(&self, ticket: Ticket) {
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        log::debug!("gen {}: submitting {:?}", ticket.generation, ticket.job);

        thread::spawn(move || {
            let outcome = execute(store.as_ref(), ticket.job);
            // receiver gone means the UI has exited
            let _ = tx.send(Completion {
                generation: ticket.generation,
                outcome,
            });
        });
    }
}
