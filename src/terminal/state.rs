use crate::domain::email::{Draft, EmailId, Mailbox};
use crate::store::repo::StoreError;
use crate::store::worker::{Completion, Generation, Job, Outcome, Ticket};
use crate::terminal::banner::Banner;
use crate::terminal::compose::ComposeForm;
use crate::terminal::detail::DetailPane;
use crate::terminal::list::ListPane;

/// The one visible pane. Each variant owns its pane, so leaving a view
/// drops everything it rendered.
#[derive(Debug)]
pub enum View {
    List(ListPane),
    Compose(ComposeForm),
    Detail(DetailPane),
}

/// Owns the current view and drives transitions between views.
///
/// Transitions never touch the network. They queue [`Ticket`]s for the event
/// loop to hand to the worker; results come back through [`ViewController::apply`].
/// Every transition bumps the generation, and list/detail results issued under
/// an older generation are dropped instead of being written into a pane that is
/// no longer on screen.
pub struct ViewController {
    pub view: View,
    pub banner: Banner,
    generation: Generation,
    outbox: Vec<Ticket>,
}

impl ViewController {
    /// Starts in the given mailbox's list view.
    pub fn new(mailbox: Mailbox) -> Self {
        let mut s = Self {
            view: View::List(ListPane::new(mailbox)),
            banner: Banner::default(),
            generation: 0,
            outbox: vec![],
        };
        s.open_mailbox(mailbox);
        s
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Jobs queued since the last call.
    pub fn take_tickets(&mut self) -> Vec<Ticket> {
        std::mem::take(&mut self.outbox)
    }

    fn enqueue(&mut self, job: Job) {
        self.outbox.push(Ticket {
            generation: self.generation,
            job,
        });
    }

    fn advance(&mut self, view: View) {
        self.generation += 1;
        self.view = view;
    }

    pub fn open_mailbox(&mut self, mailbox: Mailbox) {
        log::debug!("open mailbox {mailbox}");
        self.advance(View::List(ListPane::new(mailbox)));
        self.enqueue(Job::ListMailbox(mailbox));
    }

    pub fn open_compose(&mut self, draft: Draft) {
        log::debug!("open compose");
        self.advance(View::Compose(ComposeForm::new(draft)));
    }

    /// Only valid from a list view; ignored elsewhere.
    pub fn open_detail(&mut self, id: EmailId, mailbox: Mailbox) {
        if !matches!(self.view, View::List(_)) {
            log::debug!("ignoring open of email {id}: not in a list view");
            return;
        }
        log::debug!("open email {id} from {mailbox}");
        self.advance(View::Detail(DetailPane::new(id, mailbox)));
        self.enqueue(Job::GetEmail(id));
    }

    pub fn open_selected(&mut self) {
        let View::List(pane) = &self.view else {
            return;
        };
        let mailbox = pane.mailbox;
        if let Some(id) = pane.current_selected_id() {
            self.open_detail(id, mailbox);
        }
    }

    /// Reply action of the detail view.
    pub fn reply(&mut self) {
        let View::Detail(pane) = &self.view else {
            return;
        };
        if let Some(draft) = pane.reply() {
            self.open_compose(draft);
        }
    }

    /// Archive/unarchive action of the detail view. The flag update is not
    /// awaited before navigating.
    pub fn toggle_archive(&mut self) {
        let View::Detail(pane) = &self.view else {
            return;
        };
        let Some(control) = pane.archive_control() else {
            return;
        };
        let id = pane.id;
        self.enqueue(Job::SetArchived {
            id,
            archived: control.next,
        });
        self.open_mailbox(control.destination);
    }

    /// Leave the detail view for the mailbox it was opened from.
    pub fn back(&mut self) {
        match &self.view {
            View::Detail(pane) => {
                let mailbox = pane.mailbox;
                self.open_mailbox(mailbox);
            }
            View::Compose(_) => self.open_mailbox(Mailbox::Inbox),
            View::List(_) => {}
        }
    }

    pub fn submit_compose(&mut self) {
        let View::Compose(form) = &mut self.view else {
            return;
        };
        let Some(draft) = form.begin_submit() else {
            log::debug!("send already in flight; ignoring submit");
            return;
        };
        self.enqueue(Job::Send(draft));
    }

    pub fn apply(&mut self, completion: Completion) {
        let current = completion.generation == self.generation;

        match completion.outcome {
            Outcome::Listed { mailbox, result } => {
                let View::List(pane) = &mut self.view else {
                    log::debug!("dropping stale listing of {mailbox}");
                    return;
                };
                if !current || pane.mailbox != mailbox {
                    log::debug!("dropping stale listing of {mailbox}");
                    return;
                }
                match result {
                    Ok(items) => pane.fill(items),
                    Err(e) => {
                        log::warn!("listing {mailbox} failed: {e}");
                        pane.fail();
                    }
                }
            }

            Outcome::Fetched { id, result } => {
                let email = match result {
                    Ok(email) => email,
                    Err(e) => {
                        log::warn!("loading email {id} failed: {e}");
                        if let View::Detail(pane) = &mut self.view {
                            if current && pane.id == id {
                                pane.fail();
                            }
                        }
                        return;
                    }
                };
                // the email was opened, so it is marked read even if the user moved on
                self.outbox.push(Ticket {
                    generation: completion.generation,
                    job: Job::MarkRead(id),
                });

                match &mut self.view {
                    View::Detail(pane) if current && pane.id == id => pane.show(email),
                    _ => log::debug!("dropping stale detail of email {id}"),
                }
            }

            Outcome::MarkedRead { id, result } => {
                if let Err(e) = result {
                    log::warn!("marking email {id} read failed: {e}");
                }
            }

            Outcome::Archived {
                id,
                archived,
                result,
            } => {
                if let Err(e) = result {
                    log::warn!("setting archived={archived} on email {id} failed: {e}");
                }
            }

            Outcome::Sent(result) => {
                let still_composing = match &mut self.view {
                    View::Compose(form) if current => {
                        form.finish_submit();
                        true
                    }
                    _ => false,
                };
                match result {
                    Ok(message) => {
                        log::info!("email sent: {message}");
                        self.banner.success(message);
                        if still_composing {
                            self.open_mailbox(Mailbox::Sent);
                        }
                    }
                    Err(e) => {
                        log::info!("send rejected: {e}");
                        self.banner.error(send_error_text(&e));
                    }
                }
            }
        }
    }
}

fn send_error_text(e: &StoreError) -> String {
    match e {
        StoreError::Rejected { error, .. } => error.clone(),
        other => other.to_string(),
    }
}
