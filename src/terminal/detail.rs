use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

use crate::domain::email::{Draft, Email, EmailId, Mailbox};
use crate::domain::reply::reply_draft;
use crate::terminal::ui::literal;

/// Archive button as shown for the open email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveControl {
    pub label: &'static str,
    /// Flag value the button will write.
    pub next: bool,
    /// Mailbox shown after pressing it.
    pub destination: Mailbox,
}

#[derive(Debug)]
pub struct DetailPane {
    pub id: EmailId,
    /// Mailbox the email was opened from.
    pub mailbox: Mailbox,
    /// `None` until the fetch resolves; stays `None` if it fails.
    pub email: Option<Email>,
    pub loading: bool,
    pub scroll: u16,
}

impl DetailPane {
    pub fn new(id: EmailId, mailbox: Mailbox) -> Self {
        Self {
            id,
            mailbox,
            email: None,
            loading: true,
            scroll: 0,
        }
    }

    pub fn show(&mut self, email: Email) {
        self.email = Some(email);
        self.loading = false;
    }

    /// Leaves the pane blank.
    pub fn fail(&mut self) {
        self.loading = false;
    }

    /// Hidden for sent mail. Archiving lands in the archive listing,
    /// unarchiving in the inbox.
    pub fn archive_control(&self) -> Option<ArchiveControl> {
        if self.mailbox == Mailbox::Sent {
            return None;
        }
        let email = self.email.as_ref()?;
        Some(if email.archived {
            ArchiveControl {
                label: "Unarchive",
                next: false,
                destination: Mailbox::Inbox,
            }
        } else {
            ArchiveControl {
                label: "Archive",
                next: true,
                destination: Mailbox::Archive,
            }
        })
    }

    pub fn reply(&self) -> Option<Draft> {
        self.email.as_ref().map(reply_draft)
    }

    pub fn scroll_body(&mut self, delta: i32) {
        if delta < 0 {
            self.scroll = self.scroll.saturating_sub((-delta) as u16);
        } else {
            self.scroll = self.scroll.saturating_add(delta as u16);
        }
    }

    pub fn text(&self) -> Text<'static> {
        let Some(e) = &self.email else {
            return if self.loading {
                Text::from("Loading…")
            } else {
                Text::default()
            };
        };

        let label = Style::default().add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::from(vec![Span::styled("From: ", label), Span::raw(literal(&e.sender))]),
            Line::from(vec![
                Span::styled("To: ", label),
                Span::raw(literal(&e.recipients_line())),
            ]),
            Line::from(vec![Span::styled("Subject: ", label), Span::raw(literal(&e.subject))]),
            Line::from(vec![
                Span::styled("Timestamp: ", label),
                Span::styled(literal(&e.timestamp), Style::default().fg(Color::Gray)),
            ]),
            Line::default(),
        ];
        lines.extend(literal(&e.body).split('\n').map(|l| Line::raw(l.to_string())));
        Text::from(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pane(mailbox: Mailbox, archived: bool) -> DetailPane {
        let mut p = DetailPane::new(2, mailbox);
        p.show(Email {
            id: 2,
            sender: "a@x".into(),
            recipients: vec!["me@x".into()],
            subject: "Hi".into(),
            body: "hello\nworld".into(),
            timestamp: "T1".into(),
            read: false,
            archived,
        });
        p
    }

    #[test]
    fn archive_hidden_for_sent() {
        assert_eq!(pane(Mailbox::Sent, false).archive_control(), None);
        assert_eq!(pane(Mailbox::Sent, true).archive_control(), None);
    }

    #[test]
    fn archive_control_flips_flag() {
        let c = pane(Mailbox::Inbox, false).archive_control().unwrap();
        assert_eq!(c.label, "Archive");
        assert!(c.next);
        assert_eq!(c.destination, Mailbox::Archive);

        let c = pane(Mailbox::Archive, true).archive_control().unwrap();
        assert_eq!(c.label, "Unarchive");
        assert!(!c.next);
        assert_eq!(c.destination, Mailbox::Inbox);
    }

    #[test]
    fn nothing_to_act_on_before_fetch() {
        let p = DetailPane::new(2, Mailbox::Inbox);
        assert_eq!(p.archive_control(), None);
        assert_eq!(p.reply(), None);
    }

    #[test]
    fn text_has_headers_and_body_lines() {
        let t = pane(Mailbox::Inbox, false).text();
        assert_eq!(t.lines.len(), 7);
        assert_eq!(t.lines[5].to_string(), "hello");
    }

    #[test]
    fn body_keeps_trailing_blank_line() {
        let mut p = pane(Mailbox::Inbox, false);
        if let Some(e) = p.email.as_mut() {
            e.body = "T1 a@x wrote:\nhello\n--------------------------------\n".into();
        }
        let t = p.text();
        assert_eq!(t.lines.len(), 9);
        assert_eq!(t.lines[7].to_string(), "--------------------------------");
        assert_eq!(t.lines[8].to_string(), "");
    }

    #[test]
    fn loading_then_blank_on_failure() {
        let mut p = DetailPane::new(2, Mailbox::Inbox);
        assert_eq!(p.text().to_string(), "Loading…");
        p.fail();
        assert_eq!(p.text().to_string(), "");
    }

    #[test]
    fn scroll_saturates() {
        let mut p = pane(Mailbox::Inbox, false);
        p.scroll_body(-3);
        assert_eq!(p.scroll, 0);
        p.scroll_body(4);
        assert_eq!(p.scroll, 4);
    }
}
