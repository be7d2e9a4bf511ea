use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{ListItem, ListState},
};

use crate::domain::email::{EmailId, EmailSummary, Mailbox};
use crate::terminal::ui::literal;

/// List pane for one mailbox. Dropped wholesale when the view changes, so
/// entries from an earlier listing can never survive a transition.
#[derive(Debug)]
pub struct ListPane {
    pub mailbox: Mailbox,
    pub items: Vec<EmailSummary>,
    pub list_state: ListState,
    pub loading: bool,
}

impl ListPane {
    pub fn new(mailbox: Mailbox) -> Self {
        Self {
            mailbox,
            items: vec![],
            list_state: ListState::default(),
            loading: true,
        }
    }

    /// Replace all entries, keeping server order.
    pub fn fill(&mut self, items: Vec<EmailSummary>) {
        self.items = items;
        self.loading = false;
        if self.items.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }

    pub fn fail(&mut self) {
        self.loading = false;
    }

    pub fn current_selected_id(&self) -> Option<EmailId> {
        let idx = self.list_state.selected()?;
        self.items.get(idx).map(|e| e.id)
    }

    pub fn move_selection(&mut self, delta: i32) {
        if self.items.is_empty() {
            self.list_state.select(None);
            return;
        }
        let cur = self.list_state.selected().unwrap_or(0) as i32;
        let len = self.items.len() as i32;
        let next = (cur + delta).clamp(0, len - 1) as usize;
        self.list_state.select(Some(next));
    }

    pub fn select_first(&mut self) {
        if !self.items.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if !self.items.is_empty() {
            self.list_state.select(Some(self.items.len() - 1));
        }
    }

    pub fn entries(&self) -> Vec<ListItem<'static>> {
        self.items.iter().map(entry).collect()
    }
}

/// One row: sender, subject, timestamp. Unread rows stand out, read rows are dimmed.
pub fn entry(e: &EmailSummary) -> ListItem<'static> {
    let base = if e.read {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let marker = if e.read { "  " } else { "● " };

    ListItem::new(Line::from(vec![
        Span::styled(marker, base.fg(Color::Cyan)),
        Span::styled(literal(&e.sender), base.add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(literal(&e.subject), base),
        Span::raw("  "),
        Span::styled(literal(&e.timestamp), Style::default().fg(Color::Gray)),
    ]))
    .style(if e.read {
        Style::default()
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    })
}
