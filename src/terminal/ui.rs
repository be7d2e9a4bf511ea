use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, Paragraph, Tabs, Wrap},
};

use crate::domain::email::Mailbox;
use crate::terminal::banner::Notice;
use crate::terminal::compose::{ComposeField, ComposeForm};
use crate::terminal::detail::DetailPane;
use crate::terminal::list::ListPane;
use crate::terminal::state::{View, ViewController};

/// Server text made safe to print: escape sequences and control characters
/// other than newline and tab are dropped, so a message cannot drive the terminal.
pub fn literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\n' | '\t' => out.push(ch),
            '\u{1b}' => {
                // CSI: ESC [ params final-byte
                if chars.peek() == Some(&'[') {
                    chars.next();
                    for c in chars.by_ref() {
                        if ('\u{40}'..='\u{7e}').contains(&c) {
                            break;
                        }
                    }
                }
            }
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

pub fn render(f: &mut Frame, state: &mut ViewController, account: Option<&str>) {
    let [nav, banner, main, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(f.area());

    render_nav(f, nav, &state.view, account);

    if let Some(notice) = state.banner.current() {
        let line = match notice {
            Notice::Success(m) => Span::styled(literal(m), Style::default().fg(Color::Green)),
            Notice::Error(m) => Span::styled(literal(m), Style::default().fg(Color::Red)),
        };
        f.render_widget(Paragraph::new(Line::from(line)), banner);
    }

    let hint = match &mut state.view {
        View::List(pane) => {
            render_list(f, main, pane);
            "j/k move  Enter open  1/2/3 mailbox  c compose  q quit"
        }
        View::Detail(pane) => {
            render_detail(f, main, pane);
            "r reply  a archive  j/k scroll  Esc back  q quit"
        }
        View::Compose(form) => {
            render_compose(f, main, form);
            "Tab next field  Ctrl+S send  Esc discard"
        }
    };

    f.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray))),
        footer,
    );
}

fn render_nav(f: &mut Frame, area: Rect, view: &View, account: Option<&str>) {
    let selected = match view {
        View::List(p) => Mailbox::ALL.iter().position(|m| *m == p.mailbox),
        View::Detail(p) => Mailbox::ALL.iter().position(|m| *m == p.mailbox),
        View::Compose(_) => None,
    };
    let mut titles: Vec<Line> = Mailbox::ALL
        .iter()
        .enumerate()
        .map(|(i, m)| Line::from(format!("{} {}", i + 1, m.title())))
        .collect();
    titles.push(Line::from("c Compose"));

    let tabs = Tabs::new(titles)
        .select(selected.unwrap_or(Mailbox::ALL.len()))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(40)]).areas(area);
    f.render_widget(tabs, left);
    if let Some(account) = account {
        f.render_widget(
            Paragraph::new(literal(account))
                .alignment(Alignment::Right)
                .style(Style::default().fg(Color::Gray)),
            right,
        );
    }
}

fn render_list(f: &mut Frame, area: Rect, pane: &mut ListPane) {
    let block = Block::default()
        .title(format!(" {} ", pane.mailbox.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    if pane.items.is_empty() {
        let msg = if pane.loading { "Loading…" } else { "No emails." };
        f.render_widget(Paragraph::new(msg).block(block), area);
        return;
    }

    let list = List::new(pane.entries())
        .block(block)
        .highlight_symbol("➜ ")
        .highlight_style(Style::default().bg(Color::DarkGray));

    f.render_stateful_widget(list, area, &mut pane.list_state);
}

fn render_detail(f: &mut Frame, area: Rect, pane: &DetailPane) {
    let mut title = String::from(" Email ");
    if let Some(control) = pane.archive_control() {
        title.push_str(&format!("[a: {}] ", control.label));
    }
    if pane.email.is_some() {
        title.push_str("[r: Reply] ");
    }

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let p = Paragraph::new(pane.text())
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((pane.scroll, 0));
    f.render_widget(p, area);
}

fn render_compose(f: &mut Frame, area: Rect, form: &ComposeForm) {
    let [to, subject, body] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(3),
    ])
    .areas(area);

    for (field, area) in ComposeField::ALL.into_iter().zip([to, subject, body]) {
        let focused = form.focus == field;
        let mut title = format!(" {} ", field.label());
        if field == ComposeField::Body && form.sending {
            title.push_str("(sending…) ");
        }
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused {
                Color::Yellow
            } else {
                Color::DarkGray
            }));

        let mut text = literal(form.value(field));
        if focused {
            text.push('▏');
        }
        f.render_widget(
            Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_keeps_plain_text() {
        assert_eq!(literal("hello\n\tworld <b>hi</b>"), "hello\n\tworld <b>hi</b>");
    }

    #[test]
    fn literal_strips_escape_sequences() {
        assert_eq!(literal("a\u{1b}[2Jb\u{1b}[31mc"), "abc");
        assert_eq!(literal("x\r\ny\u{7}\u{9b}"), "x\ny");
    }
}
