pub mod banner;
pub mod compose;
pub mod detail;
pub mod events;
pub mod list;
pub mod state;
pub mod ui;

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;

use crate::domain::email::{EmailId, Mailbox};
use crate::store::repo::MailboxStore;
use crate::store::worker::{Completion, Worker};
use crate::terminal::state::ViewController;

const TICK: Duration = Duration::from_millis(100);

pub struct TuiOptions {
    pub mailbox: Mailbox,
    pub open: Option<EmailId>,
    pub account: Option<String>,
}

pub fn run_tui(store: Arc<dyn MailboxStore>, opts: TuiOptions) -> Result<()> {
    color_eyre::install().map_err(|e| anyhow!("{e}"))?;

    let (worker, completions) = Worker::new(store);
    let mut state = ViewController::new(opts.mailbox);
    if let Some(id) = opts.open {
        state.open_detail(id, opts.mailbox);
    }

    let terminal = ratatui::init();
    let result = run(terminal, &mut state, &worker, &completions, opts.account.as_deref());
    ratatui::restore();

    result
}

fn run(
    mut terminal: DefaultTerminal,
    state: &mut ViewController,
    worker: &Worker,
    completions: &Receiver<Completion>,
    account: Option<&str>,
) -> Result<()> {
    loop {
        for ticket in state.take_tickets() {
            worker.submit(ticket);
        }

        terminal.draw(|f| ui::render(f, state, account))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if events::handle_key(key, state) {
                    break;
                }
            }
        }

        while let Ok(done) = completions.try_recv() {
            state.apply(done);
        }
    }
    Ok(())
}
