//! Terminal front end: crossterm input, ratatui output.

use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::{Stream, StreamExt};
use log::{debug, info};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::time::Duration;
use crate::api::DashboardApi;
use crate::app::{App, Command};
use crate::router::Route;
use crate::views::{DashboardView, FormField};

mod render;
pub use render::ui;

/// How often the screen is redrawn without input, so toasts can expire.
const TICK: Duration = Duration::from_millis(250);

pub async fn run_tui<A: DashboardApi>(app: &mut App<A>) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, EventStream::new()).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B, A, S>(terminal: &mut Terminal<B>, app: &mut App<A>, mut events: S) -> io::Result<()>
where
    B: Backend,
    A: DashboardApi,
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    let mut pending = app.start();
    let mut tick = tokio::time::interval(TICK);
    info!("UI started on {}", app.route());

    loop {
        // Draw the busy/loading state before each request goes out.
        while let Some(command) = pending.take() {
            app.begin(command);
            terminal.draw(|f| ui(f, app))?;
            pending = app.run(command).await;
        }

        terminal.draw(|f| ui(f, app))?;

        tokio::select! {
            _ = tick.tick() => {}
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    pending = handle_key(app, key);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => {
                    info!("Input closed");
                    break;
                }
            },
        }

        if app.should_quit {
            info!("Quitting");
            break;
        }
    }
    Ok(())
}

/// Applies a key press to local view state. Returns the command to run when
/// the key asks for network work.
pub fn handle_key<A: DashboardApi>(app: &mut App<A>, key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return None;
    }

    match app.route() {
        Route::Dashboard => match app.dashboard.as_mut() {
            Some(view) => {
                let (command, quit) = dashboard_key(view, key);
                app.should_quit |= quit;
                command
            }
            None => None,
        },
        Route::Login | Route::Root => login_key(app, key),
    }
}

fn login_key<A: DashboardApi>(app: &mut App<A>, key: KeyEvent) -> Option<Command> {
    let view = &mut app.login;
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => view.next_field(),
        KeyCode::Enter if !view.is_submitting() => return Some(Command::SubmitLogin),
        KeyCode::Backspace => view.backspace(),
        KeyCode::Char(c) => view.input_char(c),
        _ => {}
    }
    None
}

/// Returns the command to run and whether the user asked to quit.
fn dashboard_key(view: &mut DashboardView, key: KeyEvent) -> (Option<Command>, bool) {
    if view.pending_delete.is_some() {
        let accepted = matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter);
        return (Some(Command::ConfirmDelete(accepted)), false);
    }

    if let Some(form) = view.modal.as_mut() {
        match key.code {
            KeyCode::Esc => view.close_modal(),
            KeyCode::Enter => return (Some(Command::SaveTrade), false),
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
                if matches!(form.focus, FormField::Type | FormField::Status) =>
            {
                form.cycle_choice()
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) => form.input_char(c),
            _ => {}
        }
        return (None, false);
    }

    if view.editing_search {
        match key.code {
            KeyCode::Esc => view.editing_search = false,
            KeyCode::Enter => {
                view.editing_search = false;
                return (Some(Command::FetchDashboard), false);
            }
            KeyCode::Backspace => {
                view.search.pop();
            }
            KeyCode::Char(c) => view.search.push(c),
            _ => {}
        }
        return (None, false);
    }

    let command = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return (None, true),
        KeyCode::Char('/') => {
            view.editing_search = true;
            None
        }
        KeyCode::Char('s') => {
            view.cycle_status_filter();
            None
        }
        KeyCode::Char('f') | KeyCode::Char('r') => Some(Command::FetchDashboard),
        KeyCode::Char('a') => {
            view.open_create();
            None
        }
        KeyCode::Char('e') => {
            view.open_edit();
            None
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            view.request_delete_selected();
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view.select_previous();
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view.select_next();
            None
        }
        KeyCode::Char('l') => Some(Command::Logout),
        _ => None,
    };
    if command.is_some() {
        debug!("Key {:?} -> {:?}", key.code, command);
    }
    (command, false)
}
