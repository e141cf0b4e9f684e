//! TUI runner: main loop that wires everything together.
//!
//! Creates terminal, starts the key reader, runs main TEA loop.

use std::io;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::interval;
use tracing::{info, warn};

use crate::config::StudioConfig;
use crate::shell::Shell;

use super::app::{PanelChannels, StudioApp, StudioServices};
use super::event::TuiMessage;
use super::layout;

const TICK: Duration = Duration::from_millis(100); // 10Hz
const RENDER: Duration = Duration::from_millis(33); // ~30fps
const POLL: Duration = Duration::from_millis(50);

/// Forward terminal key events into `tx` from a dedicated thread.
///
/// The thread exits once the receiver is dropped.
fn spawn_key_reader(tx: UnboundedSender<TuiMessage>) {
    thread::spawn(move || loop {
        if tx.is_closed() {
            break;
        }
        match event::poll(POLL) {
            Ok(false) => continue,
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => {
                    if tx.send(TuiMessage::Input(key)).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "terminal read failed");
                    let _ = tx.send(TuiMessage::Quit);
                    break;
                }
            },
            Err(e) => {
                warn!(error = %e, "terminal poll failed");
                let _ = tx.send(TuiMessage::Quit);
                break;
            }
        }
    });
}

/// Pull the next message from any source. `None` once every source is gone.
async fn next_message(
    input: &mut UnboundedReceiver<TuiMessage>,
    channels: &mut PanelChannels,
) -> Option<TuiMessage> {
    tokio::select! {
        Some(msg) = input.recv() => Some(msg),
        Some(event) = channels.image.recv() => Some(TuiMessage::Image(event)),
        Some(event) = channels.text.recv() => Some(TuiMessage::Text(event)),
        else => None,
    }
}

/// Run the TUI main loop. Blocks until quit.
pub async fn run_tui(config: &StudioConfig, shell: Shell) -> anyhow::Result<()> {
    let (mut app, mut channels) = StudioApp::new(shell, StudioServices::from_config(config))?;

    let mut terminal = setup_terminal()?;

    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    spawn_key_reader(input_tx);
    info!("studio ready");

    let mut tick_interval = interval(TICK);
    let mut render_interval = interval(RENDER);

    let result: anyhow::Result<()> = async {
        loop {
            tokio::select! {
                _ = tick_interval.tick() => {
                    app.update(TuiMessage::Tick);
                }
                _ = render_interval.tick() => {
                    terminal.draw(|f| layout::draw(f, &mut app))?;
                }
                msg = next_message(&mut input_rx, &mut channels) => match msg {
                    Some(msg) => app.update(msg),
                    None => app.should_quit = true,
                },
            }

            if app.should_quit {
                break;
            }
        }
        Ok(())
    }
    .await;

    // Restore terminal even when drawing failed.
    restore_terminal()?;
    terminal.show_cursor()?;
    info!("studio closed");
    result
}

type StudioTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Raw mode + alternate screen. Undone again if any later step fails.
fn setup_terminal() -> anyhow::Result<StudioTerminal> {
    enable_raw_mode()?;
    let terminal = undo_on_error(
        || {
            io::stdout().execute(EnterAlternateScreen)?;
            Terminal::new(CrosstermBackend::new(io::stdout()))
        },
        restore_terminal,
    )?;
    Ok(terminal)
}

/// Run `step`; on failure run `undo` before handing back the step's error.
fn undo_on_error<T>(
    step: impl FnOnce() -> io::Result<T>,
    undo: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    step().inspect_err(|_| {
        if let Err(e) = undo() {
            warn!(error = %e, "terminal restore failed");
        }
    })
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
