//! Interactive wizard: terminal setup, event loop, effect dispatch.

pub mod app;
pub mod steps;
pub mod ui;
pub mod worker;

pub use app::{App, InputResult};
pub use worker::Completion;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use installer_core::{Effect, Wizard};
use installer_hal::{ExitAction, InstallerHal};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::time::Duration;

/// Run the wizard until the user leaves. A confirmed quit/reboot is carried
/// out after the terminal is restored.
pub fn run(wizard: Wizard, hal: Arc<dyn InstallerHal>) -> Result<()> {
    use std::io::IsTerminal;

    if !io::stdout().is_terminal() {
        anyhow::bail!(
            "No TTY detected. The installer wizard requires an interactive terminal.\n\
             Use `os-installer dump` for non-interactive output."
        );
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(wizard);
    let outcome = run_loop(&mut terminal, &mut app, &hal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(action) = outcome? {
        log::info!("Performing {}", action);
        hal.exit(action)
            .with_context(|| format!("failed to {}", action))?;
    }
    Ok(())
}

/// Text rendering of every visible step.
pub fn dump_all_steps(wizard: Wizard) -> String {
    ui::dump_all(&App::new(wizard))
}

enum Flow {
    Continue,
    Exit(Option<ExitAction>),
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    hal: &Arc<dyn InstallerHal>,
) -> Result<Option<ExitAction>> {
    let (tx, rx) = mpsc::channel();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                let result = app.handle_input(key);
                if let Flow::Exit(action) = dispatch(result, hal, &tx) {
                    return Ok(action);
                }
            }
        }

        while let Ok(completion) = rx.try_recv() {
            let result = app.on_completion(completion);
            if let Flow::Exit(action) = dispatch(result, hal, &tx) {
                return Ok(action);
            }
        }
    }
}

fn dispatch(result: InputResult, hal: &Arc<dyn InstallerHal>, tx: &Sender<Completion>) -> Flow {
    match result {
        InputResult::Continue => Flow::Continue,
        InputResult::Leave => Flow::Exit(None),
        InputResult::Run(Effect::Exit(action)) => Flow::Exit(Some(action)),
        InputResult::Run(Effect::BeginInstallation) => {
            log::info!("Installation confirmed, showing progress");
            Flow::Continue
        }
        InputResult::Run(effect) => {
            worker::spawn_storage_effect(Arc::clone(hal), effect, tx.clone());
            Flow::Continue
        }
    }
}
