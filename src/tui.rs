use color_eyre::Result;
use crossterm::{cursor, execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;

pub type DefaultTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Enter raw mode and the alternate screen. A panic hook is installed first
/// so a crash inside the draw loop leaves the shell usable and lets the
/// color-eyre report print on a sane screen.
pub fn setup_terminal() -> Result<DefaultTerminal> {
    install_panic_restore();
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

pub fn restore_terminal(mut terminal: DefaultTerminal) -> Result<()> {
    terminal.show_cursor()?;
    execute!(
        terminal.backend_mut(),
        terminal::LeaveAlternateScreen,
        cursor::Show
    )?;
    terminal::disable_raw_mode()?;
    Ok(())
}

fn install_panic_restore() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show);
        hook(info);
    }));
}
