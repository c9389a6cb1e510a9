pub mod app;
pub mod event;
pub mod layout;
pub mod rows;
pub mod screen;
pub mod thumbnail;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use crate::app::{AppContext, Result};
use crate::viewer::BrowserViewer;

use self::app::TuiApp;
use self::event::EventHandler;
use self::screen::HeadlinesScreen;

type Tui = Terminal<CrosstermBackend<Stdout>>;

const TICK_RATE: Duration = Duration::from_millis(100);

pub async fn run(ctx: AppContext) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: &AppContext) -> Result<()> {
    let mut events = EventHandler::new(TICK_RATE);

    let screen = HeadlinesScreen::new(
        ctx.headline_fetcher.clone(),
        ctx.request.clone(),
        events.sender(),
    );
    let mut tui_app = TuiApp::new(screen, ctx.image_loader(events.sender()));
    let viewer = BrowserViewer;
    let keybindings = &ctx.config.keybindings;

    loop {
        let size = terminal.size()?;
        let viewport = layout::list_viewport(Rect::new(0, 0, size.width, size.height));
        tui_app.sync_viewport(viewport.height);

        terminal.draw(|frame| layout::render(frame, &tui_app, &ctx.config))?;

        let Some(event) = events.next().await else {
            break;
        };
        tui_app.handle_event(event, keybindings, &viewer);

        // Apply whatever else piled up before drawing again.
        while let Some(event) = events.try_next() {
            tui_app.handle_event(event, keybindings, &viewer);
        }

        if tui_app.should_quit {
            break;
        }
    }

    tracing::info!("Leaving TUI");
    Ok(())
}
