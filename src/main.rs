use anyhow::Result;
use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod api;
mod app;
mod config;
mod handler;
mod offline;
mod responder;
mod tui;
mod ui;

use app::App;
use config::Config;
use responder::Responder;
use tui::EventHandler;

/// Diagnostics go to a file under the data dir; the terminal belongs to
/// the TUI. Level comes from RUST_LOG, defaulting to info.
fn init_tracing() -> Result<()> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?
        .join("nido");
    std::fs::create_dir_all(&data_dir)?;

    let log_file = File::create(data_dir.join("nido.log"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!("Could not read config, using defaults: {:#}", err);
        Config::default()
    });
    let responder = Responder::from_config(&config);
    tracing::info!(responder = responder.as_str(), "Starting");

    let mut app = App::new(responder);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    app.abort_pending();
    tui::restore()?;

    result
}

async fn run_loop(
    terminal: &mut tui::Tui,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(app, frame))?;

        // Pick up a finished reply before waiting on the next event. The
        // tick timer keeps this poll running while the user is idle.
        if let Some(task) = app.take_finished_reply() {
            let result = match task.await {
                Ok(result) => result,
                Err(err) => Err(anyhow::anyhow!("Reply task failed: {}", err)),
            };
            app.resolve_reply(result);
        }

        if let Some(event) = events.next().await {
            handler::handle_event(app, event);
        }

        if app.should_quit {
            tracing::info!("Quitting");
            break;
        }
    }
    Ok(())
}
