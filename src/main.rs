use tappable::adapters::ReqwestHttpClient;
use tappable::app::{App, SAMPLE_TEXT};
use tappable::cli::{parse_args, run_cli_command, CliCommand, USAGE};
use tappable::config::{EnrichmentConfig, InteractionConfig};
use tappable::enrichment::RemoteEnrichmentClient;
use tappable::logging::{default_log_path, init_logging, LogConfig, LogTarget};
use tappable::session::SessionMessage;
use tappable::terminal::{setup_panic_hook, TerminalManager};
use tappable::traits::EnrichmentService;
use tappable::ui;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::Terminal;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Event loop cadence: deadlines and animations advance on this tick
const TICK: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = match parse_args(std::env::args()) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    // The demo owns the terminal, so it can only log to a file.
    let target = match &args.command {
        CliCommand::Demo { .. } => default_log_path().map(LogTarget::File),
        _ => Some(LogTarget::Stderr),
    };
    if let Some(target) = target {
        if let Err(e) = init_logging(&LogConfig::from_verbosity(args.verbosity, target)) {
            eprintln!("Warning: logging disabled: {}", e);
        }
    }

    if let Some(result) = run_cli_command(&args.command) {
        return result;
    }

    let text = match &args.command {
        CliCommand::Demo { file: Some(path) } => read_text(path)?,
        _ => SAMPLE_TEXT.to_string(),
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_demo(text))
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).wrap_err_with(|| format!("Failed to read {}", path.display()))
}

async fn run_demo(text: String) -> Result<()> {
    setup_panic_hook();

    let config = EnrichmentConfig::from_env();
    let enrichment: Arc<dyn EnrichmentService> =
        Arc::new(RemoteEnrichmentClient::new(ReqwestHttpClient::new(), config));
    let mut app = App::new(text, InteractionConfig::default(), enrichment);

    let mut terminal_manager = TerminalManager::new()?;
    let size = terminal_manager.size()?;
    app.resize(size.width, size.height);
    tracing::info!("Demo started at {}x{}", size.width, size.height);

    let result = run_app(terminal_manager.terminal(), &mut app).await;
    terminal_manager.restore();
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // Take the message receiver from the controller (we need ownership for select!)
    let mut message_rx: Option<mpsc::UnboundedReceiver<SessionMessage>> =
        app.controller.take_message_receiver();

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        let timeout = tokio::time::sleep(TICK);

        tokio::select! {
            _ = timeout => {
                app.tick(Instant::now());
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Resize(width, height))) => app.resize(width, height),
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key, Instant::now());
                    }
                    Some(Ok(Event::Mouse(mouse))) => app.handle_mouse(mouse, Instant::now()),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => tracing::warn!("Terminal event error: {}", e),
                    None => app.quit(),
                }
            }

            msg = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                if let Some(msg) = msg {
                    app.handle_session_message(msg);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
