//! Terminal client for a shared 8x8 grid
//! Follows the server's active cell and sends cell selections

mod command;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use command::{Command, HELP};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use gridlink_core::{ClientConfig, GridState, StreamDecoder, UpdateClient, DEFAULT_BASE_URL};
use std::future::Future;
use std::io::Write;
use tokio::sync::mpsc;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Gridlink - follow and move the active cell of a shared grid
#[derive(Parser, Debug)]
#[command(name = "gridlink")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal client for a shared 8x8 grid", long_about = None)]
struct Args {
    /// Base URL of the grid server
    #[arg(short, long, default_value = DEFAULT_BASE_URL)]
    server: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    let result = runtime.block_on(run(args));

    // The stdin reader thread stays blocked in read(); don't wait for it
    runtime.shutdown_background();
    result
}

async fn run(args: Args) -> Result<()> {
    // Logs go to stderr so they never interleave with the grid on stdout
    setup_logging(&args.log_level)?;

    let config = ClientConfig::with_base_url(args.server);
    let mut decoder = StreamDecoder::from_config(&config).context("Failed to set up stream")?;
    let updates = UpdateClient::from_config(&config).context("Failed to set up update client")?;
    let state = decoder.state();

    info!("Starting Gridlink v{} against {}", env!("CARGO_PKG_VERSION"), config.base_url);
    decoder.start()?;

    // Line-buffered stdin on a blocking thread
    let (line_tx, line_rx) = mpsc::channel::<String>(32);
    tokio::task::spawn_blocking(move || {
        use std::io::BufRead;

        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    // Registered once so a Ctrl+C that lands during a redraw is not lost
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Received Ctrl+C, shutting down...");
    };

    event_loop(&state, &updates, line_rx, ctrl_c, draw).await?;

    decoder.stop();
    println!("\nConnection closed.");
    Ok(())
}

/// Redraw on every state change or command until quit, stdin error or `shutdown`
async fn event_loop<S, D>(
    state: &GridState,
    updates: &UpdateClient,
    mut line_rx: mpsc::Receiver<String>,
    shutdown: S,
    mut draw: D,
) -> Result<()>
where
    S: Future<Output = ()>,
    D: FnMut(&GridState, &str) -> Result<()>,
{
    let mut position_rx = state.subscribe_position();
    let mut connection_rx = state.subscribe_connection();
    let mut notice = HELP.to_string();
    let mut stdin_open = true;

    tokio::pin!(shutdown);
    draw(state, &notice)?;

    loop {
        tokio::select! {
            changed = position_rx.changed() => {
                if changed.is_err() { break; }
            }
            changed = connection_rx.changed() => {
                if changed.is_err() { break; }
            }
            line = line_rx.recv(), if stdin_open => {
                let Some(line) = line else {
                    // Keep following the grid until Ctrl+C
                    stdin_open = false;
                    continue;
                };
                match command::parse(&line) {
                    Ok(Command::Select(position)) => {
                        updates.spawn_send(position);
                        notice = format!("Requested cell ({}, {})", position.x, position.y);
                    }
                    Ok(Command::Redraw) => {}
                    Ok(Command::Help) => notice = HELP.to_string(),
                    Ok(Command::Quit) => break,
                    Err(e) => notice = format!("{:#}", e),
                }
            }
            _ = &mut shutdown => break,
        }

        draw(state, &notice)?;
    }

    Ok(())
}

/// Setup logging with tracing
fn setup_logging(level: &str) -> Result<()> {
    let log_level = level.parse::<Level>().unwrap_or(Level::WARN);

    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

/// Redraw the whole screen from the current state
fn draw(state: &GridState, notice: &str) -> Result<()> {
    let mut out = std::io::stdout();
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;

    let connection = state.connection();
    let status = render::status_line(connection);
    let status = if connection.is_connected() {
        status.green()
    } else {
        status.red()
    };

    writeln!(out, "{}", render::TITLE.bold())?;
    writeln!(out, "{}", status)?;
    writeln!(out)?;
    for row in render::grid_rows(state.position()) {
        writeln!(out, "{}", row)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", notice)?;
    write!(out, "> ")?;
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridlink_core::{ConnectionState, Position};
    use tokio::sync::oneshot;
    use tokio::time::{timeout, Duration};

    fn updates() -> UpdateClient {
        UpdateClient::from_config(&ClientConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_shutdown_during_draw_is_not_lost() {
        let state = GridState::new();
        let updates = updates();
        let (_line_tx, line_rx) = mpsc::channel(1);
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let shutdown = async {
            let _ = stop_rx.await;
        };

        // Fire the shutdown from inside the second redraw
        let mut stop_tx = Some(stop_tx);
        let mut draws = 0;
        let draw = |_: &GridState, _: &str| {
            draws += 1;
            if draws == 2 {
                if let Some(tx) = stop_tx.take() {
                    let _ = tx.send(());
                }
            }
            Ok(())
        };

        let redraw_state = state.clone();
        tokio::spawn(async move {
            redraw_state.set_connection(ConnectionState::Connected);
        });

        timeout(
            Duration::from_secs(5),
            event_loop(&state, &updates, line_rx, shutdown, draw),
        )
        .await
        .expect("loop did not see the shutdown")
        .unwrap();
        assert_eq!(draws, 2);
    }

    #[tokio::test]
    async fn test_quit_command_ends_loop() {
        let state = GridState::new();
        let updates = updates();
        let (line_tx, line_rx) = mpsc::channel(4);
        line_tx.send("q".to_string()).await.unwrap();

        let mut notices = Vec::new();
        let draw = |_: &GridState, notice: &str| {
            notices.push(notice.to_string());
            Ok(())
        };

        timeout(
            Duration::from_secs(5),
            event_loop(&state, &updates, line_rx, std::future::pending(), draw),
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(notices, vec![HELP.to_string()]);
        assert_eq!(state.position(), Position::default());
    }

    #[tokio::test]
    async fn test_bad_command_sets_notice() {
        let state = GridState::new();
        let updates = updates();
        let (line_tx, line_rx) = mpsc::channel(4);
        line_tx.send("9 9".to_string()).await.unwrap();
        line_tx.send("q".to_string()).await.unwrap();

        let mut notices = Vec::new();
        let draw = |_: &GridState, notice: &str| {
            notices.push(notice.to_string());
            Ok(())
        };

        event_loop(&state, &updates, line_rx, std::future::pending(), draw)
            .await
            .unwrap();
        assert_eq!(notices.len(), 2);
        assert!(notices[1].contains("outside"), "{}", notices[1]);
    }
}
