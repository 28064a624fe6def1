//! sipsh entry point.

use std::process::ExitCode;

use clap::Parser;
use sipsh::cli::Cli;
use sipsh::config::load_session_config;
use sipsh::dispatcher::CommandDispatcher;
use sipsh::repl::{LineLoop, ReplOptions};
use sipsh::sip::TcpConnector;
use sipsh::ui::create_ui;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN, so logs stay out of the prompt stream
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("sipsh=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sipsh=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("sipsh starting with args: {:?}", cli);

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let config = load_session_config(&cli.config_path());

    let interactive = console::user_attended();
    let mut ui = create_ui(interactive);

    let mut dispatcher = CommandDispatcher::new(config, Box::new(TcpConnector::default()));

    // Outcome deliberately ignored: a failed autostart leaves the operator
    // at the prompt to retry by hand.
    if cli.autostart {
        dispatcher.run("start", ui.as_mut());
    }

    let mut line_loop = LineLoop::new(ReplOptions::default());
    match line_loop.run(&mut dispatcher, ui.as_mut()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
