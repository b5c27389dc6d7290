use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use specimen_transcriber::cli::{Cli, Command};
use specimen_transcriber::config::TranscriberConfig;
use specimen_transcriber::geometry::Point;
use specimen_transcriber::session::{self, Action, Script};
use specimen_transcriber::ui::Terminal;
use specimen_transcriber::workflow::{WorkflowController, WorkflowEvent};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => TranscriberConfig::load_from(path)?,
        None => TranscriberConfig::load()?,
    };

    match cli.command {
        Command::Guide => {
            print!("{}", Terminal::new().guide(&config.guide()?));
        }
        Command::Replay { script, json } => {
            let script = Script::from_path(&script)?;
            let mut wf = config.build_controller()?;
            attach_printer(&mut wf, json);

            let outcomes = session::replay(&mut wf, &script);
            let term = Terminal::new();
            for (i, outcome) in outcomes.iter().enumerate() {
                if let Err(err) = &outcome.result {
                    eprintln!("{}", term.rejected(&format!("action #{}: {err}", i + 1)));
                }
            }
        }
        Command::Interactive => run_interactive(&config)?,
    }

    Ok(())
}

fn attach_printer(wf: &mut WorkflowController, json: bool) {
    let term = Terminal::new();
    wf.subscribe(move |event| {
        if json {
            println!("{}", serde_json::to_string(event).unwrap_or_default());
            return;
        }
        match event {
            WorkflowEvent::StateChanged { change, snapshot } => {
                println!("{}", term.change(*change, snapshot));
            }
            WorkflowEvent::RecordFinished(record) => {
                println!("{}", term.finished(record));
                println!(
                    "{}",
                    serde_json::to_string_pretty(&record.answers).unwrap_or_default()
                );
            }
            WorkflowEvent::RecordSkipped { record } => {
                println!("{}", term.rejected(&format!("record #{record} skipped")));
            }
        }
    });
}

fn run_interactive(config: &TranscriberConfig) -> Result<()> {
    let term = Terminal::new();
    let mut wf = config.build_controller()?;

    // Finished records go to stdout as JSON lines; prompts go to stderr.
    wf.subscribe(|event| {
        if let WorkflowEvent::RecordFinished(record) = event {
            println!("{}", serde_json::to_string(record).unwrap_or_default());
        }
    });

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let snapshot = wf.snapshot();
        eprintln!(
            "{}",
            term.status_bar(&config.title, &config.description, snapshot.current_record)
        );
        match &snapshot.field {
            Some(field) if snapshot.highlight.is_some() => eprint!("{}", term.field(field)),
            _ => eprint!("mark a region with :select x1 y1 x2 y2 > "),
        }
        io::stderr().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim() == ":quit" {
            break;
        }

        let action = match Action::parse_command(&line) {
            Ok(action) => action,
            Err(err) => {
                eprintln!("{}", term.rejected(&err.to_string()));
                continue;
            }
        };

        match action.apply(&mut wf) {
            Ok(_) => {
                // Typed coordinates are relative to the image, so its origin is (0, 0).
                if matches!(action, Action::Select { .. }) {
                    if let Some(layout) = wf.magnifier_layout(Point::default(), config.viewport) {
                        eprintln!("{}", term.layout(&layout));
                    }
                }
            }
            Err(err) => eprintln!("{}", term.rejected(&err.to_string())),
        }
    }

    Ok(())
}
