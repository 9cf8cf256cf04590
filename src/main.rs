use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

#[derive(Parser)]
#[command(name = "dotgraph", about = "Render graph scripts as Graphviz DOT")]
struct Cli {
    /// Graph script (reads from stdin if not provided)
    file: Option<PathBuf>,

    /// Write the DOT output to this file instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Log more detail to stderr (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let input = match &cli.file {
        Some(path) => std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to read {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).unwrap_or_else(|e| {
                eprintln!("ERROR: failed to read stdin: {e}");
                std::process::exit(1);
            });
            buf
        }
    };

    let output = match dotgraph::render_script(&input) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
    };

    match cli.output {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, &output) {
                eprintln!("ERROR: failed to write {}: {e}", path.display());
                std::process::exit(1);
            }
            tracing::info!(path = %path.display(), bytes = output.len(), "wrote DOT output");
        }
        None => print!("{output}"),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
