use clap::Parser;
use live_reporter::{replay, AnsiSink, LiveResultRenderer, RecordedRun, ReporterConfig};
use std::path::PathBuf;
use std::process::{exit, ExitCode};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// Recorded run to render
    run_file: PathBuf,

    /// Reporter configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, default_value_t = false)]
    no_color: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    let thresholds = match &args.config {
        Some(path) => match ReporterConfig::load(path) {
            Ok(config) => config.thresholds(),
            Err(error) => {
                eprintln!("Failed to load reporter config at {}", path.display());
                eprintln!("Cause: {}", error);
                exit(1);
            }
        },
        None => ReporterConfig::default().thresholds(),
    };

    let run = match RecordedRun::load(&args.run_file) {
        Ok(run) => run,
        Err(error) => {
            eprintln!("Failed to load recorded run at {}", args.run_file.display());
            eprintln!("Cause: {}", error);
            exit(1);
        }
    };

    let mut renderer = LiveResultRenderer::with_thresholds(AnsiSink::stdout(), thresholds);

    let rendered = replay(&run, &mut renderer).and_then(|_| renderer.finish());
    match rendered {
        Ok(summary) => summary.exit_code(),
        Err(error) => {
            eprintln!("Failed to write to the terminal: {}", error);
            ExitCode::FAILURE
        }
    }
}
