use std::env;
use std::process;

use clap::Parser;

use vidresize_core::config::resolver::{self, Help};
use vidresize_core::conversion::infrastructure::input_scanner::discover_inputs;
use vidresize_core::pipeline::convert_batch_use_case::ConvertBatchUseCase;
use vidresize_core::video::infrastructure::ffmpeg_clip::FfmpegClip;

const EXIT_FAILED: i32 = 1;
const EXIT_USAGE: i32 = 2;

/// Batch-resize and re-encode every video in <root>/video.
///
/// Options are passed as -flag=value tokens; run with no options or
/// --help to list them.
#[derive(Parser)]
#[command(name = "vidresize", version, disable_help_flag = true)]
struct Cli {
    /// Options in -flag=value form.
    #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
    options: Vec<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(EXIT_FAILED);
        }
    }
}

fn run() -> Result<i32, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cwd = env::current_dir()?;

    let resolution = match resolver::resolve(&cli.options, &cwd) {
        Ok(resolution) => resolution,
        Err(e) => {
            println!("{}", resolver::usage());
            eprintln!("Error: {e}");
            return Ok(EXIT_USAGE);
        }
    };

    match resolution.help {
        Help::None => {}
        Help::ThenRun => println!("{}", resolver::usage()),
        Help::ThenExit => {
            println!("{}", resolver::usage());
            return Ok(0);
        }
    }

    let config = resolution.config;
    let input_dir = config.input_dir();
    let inputs = discover_inputs(&input_dir);
    log::info!("Found {} videos in {}", inputs.len(), input_dir.display());

    let mut use_case = ConvertBatchUseCase::new(Box::new(FfmpegClip::new()), config);
    let report = use_case.execute(&inputs)?;

    Ok(if report.has_failures() { EXIT_FAILED } else { 0 })
}
