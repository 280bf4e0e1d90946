//! Binary entry point for the `lvconv` asset converter.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use lvconv::batch;
use lvconv::config::{self, JobConfig};
use lvconv::preview;
use lvconv_core::image::ChannelOrder;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("lvconv {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return ExitCode::SUCCESS;
    }

    if args.iter().any(|a| a == "--print-config") {
        return match JobConfig::sample().to_toml() {
            Ok(s) => {
                print!("{s}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    if let Some(i) = args.iter().position(|a| a == "--verify") {
        init_logging(None);
        return verify(&args[i + 1..]);
    }

    let job_path = args
        .iter()
        .find(|a| !a.starts_with('-'))
        .map_or_else(config::default_job_path, PathBuf::from);
    run(&job_path)
}

fn print_help() {
    println!("lvconv {}", env!("CARGO_PKG_VERSION"));
    println!("Convert images and TrueType fonts into LVGL C sources\n");
    println!("USAGE:");
    println!("    lvconv [OPTIONS] [JOB.toml]\n");
    println!("Runs every [[image]] and [[font]] in JOB.toml (default: {}).\n", config::DEFAULT_JOB_FILE);
    println!("OPTIONS:");
    println!("    --print-config               Print a sample job file to stdout");
    println!("    --verify <FILE.c> <OUT.png>  Render a generated image source to PNG");
    println!("             [--bgr]             Read RGB888 data as B,G,R");
    println!("    --version, -V                Print version information");
    println!("    --help, -h                   Print this help message");
}

/// `RUST_LOG` wins over the job file's `log_level`; `info` otherwise.
fn init_logging(job_level: Option<&str>) {
    let default = job_level.unwrap_or("info");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_micros()
        .init();
}

fn run(job_path: &Path) -> ExitCode {
    let job = match JobConfig::load(job_path) {
        Ok(job) => job,
        Err(e) => {
            init_logging(None);
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(job.log_level.as_deref());
    log::info!(
        "job: loaded {} ({} images, {} fonts)",
        job_path.display(),
        job.image.len(),
        job.font.len()
    );

    let report = batch::run_job(&job);
    for path in report.written() {
        println!("{}", path.display());
    }
    for failure in report.failures() {
        if let Err(e) = &failure.result {
            eprintln!("error: {} {}: {e}", failure.kind, failure.name);
        }
    }
    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn verify(args: &[String]) -> ExitCode {
    let paths: Vec<&String> = args.iter().filter(|a| !a.starts_with('-')).collect();
    let [source, png, ..] = paths.as_slice() else {
        eprintln!("error: --verify needs <FILE.c> <OUT.png>");
        return ExitCode::FAILURE;
    };
    let order = if args.iter().any(|a| a == "--bgr") {
        ChannelOrder::Bgr
    } else {
        ChannelOrder::Rgb
    };
    match preview::render_source(Path::new(source.as_str()), Path::new(png.as_str()), order) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
