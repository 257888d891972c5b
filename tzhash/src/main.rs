// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

mod minimal_tracer;

use minimal_tracer::MinimalTracer;
use std::{
    env,
    error::Error,
    io::{self, BufWriter},
    process::exit,
    time::Instant,
};

use tracing::{info, trace};
use tzhash_core::{
    environment::{self, DEFAULT_ZONEINFO_DIR, ENV_TZHASH_LOG, ENV_TZHASH_ZONEINFO},
    generate, VERSION,
};

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Version,
    Generate(Option<String>),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let now = Instant::now();

    MinimalTracer::register()?;
    trace!("Started tzhash");

    let args: Vec<String> = env::args().skip(1).collect();
    let dir = match parse_args(&args) {
        Ok(Command::Help) => {
            usage();
            return Ok(());
        },
        Ok(Command::Version) => {
            print_version();
            return Ok(());
        },
        Ok(Command::Generate(dir)) => dir,
        Err(message) => {
            eprintln!("{}", message);
            usage();
            exit(1);
        },
    };

    let root = environment::zoneinfo_dir(dir.as_deref());
    trace!("Scanning directory \"{}\"", root.display());

    let out = BufWriter::new(io::stdout().lock());
    match generate(&root, out).await {
        Ok(finished) => {
            let summary = finished.summary();
            info!(
                "Wrote {} zones and {} rules with mask 0x{:x} in {}ms",
                summary.zones,
                summary.rules,
                summary.mask,
                now.elapsed().as_millis()
            );
        },
        Err(err) => {
            eprintln!("error: {}", err);
            exit(1);
        },
    }

    Ok(())
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut dir = None;
    for arg in args {
        match arg.as_str() {
            "-v" | "--version" => return Ok(Command::Version),
            "-h" | "--help" => return Ok(Command::Help),
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(format!("Unknown option: {}", flag));
            },
            path => {
                if dir.is_some() {
                    return Err(format!("Unexpected argument: {}", path));
                }
                dir = Some(path.to_string());
            },
        }
    }
    Ok(Command::Generate(dir))
}

fn print_version() {
    println!("tzhash {}", VERSION);
}

fn usage() {
    print_version();
    println!(
        r#"

Usage:
  tzhash [DIR]
  tzhash -v | --version
  tzhash -h | --help

Arguments:
  DIR               Root of the zoneinfo database (default: ${} or {})

Options:
  -v, --version     Print version information
  -h, --help        Print this help message

Environment:
  {}        Log filter, e.g. "debug" or "tzhash_table=trace"
"#,
        ENV_TZHASH_ZONEINFO, DEFAULT_ZONEINFO_DIR, ENV_TZHASH_LOG
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_no_args_uses_default_dir() {
        assert_eq!(parse_args(&[]), Ok(Command::Generate(None)));
    }

    #[test]
    fn test_positional_dir() {
        assert_eq!(
            parse_args(&args(&["/tmp/zoneinfo"])),
            Ok(Command::Generate(Some("/tmp/zoneinfo".into())))
        );
    }

    #[test]
    fn test_flags() {
        assert_eq!(parse_args(&args(&["-h"])), Ok(Command::Help));
        assert_eq!(parse_args(&args(&["--version"])), Ok(Command::Version));
    }

    #[test]
    fn test_rejects_extra_and_unknown_args() {
        assert!(parse_args(&args(&["a", "b"])).is_err());
        assert!(parse_args(&args(&["--posix"])).is_err());
    }
}
