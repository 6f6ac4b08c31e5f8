//! Sift command line
//!
//! ```text
//! sift [FILE|-] [--response N]
//! sift --preset NAME [--order N] [--fs HZ] [--output ba|zpk|sos] [--response N]
//! ```
//!
//! Reads a JSON filter specification (from FILE, or stdin when FILE is
//! omitted or `-`), designs the filter and prints the coefficients as JSON.
//! With `--response N` the magnitude response on N points is printed too.
//! Logs go to stderr; set `RUST_LOG` to change the level.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use sift_core::{design_filter_spec, FilterSpec, OutputRecord};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
usage: sift [FILE|-] [--response N]
       sift --preset NAME [--order N] [--fs HZ] [--output ba|zpk|sos] [--response N]";

const DEFAULT_PRESET_ORDER: usize = 4;
const DEFAULT_PRESET_FS: f64 = 256.0;

#[derive(Debug, PartialEq)]
enum Source {
    Stdin,
    File(PathBuf),
    Preset {
        name: String,
        order: usize,
        fs: f64,
        output: Option<String>,
    },
}

#[derive(Debug, PartialEq)]
struct Args {
    source: Source,
    response_points: Option<usize>,
}

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Design(Args),
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command> {
    let mut path: Option<String> = None;
    let mut preset: Option<String> = None;
    let mut order: Option<usize> = None;
    let mut fs: Option<f64> = None;
    let mut output: Option<String> = None;
    let mut response_points = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let mut value =
            |flag: &str| args.next().with_context(|| format!("{} needs a value", flag));
        match arg.as_str() {
            "--preset" => preset = Some(value("--preset")?),
            "--order" => {
                let raw = value("--order")?;
                order = Some(raw.parse().context("--order must be an integer")?);
            }
            "--fs" => fs = Some(value("--fs")?.parse().context("--fs must be a number")?),
            "--output" => output = Some(value("--output")?),
            "--response" => {
                let raw = value("--response")?;
                response_points = Some(raw.parse().context("--response must be an integer")?);
            }
            "-h" | "--help" => return Ok(Command::Help),
            flag if flag.starts_with("--") => bail!("unknown option {}\n{}", flag, USAGE),
            file => {
                if path.replace(file.to_string()).is_some() {
                    bail!("only one specification file can be given\n{}", USAGE);
                }
            }
        }
    }

    let source = match (preset, path) {
        (Some(_), Some(_)) => bail!("--preset and a specification file are exclusive\n{}", USAGE),
        (Some(name), None) => Source::Preset {
            name,
            order: order.unwrap_or(DEFAULT_PRESET_ORDER),
            fs: fs.unwrap_or(DEFAULT_PRESET_FS),
            output,
        },
        (None, path) => {
            if order.is_some() || fs.is_some() || output.is_some() {
                bail!("--order, --fs and --output only apply to --preset\n{}", USAGE);
            }
            match path {
                Some(p) if p != "-" => Source::File(PathBuf::from(p)),
                _ => Source::Stdin,
            }
        }
    };

    Ok(Command::Design(Args {
        source,
        response_points,
    }))
}

fn load_spec(source: &Source) -> Result<FilterSpec> {
    let spec = match source {
        Source::Stdin => {
            let mut json = String::new();
            io::stdin()
                .read_to_string(&mut json)
                .context("failed to read specification from stdin")?;
            FilterSpec::from_json_str(&json)?
        }
        Source::File(path) => FilterSpec::load(path)
            .with_context(|| format!("failed to load specification {}", path.display()))?,
        Source::Preset {
            name,
            order,
            fs,
            output,
        } => {
            let spec = FilterSpec::from_preset(name, *order, *fs)?;
            match output {
                Some(format) => spec.with_option("output", format.as_str()),
                None => spec,
            }
        }
    };
    Ok(spec)
}

#[derive(Serialize)]
struct ResponseRecord {
    frequencies: Vec<f64>,
    magnitude_db: Vec<f64>,
}

#[derive(Serialize)]
struct Report {
    filter: OutputRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<ResponseRecord>,
}

fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sift=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = match parse_args(std::env::args().skip(1))? {
        Command::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        Command::Design(args) => args,
    };
    let spec = load_spec(&args.source)?;
    info!(
        design = %spec.filter_design,
        filter_type = %spec.filter_type,
        order = spec.order,
        "Designing filter"
    );

    let output = design_filter_spec(&spec)?;

    let response = match args.response_points {
        Some(points) => {
            let resp = output.frequency_response(points, spec.fs)?;
            Some(ResponseRecord {
                magnitude_db: resp.magnitude_db(),
                frequencies: resp.frequencies,
            })
        }
        None => None,
    };

    let report = Report {
        filter: OutputRecord::from(&output),
        response,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
