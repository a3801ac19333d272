use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use jetplot::dispatch::{Input, Output, PlotIndexRange, Routine};
use jetplot::io::{DataFile, DiskStorage, FileMode, Storage};
use jetplot::telemetry;
use jetplot::{AxisOption, PlotMaker};
use serde::Deserialize;
use tracing::info;

const USAGE: &str = "usage: make_figures --config <path> [--output <path>] [--routine <name>]... [--skip-2d] [--verbose]";

#[derive(Debug)]
struct CliArgs {
    config: PathBuf,
    output: Option<String>,
    routines: Vec<String>,
    skip_2d: bool,
    verbose: bool,
}

/// Driver description loaded from JSON.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct DriverConfig {
    input: Input,
    output: String,
    mode: FileMode,
    routines: Vec<Routine>,
    variables: Vec<String>,
    variables_2d: Vec<String>,
    axis: AxisOption,
    range: PlotIndexRange,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            input: Input::default(),
            output: "figures.json".to_owned(),
            mode: FileMode::Recreate,
            routines: Routine::ALL.to_vec(),
            variables: Vec::new(),
            variables_2d: Vec::new(),
            axis: AxisOption::Linear,
            range: PlotIndexRange::default(),
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let filter = if args.verbose {
        telemetry::VERBOSE_FILTER
    } else {
        telemetry::DEFAULT_FILTER
    };
    let _ = telemetry::init_tracing(filter);

    let raw = fs::read_to_string(&args.config)
        .map_err(|err| format!("failed to read `{}`: {err}", args.config.display()))?;
    let mut config: DriverConfig =
        serde_json::from_str(&raw).map_err(|err| format!("invalid json: {err}"))?;
    config.input.validate().map_err(|err| err.to_string())?;
    if let Some(output) = args.output {
        config.output = output;
    }
    let routines = if args.routines.is_empty() {
        config.routines.clone()
    } else {
        args.routines
            .iter()
            .map(|name| name.parse::<Routine>().map_err(|err| err.to_string()))
            .collect::<Result<Vec<_>, _>>()?
    };

    let storage: Rc<dyn Storage> = Rc::new(DiskStorage);
    let mut file = DataFile::open(Rc::clone(&storage), &config.output, config.mode)
        .map_err(|err| err.to_string())?;
    let mut output = Output::new(PlotMaker::new(storage), config.input);
    output.init();

    let mut figures = 0;
    for routine in &routines {
        for variable in &config.variables {
            figures += output
                .make_all_1d(
                    routine.as_str(),
                    variable,
                    config.axis,
                    &config.range,
                    &mut file,
                )
                .map_err(|err| format!("{routine} `{variable}`: {err}"))?;
        }
        if args.skip_2d {
            continue;
        }
        for variable in &config.variables_2d {
            figures += output
                .make_all_2d(routine.as_str(), variable, &config.range, &mut file)
                .map_err(|err| format!("{routine} 2D `{variable}`: {err}"))?;
        }
    }

    file.close().map_err(|err| err.to_string())?;
    info!(
        figures,
        canvases = output.maker().plotted(),
        path = %config.output,
        "figures written"
    );
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut config = None::<PathBuf>;
    let mut output = None::<String>;
    let mut routines = Vec::new();
    let mut skip_2d = false;
    let mut verbose = false;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(value);
            }
            "--routine" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --routine".to_owned())?;
                routines.push(value);
            }
            "--skip-2d" => skip_2d = true,
            "--verbose" | "-v" => verbose = true,
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    let config = config.ok_or_else(|| format!("missing --config\n{USAGE}"))?;
    Ok(CliArgs {
        config,
        output,
        routines,
        skip_2d,
        verbose,
    })
}
