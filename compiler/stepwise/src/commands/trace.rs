//! The `trace` command: run each input tree once and print its history.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;
use stepwise_eval::{
    ErrorDescriptor, HistoryEvent, HistoryPolicy, Interpreter, Snapshot, TraceConfig,
};
use tracing::{debug, warn};

use crate::errors::CliError;
use crate::input::{decode, display_name, read_input, STDIN};

/// Everything `trace` takes from the command line besides its inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraceOptions {
    pub config: TraceConfig,
    /// Include the history recorded before a failure in its report.
    pub keep_partial: bool,
    pub pretty: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceArgs {
    pub inputs: Vec<String>,
    pub options: TraceOptions,
}

/// Parse the arguments after `trace`.
///
/// Flags and inputs may be interleaved; `-` reads standard input.
pub fn parse_trace_args(args: &[String]) -> Result<TraceArgs, CliError> {
    let mut options = TraceOptions::default();
    let mut inputs = Vec::new();

    for arg in args {
        if let Some(value) = arg.strip_prefix("--max-iterations=") {
            options.config.iteration_cap = value.parse().map_err(|_| CliError::InvalidFlag {
                flag: "--max-iterations",
                value: value.to_string(),
            })?;
        } else if arg == "--dedup" {
            options.config.history_policy = HistoryPolicy::SkipConsecutiveDuplicates;
        } else if arg == "--no-swap-detection" {
            options.config.swap_detection = false;
        } else if arg == "--keep-partial" {
            options.keep_partial = true;
        } else if arg == "--pretty" {
            options.pretty = true;
        } else if arg == STDIN || !arg.starts_with('-') {
            inputs.push(arg.clone());
        } else {
            return Err(CliError::UnknownOption(arg.clone()));
        }
    }

    if inputs.is_empty() {
        return Err(CliError::MissingInput);
    }
    Ok(TraceArgs { inputs, options })
}

/// The JSON document printed for one input.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TraceReport {
    Traced {
        file: String,
        history: Vec<HistoryEvent>,
        variables: BTreeMap<String, Snapshot>,
    },
    Failed {
        file: String,
        error: ErrorDescriptor,
        #[serde(skip_serializing_if = "Option::is_none")]
        history: Option<Vec<HistoryEvent>>,
    },
}

impl TraceReport {
    pub fn file(&self) -> &str {
        match self {
            TraceReport::Traced { file, .. } | TraceReport::Failed { file, .. } => file,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TraceReport::Traced { .. })
    }

    /// A report for an input that never reached the interpreter.
    fn input_error(file: &str, err: &CliError) -> Self {
        TraceReport::Failed {
            file: file.to_string(),
            error: ErrorDescriptor {
                message: err.to_string(),
                failing_node_type: None,
                line: None,
            },
            history: None,
        }
    }
}

/// Decode and trace one tree.
pub fn trace_source(path: &str, text: &str, options: &TraceOptions) -> TraceReport {
    let file = display_name(path);
    let program = match decode(file, text) {
        Ok(program) => program,
        Err(err) => return TraceReport::input_error(file, &err),
    };

    let run = Interpreter::builder()
        .config(options.config.clone())
        .build()
        .run(&program);
    match run {
        Ok(trace) => TraceReport::Traced {
            file: file.to_string(),
            history: trace.history,
            variables: trace.variables,
        },
        Err(failure) => {
            debug!(file, error = %failure.error, "trace failed");
            TraceReport::Failed {
                file: file.to_string(),
                error: failure.descriptor(),
                history: options.keep_partial.then_some(failure.history),
            }
        }
    }
}

/// Read, decode and trace one input.
pub fn trace_input(path: &str, options: &TraceOptions) -> TraceReport {
    match read_input(path) {
        Ok(text) => trace_source(path, &text, options),
        Err(err) => TraceReport::input_error(display_name(path), &err),
    }
}

/// Trace every input, in parallel when there is more than one.
///
/// Each input gets its own interpreter; reports come back in input order.
pub fn trace_all(inputs: &[String], options: &TraceOptions) -> Vec<TraceReport> {
    if inputs.len() < 2 {
        return inputs.iter().map(|path| trace_input(path, options)).collect();
    }

    // Scoped so the pool is torn down before returning.
    rayon::ThreadPoolBuilder::new()
        .stack_size(16 * 1024 * 1024)
        .build_scoped(rayon::ThreadBuilder::run, |pool| {
            pool.install(|| {
                inputs
                    .par_iter()
                    .map(|path| trace_input(path, options))
                    .collect::<Vec<_>>()
            })
        })
        .unwrap_or_else(|e| {
            warn!("failed to create thread pool ({e}), tracing sequentially");
            inputs
                .iter()
                .map(|path| trace_input(path, options))
                .collect()
        })
}

/// Print one JSON report per input to stdout.
///
/// Returns `false` if any input failed.
pub fn trace_files(args: &TraceArgs) -> bool {
    let mut all_ok = true;
    for report in trace_all(&args.inputs, &args.options) {
        all_ok &= report.is_success();
        let encoded = if args.options.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        match encoded {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: cannot encode report for '{}': {err}", report.file());
                all_ok = false;
            }
        }
    }
    all_ok
}
