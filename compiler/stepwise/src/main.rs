//! Stepwise CLI
//!
//! Traces ESTree JSON trees and prints their execution history.

use stepwise::commands::{check_files, parse_trace_args, trace_files, TraceArgs};
use stepwise::{init_tracing, CliError};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "trace" => {
            let trace_args = parse_or_exit(parse_trace_args(&args[2..]));
            exit_with(trace_files(&trace_args));
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: stepwise check <tree.json|->...");
                std::process::exit(1);
            }
            exit_with(check_files(&args[2..]));
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("stepwise {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // A bare tree path traces it with default options.
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
            {
                let trace_args = parse_or_exit(parse_trace_args(&args[1..]));
                exit_with(trace_files(&trace_args));
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn parse_or_exit(parsed: Result<TraceArgs, CliError>) -> TraceArgs {
    match parsed {
        Ok(trace_args) => trace_args,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("Usage: stepwise trace <tree.json|->... [options]");
            std::process::exit(1);
        }
    }
}

fn exit_with(success: bool) {
    if !success {
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("Stepwise - line-by-line tracer for ESTree programs");
    println!();
    println!("Usage: stepwise <command> [options]");
    println!();
    println!("Commands:");
    println!("  trace <tree.json|->...   Run each tree and print its history as JSON");
    println!("  check <tree.json|->...   List constructs the tracer cannot run");
    println!("  help                     Show this help message");
    println!("  version                  Show version information");
    println!();
    println!("Trace options:");
    println!("  --max-iterations=<n>     Body executions per loop before it is stopped (default 1000)");
    println!("  --dedup                  Drop events identical to the one before");
    println!("  --no-swap-detection      Trace swap idioms as plain assignments");
    println!("  --keep-partial           Include the history recorded before a failure");
    println!("  --pretty                 Indent the JSON output");
    println!();
    println!("Environment:");
    println!("  STEPWISE_LOG=<filter>    Diagnostic logging to stderr (falls back to RUST_LOG)");
    println!("  STEPWISE_LOG_TREE=1      Hierarchical log output");
    println!();
    println!("Examples:");
    println!("  stepwise trace sort.json --pretty");
    println!("  acorn --ecma2020 --locations sort.js | stepwise trace -");
    println!("  stepwise trace a.json b.json --max-iterations=50");
    println!("  stepwise check sort.json");
}
