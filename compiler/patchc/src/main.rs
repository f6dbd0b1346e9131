//! Patch script runner.
//!
//! ```text
//! patchc run <file.patch> [--root=<file.json>] [--short-trace]
//!                         [--color=auto|always|never] [--max-depth=N]
//! patchc lex <file.patch>
//! patchc parse <file.patch>
//! ```
//!
//! Logging goes to stderr when `PATCH_LOG` (or `RUST_LOG`) holds a filter,
//! e.g. `PATCH_LOG=patch_eval=debug`.

mod commands;
mod options;
mod tracing_setup;

use commands::{lex_file, parse_file, run_file};
use options::RunOptions;

fn main() {
    tracing_setup::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "run" => match RunOptions::parse(&args[2..]) {
            Ok(options) => run_file(&options),
            Err(message) => {
                eprintln!("error: {message}");
                eprintln!();
                print_run_usage();
                std::process::exit(1);
            }
        },
        "lex" | "parse" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: patchc {} <file.patch>", args[1]);
                std::process::exit(1);
            };
            if args[1] == "lex" {
                lex_file(path);
            } else {
                parse_file(path);
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Patch script runner");
    println!();
    println!("Usage: patchc <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>     Run a script and print the patched root as JSON");
    println!("  lex <file>     Print the token stream");
    println!("  parse <file>   Print the parsed statements");
    println!("  help           Show this message");
}

fn print_run_usage() {
    eprintln!("Usage: patchc run <file.patch> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --root=<file.json>             Document to patch (default: {{}})");
    eprintln!("  --short-trace                  One line per error cause");
    eprintln!("  --color=auto|always|never      Colored error output");
    eprintln!("  --max-depth=N                  Nested call limit, 0 for none");
}
