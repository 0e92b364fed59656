//! Tagpack CLI
//!
//! Plans storage layouts for the unions in a JSON descriptor batch.

use std::path::Path;

use tagpackc::{check_file, init_tracing, plan_file, PlanArgs};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let result = match args[1].as_str() {
        "plan" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: tagpack plan <file.json> [--no-overlap] [--verbose]");
                std::process::exit(1);
            };
            PlanArgs::parse(&args[3..]).and_then(|options| plan_file(Path::new(path), options))
        }
        "check" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: tagpack check <file.json>");
                std::process::exit(1);
            };
            check_file(Path::new(path))
        }
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        "version" | "--version" | "-V" => {
            println!("tagpack {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Tagpack - union storage layout planner");
    println!();
    println!("Usage: tagpack <command> [options]");
    println!();
    println!("Commands:");
    println!("  plan <file.json>   Plan every union and print its layout");
    println!("  check <file.json>  Report diagnostics only");
    println!("  help               Show this help message");
    println!("  version            Show version information");
    println!();
    println!("Plan options:");
    println!("  --no-overlap       Never overlap storage between cases");
    println!("  -v, --verbose      Print every case's value tree");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=tagpack_layout=debug) for planner logs.");
}
