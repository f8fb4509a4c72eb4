//! wyrm CLI — load and execute a program image.
//!
//! Exit codes:
//! - 0: Program halted normally
//! - 1: Usage or input/decode error
//! - 2: Runtime fault

use std::fs;
use std::process;

use wyrm_common::Image;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() != 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        path => {
            if let Err(code) = run(path) {
                process::exit(code);
            }
        }
    }
}

/// Decode the image at `path` and execute it to completion.
fn run(path: &str) -> Result<(), i32> {
    let bytes = fs::read(path).map_err(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        1
    })?;

    let image = Image::decode(&bytes).map_err(|e| {
        eprintln!("error: invalid image: {e}");
        1
    })?;

    wyrm_vm::run(image).map_err(|e| {
        eprintln!("runtime error: {e}");
        2
    })
}

fn print_usage() {
    eprintln!("Usage: wyrm <image>");
    eprintln!();
    eprintln!("Executes a program image of 16-bit little-endian words.");
}
