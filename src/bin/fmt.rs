// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! `clausefmt` CLI (§4.12): read a file, run it through the safety gate,
//! and either print the result or rewrite the file in place.

use std::fs;
use std::process::ExitCode;

use clap::Parser;

use clausefmt::error::CliError;
use clausefmt::{gate, FormatOptions, ReferenceFrontend};

#[derive(Parser, Debug)]
#[command(name = "clausefmt", about = "Pretty-print source files under a fixed layout policy")]
struct Args {
    /// Source file to format.
    file: String,

    /// Rewrite the file in place instead of printing to stdout.
    #[arg(short = 'i', long = "in-place")]
    in_place: bool,

    /// Override the default layout width.
    #[arg(short = 'w', long = "width")]
    width: Option<i32>,
}

fn main() -> ExitCode {
    simple_logger::SimpleLogger::new().env().init().ok();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let bytes = fs::read(&args.file)?;
    let width = args.width.unwrap_or_else(|| FormatOptions::default().width);
    let frontend = ReferenceFrontend;

    let formatted = gate::format_code_labeled_with_width(&bytes, &args.file, &frontend, width)
        .inspect_err(|_| log::warn!("{}: formatter rejected this file", args.file))?;

    if args.in_place {
        fs::write(&args.file, &formatted)?;
        log::info!("{}: rewritten in place", args.file);
    } else {
        let text = String::from_utf8(formatted)
            .map_err(|_| CliError::NotUtf8 { path: args.file.clone() })?;
        print!("{text}");
    }

    Ok(())
}
