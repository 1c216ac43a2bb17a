// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! pktdump-inspect - List packet layouts discovered in a dump file
//!
//! Reads a discovery dump and shows which opcodes have been recorded,
//! so a developer can pick entries to promote into typed decoders.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use pktdump_registry::config::DEFAULT_DUMP_PATH;
use pktdump_registry::{parse_dump, DumpState, PacketRecord};

/// List packet layouts discovered in a dump file
#[derive(Parser, Debug)]
#[command(name = "pktdump-inspect")]
#[command(version = "0.1.0")]
#[command(about = "List packet layouts discovered in a dump file")]
struct Args {
    /// Dump file to inspect
    #[arg(default_value = DEFAULT_DUMP_PATH)]
    file: PathBuf,

    /// Output format: pretty, json
    #[arg(short, long, default_value = "pretty")]
    format: OutputFormat,

    /// Only show the record for this opcode
    #[arg(short, long)]
    opcode: Option<i16>,

    /// Show full record bodies in pretty output
    #[arg(short, long)]
    bodies: bool,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "p" => Ok(OutputFormat::Pretty),
            "json" | "j" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;
    let mut state =
        parse_dump(&content).with_context(|| format!("cannot parse {}", args.file.display()))?;

    if let Some(opcode) = args.opcode {
        state.records.retain(|r| r.opcode == opcode);
    }

    match args.format {
        OutputFormat::Pretty => print_pretty(args, &state),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&state.records)?),
    }

    Ok(())
}

fn print_pretty(args: &Args, state: &DumpState) {
    if state.records.is_empty() {
        println!("{}: no discovered packets", args.file.display());
        return;
    }

    println!(
        "{}: {} discovered packet(s)\n",
        args.file.display(),
        state.records.len()
    );

    for record in &state.records {
        let fields = field_count(record);
        println!(
            "  {} {:<6} {:<32} {} field(s)",
            "opcode".dimmed(),
            record.opcode.to_string().cyan(),
            type_name(record).bold(),
            fields
        );
        if args.bodies {
            for line in record.body.lines() {
                println!("      {}", line);
            }
            println!();
        }
    }
}

/// Message name from the record body's opening `type <Name> struct {` line.
fn type_name(record: &PacketRecord) -> &str {
    record
        .body
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("type "))
        .and_then(|line| line.strip_suffix(" struct {"))
        .unwrap_or("<unnamed>")
}

/// Number of field declaration lines between the braces.
fn field_count(record: &PacketRecord) -> usize {
    record.body.lines().count().saturating_sub(2)
}
