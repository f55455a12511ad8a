//! CLI tool for validating, rendering, and inspecting slide deck sources.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use deck_core::{HtmlRenderer, MarkupParser};
use deck_regions::{tokenize, tokenize_areas, RegionRegistry, Token};
use serde_json::Value;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Validate, render, and inspect slide deck sources.
#[derive(Parser, Debug)]
#[command(name = "deck")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a slide description and print its document tree as JSON
    Parse {
        /// Slide description (.json)
        input: PathBuf,
    },

    /// Render a slide description to an HTML fragment
    Render {
        /// Slide description (.json)
        input: PathBuf,

        /// Validate first and render the document tree
        #[arg(short, long)]
        typed: bool,

        /// Wrap each slide in a <section> element
        #[arg(short, long)]
        sections: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Tokenize editor text and print the tagged regions as JSON
    Regions {
        /// Editor text file
        input: PathBuf,

        /// Extract whole areas with the bulk recognizer instead
        #[arg(short, long)]
        areas: bool,
    },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match &args.command {
        Command::Parse { input } => parse(input),
        Command::Render {
            input,
            typed,
            sections,
            output,
        } => {
            let renderer = HtmlRenderer::new().with_slide_wrapper(*sections);
            render(input, *typed, &renderer, output.as_deref())
        }
        Command::Regions { input, areas } => regions(input, *areas),
    }
}

/// Validate a description, printing the tree or the error report.
fn parse(input: &Path) -> Result<ExitCode> {
    let value = read_json(input)?;

    match MarkupParser::new().parse(&value) {
        Ok(presentation) => {
            log::debug!("{} slides", presentation.slide_count());
            println!("{}", serde_json::to_string_pretty(&presentation)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Render a description to HTML.
fn render(
    input: &Path,
    typed: bool,
    renderer: &HtmlRenderer,
    output: Option<&Path>,
) -> Result<ExitCode> {
    let value = read_json(input)?;

    let html = if typed {
        match MarkupParser::new().parse(&value) {
            Ok(presentation) => renderer.render_presentation(&presentation),
            Err(report) => {
                for error in &report.errors {
                    eprintln!("{}: {}", input.display(), error);
                }
                return Ok(ExitCode::FAILURE);
            }
        }
    } else {
        renderer.render(&value)
    };

    match output {
        Some(path) => {
            write_output(path, &html)?;
            log::debug!("Written to: {}", path.display());
        }
        None => println!("{}", html),
    }

    Ok(ExitCode::SUCCESS)
}

/// Print the regions found in editor text.
fn regions(input: &Path, areas: bool) -> Result<ExitCode> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let json = if areas {
        serde_json::to_string_pretty(&tokenize_areas(&text))?
    } else {
        let tokens = tokenize(&text);
        let (literals, tags) = count_tokens(&tokens);
        log::debug!("{} literal runs, {} tags", literals, tags);
        let registry = RegionRegistry::from_tokens(&tokens);
        serde_json::to_string_pretty(registry.areas())?
    };
    println!("{}", json);

    Ok(ExitCode::SUCCESS)
}

/// Count literal runs and tag tokens.
fn count_tokens(tokens: &[Token]) -> (usize, usize) {
    let literals = tokens.iter().filter(|token| token.is_literal()).count();
    (literals, tokens.len() - literals)
}

/// Read and deserialize a UTF-8 JSON file.
fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
