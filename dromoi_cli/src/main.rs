// CLI entry point for the dromoi explorer.
//
// Thin front end over `dromoi_theory`: parses arguments, loads the optional
// config file and scale registry, runs one command and prints the result as
// text (see `render.rs`) or, with `--json`, as pretty-printed JSON. All
// command logic lives in `execute`, which returns the output string so tests
// can drive it without a process.
//
// Usage:
//   dromoi [OPTIONS] <COMMAND>
//     notes                          List the twelve pitch classes
//     scales [--tonic <NOTE>]        Every scale at one tonic
//     show <NAME> [--tonic <NOTE>]   One scale with chord table and variants
//     find <NOTE>...                 Scales containing the given seven notes
//     transpose <CHORD> <FROM> <TO>  Move a chord symbol between tonics
//     chord <CHORD>                  Notes of a chord symbol
//   Options:
//     --config <PATH>   JSON config file (env: DROMOI_CONFIG)
//     --names           Print Greek note names instead of letters
//     --json            Print JSON instead of text
//
// Logging goes to stderr through `env_logger`; `RUST_LOG` overrides the
// default `warn` filter.

mod config;
mod render;

use std::path::PathBuf;

use anyhow::{anyhow, bail};
use clap::{Parser, Subcommand};
use dromoi_theory::pitch::parse_selection;
use dromoi_theory::scale::STEPS_PER_SCALE;
use dromoi_theory::{ChordSymbol, PitchClass, Scale, ScaleFinder, ScaleRegistry, TheoryError};
use serde::Serialize;

use config::ExplorerConfig;

#[derive(Debug, Parser)]
#[command(name = "dromoi", version, about = "Explore traditional Greek dromoi")]
struct Cli {
    /// JSON config file.
    #[arg(long, env = "DROMOI_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Print Greek note names (Ντο, Ρε, ...) instead of letters.
    #[arg(long, global = true)]
    names: bool,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the twelve pitch classes.
    Notes,
    /// List every scale at one tonic.
    Scales {
        #[arg(short, long)]
        tonic: Option<String>,
    },
    /// Show one scale with its chord table and variants.
    Show {
        name: String,
        #[arg(short, long)]
        tonic: Option<String>,
    },
    /// Find the scales that contain seven given notes. Repeated notes count
    /// once.
    Find {
        #[arg(required = true)]
        notes: Vec<String>,
    },
    /// Transpose a chord symbol from one tonic to another.
    Transpose {
        chord: String,
        from: String,
        to: String,
    },
    /// List the notes of a chord symbol.
    Chord { chord: String },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "warn"))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Σφάλμα: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => ExplorerConfig::load(path)?,
        None => ExplorerConfig::default(),
    };
    let registry = config.registry()?;
    let output = execute(cli, &config, &registry)?;
    println!("{output}");
    Ok(())
}

/// Run one command and return what should be printed.
fn execute(cli: &Cli, config: &ExplorerConfig, registry: &ScaleRegistry) -> anyhow::Result<String> {
    let names = cli.names || config.show_note_names;

    match &cli.command {
        Command::Notes => {
            if cli.json {
                to_json(&PitchClass::ALL)
            } else {
                Ok(render::catalog())
            }
        }
        Command::Scales { tonic } => {
            let tonic = resolve_tonic(tonic.as_deref(), config)?;
            let scales = Scale::get_all(registry, tonic)?;
            log::debug!("{} scales at {tonic}", scales.len());
            if cli.json {
                to_json(&scales)
            } else {
                Ok(render::scale_list(&scales, names))
            }
        }
        Command::Show { name, tonic } => {
            let tonic = resolve_tonic(tonic.as_deref(), config)?;
            let template = registry
                .template(name)
                .ok_or_else(|| anyhow!("unknown scale {name:?}"))?;
            let scale = template.instantiate(tonic)?;
            if cli.json {
                to_json(&scale)
            } else {
                Ok(render::scale_detail(&scale, names))
            }
        }
        Command::Find { notes } => {
            let selection = parse_selection(notes)?;
            if selection.len() > STEPS_PER_SCALE {
                bail!(
                    "at most {STEPS_PER_SCALE} distinct notes can be selected, got {}",
                    selection.len()
                );
            }
            let results = ScaleFinder::new(registry).find_scales(&selection);
            if cli.json {
                to_json(&results)
            } else {
                Ok(render::find_results(selection.len(), &results, names))
            }
        }
        Command::Transpose { chord, from, to } => {
            let transposed = dromoi_theory::chord::transpose(chord, from, to)?;
            if cli.json {
                to_json(&serde_json::json!({ "chord": transposed }))
            } else {
                Ok(transposed)
            }
        }
        Command::Chord { chord } => {
            let symbol = ChordSymbol::parse(chord)?;
            if cli.json {
                to_json(&serde_json::json!({ "chord": symbol, "notes": symbol.notes() }))
            } else {
                Ok(render::chord(&symbol, names))
            }
        }
    }
}

/// `--tonic` if given, else the configured default. A bad spelling here is
/// reported as an invalid tonic rather than an invalid note.
fn resolve_tonic(arg: Option<&str>, config: &ExplorerConfig) -> Result<PitchClass, TheoryError> {
    match arg {
        Some(spelling) => PitchClass::parse(spelling)
            .map_err(|_| TheoryError::InvalidTonic(spelling.to_string())),
        None => Ok(config.default_tonic),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
