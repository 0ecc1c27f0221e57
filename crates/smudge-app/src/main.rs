//! Command-line interface for the smudge keyboard cipher.
//!
//! # Usage
//!
//! Encode a phrase over the default QWERTY board:
//!
//! ```sh
//! smudge encode "the quick brown fox"
//! ```
//!
//! Produce three randomized candidates, reproducibly:
//!
//! ```sh
//! smudge encode --random --seed 42 --count 3 "hello"
//! ```
//!
//! Inspect a board's linking:
//!
//! ```sh
//! smudge draw --layout colemak --letter t
//! ```

use std::{path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand, ValueEnum};
use derive_more::{Display, Error, From};
use smudge_cipher::{EncodeOptions, Engine, Mode};
use smudge_core::{KeyGraph, LayoutError, LayoutSpec};
use smudge_layouts::LoadError;

mod draw;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Encode text by substituting keyboard neighbors.
    Encode(EncodeArgs),
    /// Draw a keyboard for manual inspection of the linking.
    Draw(DrawArgs),
    /// List the built-in layouts.
    Layouts,
}

/// Layout selection shared by the subcommands.
#[derive(Debug, Args)]
struct LayoutArgs {
    /// Built-in layout name.
    #[arg(long, value_name = "NAME", default_value = "qwerty")]
    layout: String,

    /// Load the layout from a file instead (one row per line).
    #[arg(long, value_name = "PATH", conflicts_with = "layout")]
    layout_file: Option<PathBuf>,

    /// Treat the loaded file as a physically mirrored layout.
    #[arg(long, requires = "layout_file")]
    reverse: bool,

    /// Expected distinct symbol count; 0 disables the check.
    #[arg(long, value_name = "COUNT", default_value_t = smudge_core::layout::LATIN_ALPHABET)]
    alphabet_check: usize,
}

#[derive(Debug, Args)]
struct EncodeArgs {
    #[command(flatten)]
    layout: LayoutArgs,

    /// Relation to substitute from.
    #[arg(long, value_enum, default_value = "reversible")]
    mode: ModeArg,

    /// Drop characters that are not in the layout.
    #[arg(long)]
    drop: bool,

    /// Shuffle each character's possibilities before selection.
    #[arg(long)]
    random: bool,

    /// Seed for --random; omit for fresh entropy per run.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Number of candidate rows to produce.
    #[arg(long, value_name = "N", default_value_t = 1)]
    count: usize,

    /// Base index into each possibility list.
    #[arg(long, value_name = "N", default_value_t = 0)]
    offset: usize,

    /// Per-position stride added to the selection index.
    #[arg(long, value_name = "N", default_value_t = 0)]
    stride: usize,

    /// The text to encode; multiple arguments are joined with spaces.
    #[arg(value_name = "TEXT", required = true, num_args = 1..)]
    text: Vec<String>,
}

#[derive(Debug, Args)]
struct DrawArgs {
    #[command(flatten)]
    layout: LayoutArgs,

    /// Also show the neighborhood and relations of these letters.
    #[arg(long, value_name = "CHAR", num_args = 1..)]
    letter: Vec<char>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Reversible,
    Encrypt,
    Decipher,
    Echo,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Reversible => Self::Reversible,
            ModeArg::Encrypt => Self::Encrypt,
            ModeArg::Decipher => Self::Decipher,
            ModeArg::Echo => Self::Echo,
        }
    }
}

#[derive(Debug, Display, Error, From)]
enum CliError {
    #[display("{_0}")]
    Layout(LayoutError),

    #[display("{_0}")]
    Load(LoadError),

    #[display("unknown layout '{name}'; try `smudge layouts`")]
    #[from(ignore)]
    UnknownLayout {
        #[error(ignore)]
        name: String,
    },
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    match run(&Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Encode(args) => encode(args),
        Command::Draw(args) => draw_board(args),
        Command::Layouts => {
            list_layouts();
            Ok(())
        }
    }
}

fn build_graph(args: &LayoutArgs) -> Result<KeyGraph, CliError> {
    let spec: LayoutSpec = if let Some(path) = &args.layout_file {
        smudge_layouts::from_path(path, args.reverse, args.alphabet_check)?
    } else {
        smudge_layouts::find(&args.layout)
            .ok_or_else(|| CliError::UnknownLayout {
                name: args.layout.clone(),
            })?
            .spec(args.alphabet_check)
    };
    let graph = KeyGraph::build(&spec)?;
    log::debug!(
        "built {}x{} grid with {} letters",
        graph.height(),
        graph.width(),
        graph.letter_count(),
    );
    Ok(graph)
}

fn encode(args: &EncodeArgs) -> Result<(), CliError> {
    let graph = build_graph(&args.layout)?;
    let engine = Engine::new(&graph);
    let options = EncodeOptions {
        drop_unknown: args.drop,
        mode: args.mode.into(),
        randomize: args.random,
        max_outputs: args.count,
        start_offset: args.offset,
        jump_stride: args.stride,
    };

    let text = args.text.join(" ");
    let rows = match args.seed {
        Some(seed) => engine.encode_text_seeded(&text, &options, seed),
        None => engine.encode_text(&text, &options),
    };

    let mut rows = rows.into_iter();
    if let Some(normalized) = rows.next() {
        println!("{normalized}");
    }
    for candidate in rows {
        println!("{candidate}");
    }
    Ok(())
}

fn draw_board(args: &DrawArgs) -> Result<(), CliError> {
    let graph = build_graph(&args.layout)?;
    print!("{}", draw::board(&graph));

    for &symbol in &args.letter {
        let symbol = symbol.to_lowercase().next().unwrap_or(symbol);
        println!();
        match (draw::letter(&graph, symbol), draw::relations(&graph, symbol)) {
            (Some(neighborhood), Some(relations)) => {
                print!("{neighborhood}");
                print!("{relations}");
            }
            _ => println!("'{symbol}' is not in this layout"),
        }
    }
    Ok(())
}

fn list_layouts() {
    for layout in smudge_layouts::BUILTIN {
        let mirrored = if layout.reverse { ", mirrored" } else { "" };
        println!(
            "{} ({} rows, width {}{mirrored})",
            layout.name,
            layout.height(),
            layout.width(),
        );
    }
}
