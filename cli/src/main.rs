// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gambit CLI - play and inspect boards from the terminal
//!
//! This binary loads a board configuration (the standard 8x8 layout unless
//! `--config` is given), and either prints it, lists what a piece can do,
//! or applies a sequence of moves.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use gambit_cli::notation::{format_tile, parse_ply, parse_tile, Ply};
use gambit_cli::render;
use gambit_core::{Board, BoardConfig, GameSession, PieceFactory};
use std::io::BufRead;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "gambit", about = "Chess-like board engine", version)]
struct Args {
    /// Board configuration file (JSON); defaults to the standard layout
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the board
    Show,
    /// List the moves and captures of the piece on a tile
    Moves {
        /// Tile such as `e7`
        tile: String,
    },
    /// Apply moves such as `e7e5` or `d1xh5`; reads stdin when none are given
    Play {
        moves: Vec<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => BoardConfig::load_from_file(path)
            .with_context(|| format!("Failed to load board configuration {}", path.display()))?,
        None => BoardConfig::standard(),
    };
    let board = Board::new(config, &PieceFactory::standard())?;

    match args.command {
        Command::Show => {
            println!("{}", render::render_board(&board));
        }
        Command::Moves { tile } => show_moves(&board, &tile)?,
        Command::Play { moves } => play(board, moves)?,
    }

    Ok(())
}

fn show_moves(board: &Board, tile: &str) -> Result<()> {
    let pos = parse_tile(tile)?;
    let piece = board
        .at(pos)
        .ok_or_else(|| anyhow!("No piece on {}", format_tile(pos)))?;

    println!("{}", render::render_with_marks(board, piece.trajectory()));
    println!("{} {} on {}", piece.suit(), piece.kind(), format_tile(pos));

    let moves: Vec<String> = piece.trajectory().iter().map(|t| format_tile(*t)).collect();
    println!("Moves: {}", if moves.is_empty() { "none".to_string() } else { moves.join(" ") });

    let captures: Vec<String> = board
        .captures_for(pos)
        .into_iter()
        .filter_map(|entry| {
            let victim = board.position_of(entry.piece).and_then(|at| board.at(at))?;
            Some(format!("{}x{} ({})", format_tile(pos), format_tile(entry.tile), victim.kind()))
        })
        .collect();
    println!(
        "Captures: {}",
        if captures.is_empty() { "none".to_string() } else { captures.join(" ") }
    );
    Ok(())
}

fn play(board: Board, moves: Vec<String>) -> Result<()> {
    let session = GameSession::new(board);
    info!(session = %session.id(), "Starting game");

    if !moves.is_empty() {
        for input in &moves {
            apply(&session, input)?;
        }
        session.read(|board| println!("{}", render::render_board(board)));
        return Ok(());
    }

    session.read(|board| println!("{}", render::render_board(board)));
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "quit" {
            break;
        }
        match apply(&session, input) {
            Ok(()) => session.read(|board| println!("{}", render::render_board(board))),
            Err(e) => eprintln!("Error: {e:#}"),
        }
    }
    Ok(())
}

/// Apply one move or capture to the session
fn apply(session: &GameSession, input: &str) -> Result<()> {
    let ply = parse_ply(input)?;
    debug!(?ply, "Applying");

    let accepted = match ply {
        Ply::Move { from, to } => session.move_piece(from, to),
        Ply::Capture { from, to } => {
            let entry = session.read(|board| {
                board
                    .captures_for(from)
                    .into_iter()
                    .find(|entry| entry.tile == to)
            });
            match entry {
                Some(entry) => session.capture(from, entry),
                None => false,
            }
        }
    };

    if !accepted {
        bail!("Illegal move: {input}");
    }
    Ok(())
}
