//! The terminal game loop.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use xiangqi_rules::collaborator::{fallback_rng, request_move, NoEngine};
use xiangqi_rules::config::{Config, Mode};
use xiangqi_rules::engine_bridge::UciEngine;
use xiangqi_rules::notation::move_from_notation;
use xiangqi_rules::{Game, GameError, Move};

const HELP: &str = "Commands: <move> (e.g. h2e2), moves, undo, new, fen, help, exit";

/// Runs the main game loop for the text-based UI.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let mut game = Game::new(config.starting_side);
    let mut engine = UciEngine::from_config(&config);
    let mut rng = fallback_rng(config.seed);
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    println!("--- Xiangqi ---");
    match &config.engine_path {
        Some(path) => println!("Engine: {}", path.display()),
        None => println!("No engine configured; the computer plays random legal moves."),
    }
    println!("{}", HELP);
    print_position(&game);

    loop {
        if !game.is_game_over() && config.is_engine_turn(game.side_to_move()) {
            let depth = config.search_depth;
            let chosen = match engine.as_mut() {
                Some(engine) => request_move(&game, engine, depth, &mut rng).await,
                None => request_move(&game, &mut NoEngine, depth, &mut rng).await,
            };
            let Some(mv) = chosen else {
                log::error!("no legal move for {} in a running game", game.side_to_move());
                break;
            };
            println!("Computer ({}) moves: {}", game.side_to_move(), mv);
            game.apply_move(mv).context("resolved engine move was rejected")?;
            print_position(&game);
            continue;
        }

        if game.is_game_over() {
            println!("{}. Type 'new' to play again or 'exit' to quit.", game.result_text());
        }
        print!("{} to move> ", game.side_to_move());
        io_flush();

        let Some(line) = input.next_line().await.context("failed to read stdin")? else {
            break;
        };
        match line.trim() {
            "" => continue,
            "exit" | "quit" => break,
            "help" => println!("{}", HELP),
            "fen" => println!("{}", game.fen()),
            "moves" => {
                let moves: Vec<String> = game.legal_moves().iter().map(Move::to_notation).collect();
                println!("{}", moves.join(" "));
            }
            "new" => {
                game.reset(config.starting_side);
                print_position(&game);
            }
            "undo" => {
                undo_turn(&mut game, &config);
                print_position(&game);
            }
            text => match play_text_move(&mut game, text) {
                Ok(()) => print_position(&game),
                Err(e) => println!("{}. {}", e, HELP),
            },
        }
    }
    Ok(())
}

/// Parses and plays a move typed by a person.
fn play_text_move(game: &mut Game, text: &str) -> Result<(), GameError> {
    let mv = move_from_notation(text)?;
    game.apply_move(mv)?;
    Ok(())
}

/// Takes back the last move, and against the engine also the engine's
/// reply so the person is to move again.
fn undo_turn(game: &mut Game, config: &Config) {
    if game.undo().is_none() {
        println!("Nothing to undo.");
        return;
    }
    if config.mode == Mode::HumanVsEngine && config.is_engine_turn(game.side_to_move()) {
        game.undo();
    }
}

fn print_position(game: &Game) {
    println!();
    print!("{}", game.board());
    println!("FEN: {}", game.fen());
    if let Some(mv) = game.last_move() {
        println!("Last move: {}", mv);
    }
    println!("Status: {}", game.result_text());
}

fn io_flush() {
    use std::io::Write;
    // A failed flush only delays the prompt.
    let _ = std::io::stdout().flush();
}
