//! The `lessonkit play` command.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use lessonkit_core::config::load_config_from;
use lessonkit_core::game::{GameSession, Outcome, SequenceGame};
use lessonkit_core::model::Catalog;
use lessonkit_core::parser;
use lessonkit_core::traits::FnNotifier;

pub fn execute(
    sequence: String,
    order: Option<String>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let catalog = find_catalog(&sequence, config_path)?;

    let notifier = FnNotifier(|session: &GameSession| {
        println!(
            "Correct! \"{}\" solved in {} attempt(s).",
            session.catalog().name,
            session.attempts()
        );
    });
    let mut game = SequenceGame::with_notifier(catalog, Box::new(notifier));
    if let Some(seed) = seed {
        game.reshuffle_with(&mut StdRng::seed_from_u64(seed));
    }

    match order {
        Some(order) => submit_order(&mut game, &order),
        None => {
            let stdin = io::stdin();
            play_interactive(&mut game, stdin.lock())
        }
    }
}

/// `sequence` is either a file path or the id of a catalog in the
/// configured sequences directory.
fn find_catalog(sequence: &str, config_path: Option<PathBuf>) -> Result<Catalog> {
    let path = Path::new(sequence);
    if path.is_file() {
        return parser::parse_catalog(path);
    }

    let config = load_config_from(config_path.as_deref())?;
    anyhow::ensure!(
        config.sequences_dir.is_dir(),
        "no sequence file '{sequence}' and sequences directory {} not found",
        config.sequences_dir.display()
    );

    parser::load_catalog_directory(&config.sequences_dir)?
        .into_iter()
        .find(|c| c.id == sequence)
        .with_context(|| {
            format!(
                "no sequence '{sequence}' in {}",
                config.sequences_dir.display()
            )
        })
}

/// Place every id in `order` and evaluate once.
fn submit_order(game: &mut SequenceGame, order: &str) -> Result<()> {
    let ids: Vec<&str> = order
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    anyhow::ensure!(!ids.is_empty(), "--order must list at least one stage id");

    for id in ids {
        game.place(id)?;
    }

    match game.evaluate()? {
        Outcome::Correct => Ok(()),
        outcome => {
            print_placed(game.session());
            if let Some(i) = game.session().first_misplaced() {
                println!("Incorrect: position {} is out of order.", i + 1);
            }
            tracing::debug!("submission was {outcome}");
            std::process::exit(1);
        }
    }
}

fn play_interactive(game: &mut SequenceGame, input: impl BufRead) -> Result<()> {
    println!("{}", game.catalog().name);
    if !game.catalog().description.is_empty() {
        println!("{}", game.catalog().description);
    }
    print_help();
    print_state(game.session());

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };
        let arg = parts.next();

        let result = match (command, arg) {
            ("place" | "p", Some(id)) => game.place(id).map(|_| ()),
            ("remove" | "r", Some(position)) => match position.parse::<usize>() {
                Ok(n) if n >= 1 => game.unplace(n - 1).map(|_| ()),
                _ => {
                    println!(
                        "  remove takes a position from 1 to {}",
                        game.session().placed().len()
                    );
                    continue;
                }
            },
            ("submit" | "s", None) => game.evaluate().map(|outcome| {
                if outcome == Outcome::Incorrect {
                    match game.session().first_misplaced() {
                        Some(i) => println!("Incorrect: position {} is out of order.", i + 1),
                        None => println!("Incorrect."),
                    }
                }
            }),
            ("reset", None) => {
                game.reset();
                Ok(())
            }
            ("show", None) => Ok(()),
            ("help" | "h", None) => {
                print_help();
                continue;
            }
            ("quit" | "q", None) => break,
            _ => {
                println!("  unknown command: {line}");
                continue;
            }
        };

        if let Err(e) = result {
            println!("  {e}");
        }
        print_state(game.session());
        io::stdout().flush()?;
    }

    Ok(())
}

fn print_help() {
    println!("Commands: place <id>, remove <position>, submit, reset, show, help, quit");
}

fn print_state(session: &GameSession) {
    let (placed, total) = session.progress();
    println!();
    println!("Available:");
    for stage in session.pool() {
        println!("  [{}] {}", stage.id, stage.text);
    }
    print_placed(session);
    println!("Placed {placed}/{total} ({})", session.outcome());
}

fn print_placed(session: &GameSession) {
    println!("Your order:");
    for (i, stage) in session.placed().iter().enumerate() {
        println!("  {}. [{}] {}", i + 1, stage.id, stage.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lessonkit_core::model::Stage;

    fn game() -> SequenceGame {
        let catalog = Catalog::new(
            "abc",
            "ABC",
            vec![
                Stage::new("a", "First", 1),
                Stage::new("b", "Second", 2),
                Stage::new("c", "Third", 3),
            ],
        )
        .unwrap();
        SequenceGame::new(catalog)
    }

    #[test]
    fn interactive_session_reaches_correct() {
        let mut game = game();
        let input = "place b\nplace a\nplace c\nsubmit\nremove 1\nremove 2\nplace b\nplace c\nsubmit\nquit\nplace a\n";
        play_interactive(&mut game, input.as_bytes()).unwrap();
        assert_eq!(game.session().outcome(), Outcome::Correct);
        assert_eq!(game.session().attempts(), 2);
    }

    #[test]
    fn interactive_errors_do_not_end_session() {
        let mut game = game();
        let input = "place z\nremove 0\nremove x\nsubmit\nbogus\nplace a\n";
        play_interactive(&mut game, input.as_bytes()).unwrap();
        assert_eq!(game.session().progress(), (1, 3));
        assert_eq!(game.session().outcome(), Outcome::InProgress);
    }
}
