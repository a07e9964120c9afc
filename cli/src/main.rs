use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};
use tilesweep_core::*;

mod input;
mod render;

use input::{Command, parse_command};
use render::{render_board, render_status};

#[derive(Parser, Debug)]
#[command(version, about = "Terminal mine-clearing puzzle", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board side, the board is side x side
    #[arg(long, default_value_t = DEFAULT_SIDE)]
    side: Coord,

    /// Number of mines
    #[arg(long, default_value_t = DEFAULT_MINES)]
    mines: CellCount,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Lose once this many seconds have passed since the first move
    #[arg(long)]
    time_limit: Option<u64>,

    /// Print the final state as JSON
    #[arg(long)]
    json: bool,

    /// Cells to select in order, plays non-interactively when given
    moves: Vec<usize>,
}

#[derive(Serialize)]
struct Report<'a> {
    seed: u64,
    phase: GamePhase,
    end_cause: Option<EndCause>,
    score: CellCount,
    remaining_safe_cells: CellCount,
    board: &'a BoardSnapshot,
}

/// Session plus the clock that may force a loss.
struct Match {
    game: GameSession,
    seed: u64,
    time_limit: Option<Duration>,
    started_at: Option<Instant>,
}

impl Match {
    fn new(args: &Args, seed: u64) -> anyhow::Result<Self> {
        let game = GameSession::new(args.side, args.mines, seed)
            .with_context(|| format!("Could not start a {0}x{0} game with {1} mines", args.side, args.mines))?;
        log::info!("New game, seed: {}", seed);
        Ok(Self {
            game,
            seed,
            time_limit: args.time_limit.map(Duration::from_secs),
            started_at: None,
        })
    }

    fn play(&mut self, index: usize) -> SelectOutcome {
        if self.out_of_time() {
            log::info!("Time is up");
            return self.game.expire();
        }
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
        let outcome = self.game.select(index);
        log::debug!(
            "Selected {}, {} cells changed, phase: {:?}",
            index,
            outcome.changed.len(),
            outcome.phase
        );
        outcome
    }

    fn out_of_time(&self) -> bool {
        match (self.time_limit, self.started_at) {
            (Some(limit), Some(started_at)) => started_at.elapsed() >= limit,
            _ => false,
        }
    }

    fn report(&self) -> anyhow::Result<String> {
        let snapshot = self.game.snapshot();
        let report = Report {
            seed: self.seed,
            phase: self.game.phase(),
            end_cause: self.game.end_cause(),
            score: self.game.score(),
            remaining_safe_cells: self.game.remaining_safe_cells(),
            board: &snapshot,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    log::debug!("args: {:?}", args);

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut current = Match::new(&args, seed)?;

    let interactive = args.moves.is_empty();
    if interactive {
        play_interactive(&args, &mut current, io::stdin().lock(), &mut io::stdout())?;
    } else {
        for &index in &args.moves {
            if current.play(index).phase.is_finished() {
                break;
            }
        }
    }

    if args.json {
        println!("{}", current.report()?);
    } else if !interactive {
        print!("{}", render_board(&current.game.snapshot()));
        println!("{}", render_status(&current.game));
    }
    Ok(())
}

fn play_interactive(
    args: &Args,
    current: &mut Match,
    input: impl BufRead,
    stdout: &mut impl Write,
) -> anyhow::Result<()> {
    let mut lines = input.lines();

    print_help(stdout)?;
    loop {
        write!(stdout, "{}> ", render_board(&current.game.snapshot()))?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("Could not read input")?;

        match parse_command(&line, current.game.config().side) {
            Ok(Command::Select(_)) if current.game.is_finished() => {
                writeln!(stdout, "{}", render_status(&current.game))?;
                writeln!(stdout, "Game over, n starts a new game")?;
            }
            Ok(Command::Select(index)) => {
                let outcome = current.play(index);
                if !outcome.has_update() && !outcome.phase.is_finished() {
                    writeln!(stdout, "Nothing to reveal at {index}")?;
                }
                writeln!(stdout, "{}", render_status(&current.game))?;
            }
            Ok(Command::NewGame) => {
                *current = Match::new(args, rand::random())?;
            }
            Ok(Command::Quit) => return Ok(()),
            Ok(Command::Help) => print_help(stdout)?,
            Err(err) => {
                log::debug!("Bad input {:?}: {:#}", line, err);
                writeln!(stdout, "{err:#}")?;
            }
        }
    }
}

fn print_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Select a cell by index (e.g. 12) or by row and column (e.g. 1 4).")?;
    writeln!(out, "Commands: n = new game, q = quit, ? = help")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str], input: &str) -> (Match, String) {
        let args = Args::parse_from(args);
        let mut current = Match::new(&args, args.seed.unwrap_or_default()).unwrap();
        let mut out = Vec::new();
        play_interactive(&args, &mut current, input.as_bytes(), &mut out).unwrap();
        (current, String::from_utf8(out).unwrap())
    }

    #[test]
    fn new_game_after_loss_keeps_reading() {
        let game = GameSession::new(4, 3, 1).unwrap();
        let mine = game.board().mine_indices().next().unwrap();
        let input = format!("{mine}\n0\nn\nq\n");

        let (current, out) = run(&["tilesweep", "--side", "4", "--mines", "3", "--seed", "1"], &input);

        assert_eq!(out.matches("You lost.").count(), 2);
        assert!(out.contains("Game over, n starts a new game"));
        assert_eq!(current.game.phase(), GamePhase::Playing);
        assert_eq!(current.game.score(), 0);
        // initial board, after the loss, after the ignored select, after the new game
        assert_eq!(out.matches("> ").count(), 4);
    }

    #[test]
    fn end_of_input_stops_loop() {
        let (current, out) = run(&["tilesweep", "--side", "3", "--mines", "1", "--seed", "2"], "");

        assert_eq!(out.matches("> ").count(), 1);
        assert_eq!(current.game.score(), 0);
    }
}
