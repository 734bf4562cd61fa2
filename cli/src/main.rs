//! Command line driver for the depth-first maze walker.
//!
//! Reads a maze as text (`x` start, `.` open ground, `#` wall, `$` goal) or
//! as a thresholded bitmap, walks it turn by turn, and prints the walked
//! path or an unreachable verdict.

mod exit_codes;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, ensure, Context};
use clap::Parser;
use traverse::{util, Cell, Maze, Point, SolveState, Solver};

#[derive(Parser, Debug)]
#[command(
    name = "traverse",
    version,
    about = "Depth-first backtracking maze walker"
)]
struct Cli {
    /// Maze file to solve; reads standard input when omitted.
    maze: Option<PathBuf>,

    /// Treat the input as a bitmap image instead of text.
    #[arg(long)]
    image: bool,

    /// Start cell as `x,y`; required when the maze has no `x` marker.
    #[arg(long)]
    start: Option<Point>,

    /// Goal cell as `x,y`; required when the maze has no `$` marker.
    #[arg(long)]
    goal: Option<Point>,

    /// Scale the maze up by this factor before walking it.
    #[arg(long)]
    scale: Option<usize>,

    /// Print the maze with the walker's position after every turn.
    #[arg(long)]
    watch: bool,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,

    /// Give up once the walker has spent this many turns.
    #[arg(long)]
    max_turns: Option<usize>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: &Cli) -> Result<i32, anyhow::Error> {
    let mut maze = load_maze(cli)?;

    let mut start = match cli.start {
        Some(start) => start,
        None => maze
            .find(Cell::Start)
            .context("maze has no start marker, pass --start")?,
    };
    let mut goal = match cli.goal {
        Some(goal) => goal,
        None => maze
            .find(Cell::Goal)
            .context("maze has no goal marker, pass --goal")?,
    };

    check_cell(&maze, start, "start")?;
    check_cell(&maze, goal, "goal")?;

    // Stamp flag-provided markers into the grid so rendered output shows
    // them; marker-derived positions already have theirs.
    if cli.start.is_some() {
        maze.cells[start.y][start.x] = Cell::Start;
    }
    if cli.goal.is_some() {
        maze.cells[goal.y][goal.x] = Cell::Goal;
    }

    if let Some(factor) = cli.scale {
        ensure!(factor >= 1, "--scale must be at least 1");
        maze.scale_up(factor);
        start.x *= factor;
        start.y *= factor;
        goal.x *= factor;
        goal.y *= factor;
    }

    log::info!(
        "walking a {}x{} maze from ({}, {}) to ({}, {})",
        maze.width,
        maze.height,
        start.x,
        start.y,
        goal.x,
        goal.y
    );

    let mut solver = Solver::new(start, goal);
    loop {
        match solver.step(&maze) {
            SolveState::Walking => {
                let at = solver.walker().position();
                log::debug!("turn {}: walker at ({}, {})", solver.turns(), at.x, at.y);
                if cli.watch {
                    println!("turn {}", solver.turns());
                    print!("{}", util::render_position(&maze, at));
                    println!();
                }
                if let Some(limit) = cli.max_turns {
                    if solver.turns() >= limit {
                        bail!("gave up after {} turns", solver.turns());
                    }
                }
            }
            SolveState::Unreachable => {
                log::info!("goal unreachable after {} turns", solver.turns());
                eprintln!("goal is unreachable from the start");
                return Ok(exit_codes::UNREACHABLE);
            }
            SolveState::Solved(result) => {
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    print!("{}", util::render_footprints(&maze, &result.footprints));
                    let moves = result
                        .path
                        .iter()
                        .map(|direction| direction.to_string())
                        .collect::<Vec<_>>()
                        .join(" ");
                    println!(
                        "solved in {} turns, {} moves: {}",
                        result.turns,
                        result.path.len(),
                        moves
                    );
                }
                return Ok(exit_codes::SOLVED);
            }
        }
    }
}

fn load_maze(cli: &Cli) -> Result<Maze, anyhow::Error> {
    let bytes = match &cli.maze {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("could not read {}", path.display()))?
        }
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("could not read standard input")?;
            bytes
        }
    };

    if cli.image {
        let img = image::load_from_memory(&bytes).context("could not decode the maze image")?;
        util::parse_img(&img)
    } else {
        let text = String::from_utf8(bytes).context("maze text is not valid UTF-8")?;
        text.parse()
    }
}

fn check_cell(maze: &Maze, point: Point, what: &str) -> Result<(), anyhow::Error> {
    ensure!(
        maze.in_bounds(point),
        "{} ({}, {}) is outside the {}x{} maze",
        what,
        point.x,
        point.y,
        maze.width,
        maze.height
    );
    ensure!(
        maze.cells[point.y][point.x].is_passable(),
        "{} ({}, {}) is a wall",
        what,
        point.x,
        point.y
    );

    Ok(())
}
