use std::{
    io::{self, Write},
    path::PathBuf,
    str::FromStr,
};

use crate::problem::{
    Cell, HanoiGenerator, LoaderError, MazeGenerator, MazeState, ProblemSpec, SatGenerator,
    save_problem,
};

fn prompt_line(message: &str) -> String {
    loop {
        print!("{message}");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                eprintln!("Input closed.");
                std::process::exit(1);
            }
            Ok(_) => return line.trim().to_owned(),
            Err(_) => println!("Failed to read input, try again."),
        }
    }
}

fn prompt_parse<T: FromStr>(message: &str) -> T {
    loop {
        let line = prompt_line(message);
        match line.parse() {
            Ok(value) => return value,
            Err(_) => println!("Invalid value, try again."),
        }
    }
}

fn render_maze(maze: &MazeState) {
    let grid = maze.grid();
    for y in 0..grid.height() {
        let mut row = String::with_capacity(grid.width());
        for x in 0..grid.width() {
            row.push(match grid.cell(x, y) {
                Cell::Wall => '#',
                Cell::Path => ' ',
                Cell::Start => 'S',
                Cell::Goal => 'G',
            });
        }
        println!("{row}");
    }
}

fn prompt_spec() -> Result<ProblemSpec, LoaderError> {
    let problem_type = prompt_line("Select problem type (maze, sat, hanoi): ");
    match problem_type.as_str() {
        "maze" => {
            let width = prompt_parse("Enter width (odd number >= 5): ");
            let height = prompt_parse("Enter height (odd number >= 5): ");
            let seed = prompt_parse("Enter seed: ");
            let mut generator = MazeGenerator::new(width, height, seed)?;
            render_maze(&generator.generate_maze());
            Ok(ProblemSpec::Maze {
                width,
                height,
                seed,
            })
        }
        "sat" => {
            let num_variables = prompt_parse("Enter number of variables (<= 32): ");
            let num_clauses = prompt_parse("Enter number of clauses: ");
            let max_literals_per_clause =
                prompt_parse("Enter maximum number of literals per clause: ");
            let seed = prompt_parse("Enter seed: ");
            let mut generator =
                SatGenerator::new(num_variables, num_clauses, max_literals_per_clause, seed)?;
            let state = generator.generate_sat();
            let problem = state.problem();
            println!(
                "SAT Problem (Number of variables: {}, Number of clauses: {})",
                problem.num_variables,
                problem.clauses.len()
            );
            println!("{problem}");
            Ok(ProblemSpec::Sat {
                num_variables,
                num_clauses,
                max_literals_per_clause,
                seed,
            })
        }
        "hanoi" => {
            let num_pegs = prompt_parse("Enter number of pegs (>= 3): ");
            let num_discs = prompt_parse("Enter number of discs (>= 1): ");
            let generator = HanoiGenerator::new(num_pegs, num_discs)?;
            println!("{}", generator.generate_hanoi());
            Ok(ProblemSpec::Hanoi {
                num_pegs,
                num_discs,
            })
        }
        other => {
            eprintln!("Unknown problem type: {other}");
            std::process::exit(1);
        }
    }
}

/// Interactive problem creation: prompt for a type and its parameters, show
/// the generated instance, and optionally save the description to a file.
pub fn generate_problem() -> Result<(), LoaderError> {
    let spec = prompt_spec()?;

    let answer = prompt_line("Save problem to file? (yes/no): ");
    if answer == "yes" {
        let filename: PathBuf = prompt_line("Enter filename: ").into();
        save_problem(&filename, &spec)?;
        println!("Problem saved to {}", filename.display());
    }
    Ok(())
}
