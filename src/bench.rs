use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Instant,
};

use crate::config::Config;
use crate::search::{BfsSolver, IddfsSolver, Solver};
use crate::state::{StateRef, solution_depth};

pub const BFS_SEQ: u8 = 1;
pub const BFS_PAR: u8 = 2;
pub const IDDFS_SEQ: u8 = 4;
pub const IDDFS_PAR: u8 = 8;
pub const ALL_ALGORITHMS: u8 = BFS_SEQ | BFS_PAR | IDDFS_SEQ | IDDFS_PAR;

pub struct AlgorithmResult {
    pub name: &'static str,
    pub elapsed_secs: f64,
    pub solution: Option<StateRef>,
}

/// Thin timing wrapper around the four solver variants. Selection is a
/// bitmask; the exit flag is only consulted between runs, a running solver
/// is never interrupted.
pub struct Benchmark<'a> {
    initial_state: StateRef,
    algorithm_mask: u8,
    config: &'a Config,
    exit_flag: &'a AtomicBool,
    results: Vec<AlgorithmResult>,
}

impl<'a> Benchmark<'a> {
    #[must_use]
    pub const fn new(
        initial_state: StateRef,
        algorithm_mask: u8,
        config: &'a Config,
        exit_flag: &'a AtomicBool,
    ) -> Self {
        Self {
            initial_state,
            algorithm_mask,
            config,
            exit_flag,
            results: Vec::new(),
        }
    }

    pub fn solve(&mut self) {
        for algorithm in [BFS_SEQ, BFS_PAR, IDDFS_SEQ, IDDFS_PAR] {
            if self.algorithm_mask & algorithm == 0 {
                continue;
            }
            if self.exit_flag.load(Ordering::SeqCst) {
                println!("Exit requested, skipping remaining algorithms.");
                break;
            }
            let result = self.run_algorithm(algorithm);
            self.results.push(result);
        }
        self.print_results();
    }

    #[must_use]
    pub fn results(&self) -> &[AlgorithmResult] {
        &self.results
    }

    fn run_algorithm(&self, algorithm: u8) -> AlgorithmResult {
        let name = algorithm_name(algorithm);
        println!("Running {name}...");
        let root = Arc::clone(&self.initial_state);
        let start_time = Instant::now();
        let solution = match algorithm {
            BFS_SEQ => BfsSolver::new(root).solve_seq(),
            BFS_PAR => {
                BfsSolver::with_threads(root, self.config.effective_num_threads()).solve_par()
            }
            IDDFS_SEQ => self.iddfs_solver(root).solve_seq(),
            _ => self.iddfs_solver(root).solve_par(),
        };
        AlgorithmResult {
            name,
            elapsed_secs: start_time.elapsed().as_secs_f64(),
            solution,
        }
    }

    fn iddfs_solver(&self, root: StateRef) -> IddfsSolver {
        let mut solver = IddfsSolver::new(root).with_spawn_threshold(self.config.spawn_threshold);
        if let Some(ceiling) = self.config.iddfs_depth_ceiling {
            solver = solver.with_depth_ceiling(ceiling);
        }
        solver
    }

    fn print_results(&self) {
        println!("\nResults:");
        println!("--------------------");
        for result in &self.results {
            match &result.solution {
                Some(solution) => println!(
                    "{}: Solution found in {:.6} seconds (depth {}).",
                    result.name,
                    result.elapsed_secs,
                    solution_depth(solution)
                ),
                None => println!(
                    "{}: Solution not found. Time: {:.6} seconds.",
                    result.name, result.elapsed_secs
                ),
            }
        }
        println!("--------------------");
    }
}

const fn algorithm_name(algorithm: u8) -> &'static str {
    match algorithm {
        BFS_SEQ => "BFS (Sequential)",
        BFS_PAR => "BFS (Parallel)",
        IDDFS_SEQ => "IDDFS (Sequential)",
        _ => "IDDFS (Parallel)",
    }
}
