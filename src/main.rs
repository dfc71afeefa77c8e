use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::{
    env,
    path::PathBuf,
    process,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use statespace::{
    bench::{self, Benchmark},
    config::Config,
    problem::{HanoiGenerator, ProblemSpec, SatGenerator, load_problem},
    state::StateRef,
    ui,
};

#[derive(Default)]
struct CliArgs {
    maze: bool,
    sat: bool,
    hanoi: bool,
    file: Option<PathBuf>,
    generate: bool,
    parallel: bool,
    sequential: bool,
    bfs: bool,
    iddfs: bool,
    help: bool,
}

fn parse_arguments(args: &[String]) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--maze" | "-m" => parsed.maze = true,
            "--sat" | "-s" => parsed.sat = true,
            "--hanoi" | "-h" => parsed.hanoi = true,
            "--file" | "-f" => {
                let Some(filename) = iter.next() else {
                    return Err("Error: Missing filename after --file.".to_owned());
                };
                parsed.file = Some(PathBuf::from(filename));
            }
            "--generate" | "-g" => parsed.generate = true,
            "--parallel" | "-P" => parsed.parallel = true,
            "--sequential" | "-S" => parsed.sequential = true,
            "--bfs" => parsed.bfs = true,
            "--iddfs" => parsed.iddfs = true,
            "--help" | "-H" => parsed.help = true,
            other => return Err(format!("Error: Unknown argument: {other}")),
        }
    }

    let problem_count = usize::from(parsed.maze)
        + usize::from(parsed.sat)
        + usize::from(parsed.hanoi)
        + usize::from(parsed.file.is_some());
    if problem_count > 1 {
        return Err(
            "Error: Only one of --maze, --sat, --hanoi, or --file can be specified.".to_owned(),
        );
    }
    if problem_count == 0 && !parsed.generate {
        parsed.sat = true;
    }
    if parsed.generate
        && (parsed.parallel || parsed.sequential || parsed.bfs || parsed.iddfs)
    {
        return Err(
            "Error: --generate cannot be used with --parallel, --sequential, --bfs, or --iddfs."
                .to_owned(),
        );
    }
    if (parsed.bfs && parsed.iddfs) || (parsed.parallel && parsed.sequential) {
        return Err(
            "Error: --bfs cannot be used with --iddfs, and --parallel cannot be used with --sequential."
                .to_owned(),
        );
    }
    Ok(parsed)
}

fn print_help() {
    println!(
        "Usage: statespace [OPTIONS]\n\n\
         Options:\n\
         \x20 -m, --maze             Solve a maze problem (default: 69x69, seed 8)\n\
         \x20 -s, --sat              Solve a SAT problem (default: vars 14, clauses 9, literals per clause 4, seed 1)\n\
         \x20 -h, --hanoi            Solve a Hanoi Towers problem (default: pegs 3, discs 4)\n\
         \x20 -f, --file <filename>  Load problem from file\n\
         \x20 -g, --generate         Generate a problem and prompt for details\n\
         \x20 -P, --parallel         Run only parallel algorithms\n\
         \x20 -S, --sequential       Run only sequential algorithms\n\
         \x20     --bfs              Run only BFS algorithms\n\
         \x20     --iddfs            Run only IDDFS algorithms\n\
         \x20 -H, --help             Print this help message\n"
    );
}

fn algorithm_mask(args: &CliArgs) -> u8 {
    if args.parallel {
        if args.bfs {
            bench::BFS_PAR
        } else if args.iddfs {
            bench::IDDFS_PAR
        } else {
            bench::BFS_PAR | bench::IDDFS_PAR
        }
    } else if args.sequential {
        if args.bfs {
            bench::BFS_SEQ
        } else if args.iddfs {
            bench::IDDFS_SEQ
        } else {
            bench::BFS_SEQ | bench::IDDFS_SEQ
        }
    } else if args.bfs {
        bench::BFS_SEQ | bench::BFS_PAR
    } else if args.iddfs {
        bench::IDDFS_SEQ | bench::IDDFS_PAR
    } else {
        bench::ALL_ALGORITHMS
    }
}

fn initial_state(args: &CliArgs) -> Result<StateRef, Box<dyn std::error::Error>> {
    if let Some(filename) = &args.file {
        return Ok(load_problem(filename)?);
    }
    if args.maze {
        return Ok(ProblemSpec::Maze {
            width: 69,
            height: 69,
            seed: 8,
        }
        .build()?);
    }
    if args.hanoi {
        return Ok(HanoiGenerator::new(3, 4)?.generate_hanoi() as StateRef);
    }
    Ok(SatGenerator::new(14, 9, 4, 1)?.generate_sat() as StateRef)
}

fn benchmark_algorithms(
    args: &CliArgs,
    config: &Config,
    exit_flag: &AtomicBool,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = initial_state(args)?;
    if config.verbose {
        println!(
            "Threads: {}, spawn threshold: {}, depth ceiling: {}",
            config.effective_num_threads(),
            config.spawn_threshold,
            config
                .iddfs_depth_ceiling
                .map_or_else(|| "none".to_owned(), |ceiling| ceiling.to_string())
        );
    }
    let mut benchmark = Benchmark::new(state, algorithm_mask(args), config, exit_flag);
    benchmark.solve();
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let parsed = match parse_arguments(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{message}");
            process::exit(1);
        }
    };

    if parsed.help {
        print_help();
        return;
    }

    let exit_flag = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&exit_flag);
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
        println!("\nReceived Ctrl+C, finishing the current run...");
    })
    .expect("failed to install the Ctrl+C handler");

    let outcome = if parsed.generate {
        ui::generate_problem().map_err(Into::into)
    } else {
        let config = Config::load();
        benchmark_algorithms(&parsed, &config, &exit_flag)
    };

    if let Err(error) = outcome {
        eprintln!("{error}");
        process::exit(1);
    }
}
