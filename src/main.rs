//! TRON Vanity Address Generator CLI
//!
//! Usage:
//!   tron_vanity -m brute -p TAB            # Find an address starting with "TAB"
//!   tron_vanity -m brute -s 888 -n 3       # Find 3 addresses ending with "888"
//!   tron_vanity -m similar -a T...         # Keep finding closer look-alikes
//!   tron_vanity -m batch -n 1000 -o out.txt
//!   tron_vanity -m valuable -l 5

use std::process;
use std::sync::atomic::Ordering;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tron_vanity::report::{format_number, ProgressReporter};
use tron_vanity::{
    Config, ConsoleSink, FileSink, Mode, NullSink, ResultSink, SearchError, SearchGoal,
    WorkerPool,
};

fn main() {
    init_tracing();

    let config = Config::parse();

    // Validate configuration and build the goal before anything runs
    let goal = match config.search_goal() {
        Ok(goal) => goal,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Run with --help for usage.");
            process::exit(1);
        }
    };

    if let Err(e) = run(&config, goal) {
        tracing::error!(error = %e, "search aborted");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(config: &Config, goal: SearchGoal) -> Result<(), SearchError> {
    let sink: Box<dyn ResultSink> = match config.mode {
        Mode::Bench => Box::new(NullSink),
        Mode::Batch => Box::new(FileSink::open(&config.output)?),
        _ => Box::new(ConsoleSink::new()),
    };

    // Print startup info
    println!("TRON Vanity Address Generator");
    println!("=============================");
    println!("This tool never touches the network; running it offline is still recommended.");
    println!("Mode:       {}", config.mode);
    println!("Pattern:    {}", goal.pattern);
    println!("Difficulty: {}", goal.pattern.difficulty_description());
    println!("Workers:    {}", config.worker_count());
    match config.mode {
        Mode::Bench => println!("Target:     {} keys", config.bench_count),
        Mode::Batch => println!(
            "Target:     {} address(es) -> {}",
            config.count,
            config.output.display()
        ),
        Mode::Similar => println!("Target:     until stopped"),
        _ => println!("Target:     {} address(es)", config.count),
    }
    println!();

    let pool = WorkerPool::new(config.worker_count(), goal, sink)?;

    // Set up ctrl-c handler
    let stop_flag = pool.stop_flag_clone();
    ctrlc::set_handler(move || {
        stop_flag.store(true, Ordering::Relaxed);
    })?;

    let reporter = ProgressReporter::spawn(pool.state(), Duration::from_secs(config.interval))
        .map_err(SearchError::Spawn)?;

    println!("Searching... (Press Ctrl+C to stop)\n");

    let summary = pool.join();
    if let Some(reporter) = reporter {
        reporter.stop();
    }
    let summary = summary?;

    // Print final stats
    println!("\n--- Final Statistics ---");
    println!("Total keys generated: {}", format_number(summary.attempts));
    if config.mode != Mode::Bench {
        println!("Total matches found:  {}", summary.matches);
    }
    if config.mode == Mode::Similar {
        println!("Best similarity:      {:.2}%", summary.best_score * 100.0);
    }
    println!("Time elapsed:         {:.2}s", summary.elapsed.as_secs_f64());
    println!(
        "Average speed:        {}/s",
        format_number(summary.keys_per_second() as u64)
    );

    Ok(())
}
