// Standalone replay tool for analyzing Tron agent debug logs
//
// Usage:
//   cargo run --bin replay -- [log_file] [options]
//
// Options:
//   --all                  Replay all turns
//   --turns <turn1,turn2>  Replay specific turns (comma-separated)
//   --validate             Validate logged moves against expectations
//   --verbose              Show detailed output for each turn
//   --config <path>        Path to Tron.toml (default: Tron.toml)

use std::env;
use std::process;

use tron_agent::config::Config;
use tron_agent::replay::ReplayEngine;
use tron_agent::types::Direction;

fn print_usage() {
    eprintln!("Tron Agent Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay [log_file] [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --all                   Replay all turns in the log");
    eprintln!("  --turns <T1,T2,...>     Replay specific turns (comma-separated)");
    eprintln!("  --validate <T:M,...>    Validate expected moves (format: turn:move,...)");
    eprintln!("  --verbose               Show detailed output for each turn");
    eprintln!("  --config <path>         Path to Tron.toml, used when no log file is given");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  replay tron_debug.jsonl --all");
    eprintln!("  replay tron_debug.jsonl --turns 5,10,15");
    eprintln!("  replay tron_debug.jsonl --validate 5:UP,10:RIGHT|DOWN");
}

/// Selected replay mode with its parsed argument
enum Mode {
    All,
    Turns(Vec<i64>),
    Validate(Vec<(i64, Vec<Direction>)>),
}

struct Args {
    log_file: Option<String>,
    config_path: String,
    verbose: bool,
    mode: Mode,
}

fn parse_turns(s: &str) -> Result<Vec<i64>, String> {
    s.split(',')
        .map(|t| {
            t.trim()
                .parse::<i64>()
                .map_err(|e| format!("Invalid turn number '{}': {}", t, e))
        })
        .collect()
}

fn parse_expected_moves(s: &str) -> Result<Vec<(i64, Vec<Direction>)>, String> {
    s.split(',')
        .map(|pair| {
            let (turn, moves) = pair
                .trim()
                .split_once(':')
                .ok_or_else(|| format!("Invalid format '{}'. Expected 'turn:move'", pair))?;

            let turn = turn
                .parse::<i64>()
                .map_err(|e| format!("Invalid turn number '{}': {}", turn, e))?;

            // Support multiple acceptable moves separated by '|'
            let moves = moves
                .split('|')
                .map(|m| m.parse::<Direction>())
                .collect::<Result<Vec<_>, _>>()?;

            Ok((turn, moves))
        })
        .collect()
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut log_file = None;
    let mut config_path = "Tron.toml".to_string();
    let mut verbose = false;
    let mut mode = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--all" => mode = Some(Mode::All),
            "--turns" => {
                let value = iter.next().ok_or("--turns requires an argument")?;
                mode = Some(Mode::Turns(parse_turns(value)?));
            }
            "--validate" => {
                let value = iter.next().ok_or("--validate requires an argument")?;
                mode = Some(Mode::Validate(parse_expected_moves(value)?));
            }
            "--config" => {
                let value = iter.next().ok_or("--config requires an argument")?;
                config_path = value.clone();
            }
            "--verbose" => verbose = true,
            other if !other.starts_with("--") && log_file.is_none() => {
                log_file = Some(other.to_string());
            }
            other => return Err(format!("Unknown option '{}'", other)),
        }
    }

    let mode = mode.ok_or("Must specify --all, --turns, or --validate")?;

    Ok(Args {
        log_file,
        config_path,
        verbose,
        mode,
    })
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let wants_help = args.iter().any(|a| a == "--help");

    if args.len() < 2 || wants_help {
        print_usage();
        process::exit(if wants_help { 0 } else { 1 });
    }

    let args = match parse_args(&args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            process::exit(1);
        }
    };

    // Without an explicit log file, read the one the server is configured to write
    let log_file = match args.log_file {
        Some(path) => path,
        None => {
            let config = Config::from_file(&args.config_path).unwrap_or_else(|e| {
                eprintln!("Warning: Could not load config from '{}': {}", args.config_path, e);
                eprintln!("Using default configuration");
                Config::default_hardcoded()
            });
            config.debug.log_file_path
        }
    };

    println!("Replay log file: {}", log_file);
    println!();

    let engine = ReplayEngine::new(args.verbose);

    let entries = match engine.load_log_file(&log_file) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error loading log file: {}", e);
            process::exit(1);
        }
    };

    if entries.is_empty() {
        eprintln!("Error: Log file is empty");
        process::exit(1);
    }

    println!("Loaded {} log entries\n", entries.len());

    match args.mode {
        Mode::All => {
            println!("Replaying all {} turns...\n", entries.len());
            let results = engine.replay_all(&entries);
            engine.print_report(&results);
        }
        Mode::Turns(turns) => {
            println!("Replaying {} specific turn(s)...\n", turns.len());
            match engine.replay_turns(&entries, &turns) {
                Ok(results) => engine.print_report(&results),
                Err(e) => {
                    eprintln!("Error during replay: {}", e);
                    process::exit(1);
                }
            }
        }
        Mode::Validate(expected_moves) => {
            println!("Validating {} expected move(s)...\n", expected_moves.len());
            match engine.validate_expected_moves(&entries, &expected_moves) {
                Ok(()) => println!("✓ All expected moves validated successfully!"),
                Err(e) => {
                    eprintln!("✗ Validation failed: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        std::iter::once("replay")
            .chain(parts.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_expected_moves() {
        let moves = parse_expected_moves("5:UP,10:right|down").unwrap();
        assert_eq!(moves[0], (5, vec![Direction::Up]));
        assert_eq!(moves[1], (10, vec![Direction::Right, Direction::Down]));
        assert!(parse_expected_moves("5").is_err());
        assert!(parse_expected_moves("x:UP").is_err());
    }

    #[test]
    fn test_parse_args() {
        let args = parse_args(&argv(&["log.jsonl", "--turns", "1,2", "--verbose"])).unwrap();
        assert_eq!(args.log_file.as_deref(), Some("log.jsonl"));
        assert!(args.verbose);
        assert!(matches!(args.mode, Mode::Turns(ref t) if t == &vec![1, 2]));

        assert!(parse_args(&argv(&["log.jsonl"])).is_err());
        assert!(parse_args(&argv(&["log.jsonl", "--turns"])).is_err());
        assert!(parse_args(&argv(&["log.jsonl", "--bogus"])).is_err());
    }
}
