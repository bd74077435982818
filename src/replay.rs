// Replay module for analyzing logged decisions
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Re-run the engine on historical snapshots
// 3. Compare logged vs replayed moves
// 4. Generate analysis reports

use log::{info, warn};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::debug_logger::DebugLogEntry;
use crate::engine;
use crate::types::{Coord, Direction, MoveCommand};

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i64,
    pub original_move: MoveCommand,
    pub replayed_move: MoveCommand,
    pub matches: bool,
    pub head: Coord,
    pub pattern: usize,
    pub candidates_tested: usize,
    pub fallback: bool,
    pub computation_time_us: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default, PartialEq)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub fallbacks: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine
    pub fn new(verbose: bool) -> Self {
        ReplayEngine { verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<DebugLogEntry>, String> {
        let file =
            File::open(log_path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

        let entries = Self::parse_log(BufReader::new(file))?;
        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Parses JSONL from any reader, skipping blank lines
    pub fn parse_log<R: BufRead>(reader: R) -> Result<Vec<DebugLogEntry>, String> {
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: DebugLogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &DebugLogEntry) -> ReplayResult {
        let start_time = Instant::now();
        let decision = engine::evaluate(&entry.state, entry.boosts_remaining, entry.player_number);
        let computation_time_us = start_time.elapsed().as_micros();

        let matches = decision.command == entry.chosen_move;

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: ✓ MATCH - {} (pattern: {}, tested: {}, fallback: {})",
                    entry.turn,
                    decision.command,
                    decision.pattern,
                    decision.candidates.len(),
                    decision.fallback
                );
            } else {
                warn!(
                    "Turn {}: ✗ MISMATCH - Original: {}, Replayed: {} (pattern: {}, tested: {})",
                    entry.turn,
                    entry.chosen_move,
                    decision.command,
                    decision.pattern,
                    decision.candidates.len()
                );
            }
        }

        ReplayResult {
            turn: entry.turn,
            original_move: entry.chosen_move,
            replayed_move: decision.command,
            matches,
            head: decision.head,
            pattern: decision.pattern,
            candidates_tested: decision.candidates.len(),
            fallback: decision.fallback,
            computation_time_us,
        }
    }

    /// Replays all entries, in log order
    pub fn replay_all(&self, entries: &[DebugLogEntry]) -> Vec<ReplayResult> {
        entries
            .par_iter()
            .map(|entry| self.replay_entry(entry))
            .collect()
    }

    /// Replays specific turns from a log
    pub fn replay_turns(
        &self,
        entries: &[DebugLogEntry],
        turn_numbers: &[i64],
    ) -> Result<Vec<ReplayResult>, String> {
        let selected = turn_numbers
            .iter()
            .map(|turn_num| {
                entries
                    .iter()
                    .find(|e| e.turn == *turn_num)
                    .ok_or_else(|| format!("Turn {} not found in log file", turn_num))
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(selected
            .par_iter()
            .map(|entry| self.replay_entry(entry))
            .collect())
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let fallbacks = results.iter().filter(|r| r.fallback).count();
        let mismatches = total_turns - matches;
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches,
            fallbacks,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("Fallbacks:      {}", stats.fallbacks);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;

            println!("Average Computation Time:   {:.1}us\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Turn {}: {} → {} (head: ({},{}), pattern: {}, tested: {})",
                    result.turn,
                    result.original_move,
                    result.replayed_move,
                    result.head.x,
                    result.head.y,
                    result.pattern,
                    result.candidates_tested
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[DebugLogEntry],
        expected_moves: &[(i64, Vec<Direction>)], // (turn, acceptable_moves)
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            let actual_move = entry.chosen_move.direction;

            if !acceptable.contains(&actual_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    actual_move
                ));
            }
        }

        Ok(())
    }
}
