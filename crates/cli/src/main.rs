//! # CLI - ckydb interactive shell
//!
//! A REPL-style command-line interface for the ckydb storage engine.
//! Reads commands from stdin, executes them against an open database,
//! and prints results to stdout. Designed for both interactive use and
//! scripted testing (pipe commands via stdin).
//!
//! ## Commands
//!
//! ```text
//! SET key value      Insert or update a key-value pair
//! GET key            Look up a key (prints value or "(nil)")
//! DEL key            Delete a key (reclaimed by the next vacuum)
//! CLEAR              Reset the entire database
//! VACUUM             Run a vacuum cycle immediately
//! STATS              Print engine debug info
//! EXIT / QUIT        Shut down gracefully
//! ```
//!
//! ## Configuration
//!
//! All settings are controlled via environment variables:
//!
//! ```text
//! CKYDB_PATH         Database directory        (default: "data/ckydb")
//! CKYDB_MAX_FILE_KB  Log rollover size in KB   (default: 1024)
//! CKYDB_VACUUM_SEC   Vacuum interval, seconds  (default: 60)
//! ```
//!
//! ## Example
//!
//! ```text
//! $ cargo run -p cli
//! ckydb started (path=data/ckydb, max_file_kb=1024, vacuum_sec=60)
//! > SET name Alice
//! OK
//! > GET name
//! Alice
//! > DEL name
//! OK
//! > GET name
//! (nil)
//! > EXIT
//! bye
//! ```

use anyhow::Result;
use ckydb::{DbError, StoreError};
use std::io::{self, BufRead, Write};

/// Reads a configuration value from the environment, falling back to `default`.
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let db_path = env_or("CKYDB_PATH", "data/ckydb");
    let max_file_kb: f64 = env_or("CKYDB_MAX_FILE_KB", "1024").parse().unwrap_or(1024.0);
    let vacuum_sec: f64 = env_or("CKYDB_VACUUM_SEC", "60").parse().unwrap_or(60.0);

    let mut db = ckydb::connect(&db_path, max_file_kb, vacuum_sec)?;

    println!(
        "ckydb started (path={}, max_file_kb={}, vacuum_sec={})",
        db_path, max_file_kb, vacuum_sec
    );
    println!("Commands: SET key value | GET key | DEL key | CLEAR | VACUUM | STATS | EXIT");
    print!("> ");
    io::stdout().flush().ok();

    let stdin = io::stdin();

    for line in stdin.lock().lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        if let Some(cmd) = parts.next() {
            match cmd.to_uppercase().as_str() {
                "SET" => {
                    if let Some(k) = parts.next() {
                        let v: String = parts.collect::<Vec<&str>>().join(" ");
                        if v.is_empty() {
                            println!("ERR usage: SET key value");
                        } else {
                            match db.set(k, &v) {
                                Ok(()) => println!("OK"),
                                Err(e) => println!("ERR set failed: {}", e),
                            }
                        }
                    } else {
                        println!("ERR usage: SET key value");
                    }
                }
                "GET" => {
                    if let Some(k) = parts.next() {
                        match db.get(k) {
                            Ok(v) => println!("{}", v),
                            Err(DbError::Store(StoreError::NotFound { .. })) => {
                                println!("(nil)")
                            }
                            Err(e) => println!("ERR read failed: {}", e),
                        }
                    } else {
                        println!("ERR usage: GET key");
                    }
                }
                "DEL" => {
                    if let Some(k) = parts.next() {
                        match db.delete(k) {
                            Ok(()) => println!("OK"),
                            Err(DbError::Store(StoreError::NotFound { .. })) => {
                                println!("(nil)")
                            }
                            Err(e) => println!("ERR del failed: {}", e),
                        }
                    } else {
                        println!("ERR usage: DEL key");
                    }
                }
                "CLEAR" => match db.clear() {
                    Ok(()) => println!("OK"),
                    Err(e) => println!("ERR clear failed: {}", e),
                },
                "VACUUM" => match db.vacuum() {
                    Ok(()) => println!("OK"),
                    Err(e) => println!("ERR vacuum failed: {}", e),
                },
                "STATS" => {
                    println!("{:?}", db.store());
                }
                "EXIT" | "QUIT" => {
                    println!("bye");
                    break;
                }
                other => {
                    println!("unknown command: {}", other);
                }
            }
        }

        print!("> ");
        io::stdout().flush().ok();
    }

    db.close()?;
    Ok(())
}
