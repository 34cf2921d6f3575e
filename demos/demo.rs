//! Terminal search demo.
//!
//! Run: cargo run --bin tilepath-demo [seed]
//!
//! Press Enter for a new map, `q` then Enter to quit. Set `RUST_LOG=debug`
//! for search traces.

use std::io::{self, BufRead, Write};

use rand::prelude::*;
use rand::rngs::StdRng;
use tilepath_demos::Demo;
use tilepath_mapgen::MapGenConfig;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random::<u64>);
    log::info!("seed {seed}");

    let mut demo = Demo::new(MapGenConfig::default(), StdRng::seed_from_u64(seed));
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        match demo.regenerate() {
            Ok(_) => print!("{}", demo.frame()),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        print!("[Enter] new map, [q] quit > ");
        let _ = io::stdout().flush();
        match lines.next() {
            Some(Ok(line)) if line.trim() != "q" => continue,
            _ => break,
        }
    }
}
