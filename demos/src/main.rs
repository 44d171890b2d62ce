//! Runnable demos.
//!
//! ```bash
//! # Train SAC on the pendulum swing-up task, then evaluate
//! cargo run --release -- sac-pendulum
//!
//! # Subsample a scattered measurement CSV onto a 50x50 grid
//! cargo run --release -- subsample points.csv values.csv
//! ```

mod sac_pendulum;
mod subsample_points;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "sac-pendulum" => sac_pendulum::run(),
            "subsample" => subsample_points::run(&args[2..]),
            _ => {
                println!("Unknown demo: {}", args[1]);
                println!();
                print_usage();
            }
        }
    } else {
        print_usage();
    }
}

fn print_usage() {
    println!("Usage: cargo run --release -- <demo>");
    println!();
    println!("  sac-pendulum                    Soft Actor-Critic on pendulum swing-up");
    println!("                                  50 training episodes, 50 evaluation episodes");
    println!();
    println!("  subsample <points> <values>     Grid subsampling of scattered measurements");
    println!("                                  Reads two CSV files (coordinates and values),");
    println!("                                  writes <points>.sub.csv / <values>.sub.csv");
}
