//! Grid subsampling of a scattered measurement CSV.
//!
//! Reads a coordinate matrix (`lon,lat` header) and a value column
//! (`pm25` header), buckets the measurements onto a 50x50 grid, and writes
//! the reduced training set next to the inputs.

use grid_subsample::{read_csv_matrix, subsample, write_csv_matrix, SubsampleConfig};

pub fn run(args: &[String]) {
    if args.len() < 2 {
        println!("Usage: cargo run --release -- subsample <points.csv> <values.csv>");
        return;
    }

    let points_path = &args[0];
    let values_path = &args[1];

    let (feats, width) = match read_csv_matrix(points_path) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("Failed to read {}: {}", points_path, err);
            return;
        }
    };
    let (labels, label_width) = match read_csv_matrix(values_path) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("Failed to read {}: {}", values_path, err);
            return;
        }
    };

    if label_width != 1 {
        eprintln!("Expected a single value column, got {}", label_width);
        return;
    }

    let config = SubsampleConfig::default().with_area(width == 3);
    println!(
        "Read {} points ({} columns), subsampling onto a {}x{} grid",
        labels.len(),
        width,
        config.n_cells,
        config.n_cells
    );

    let result = match subsample(&feats, &labels, &config) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Subsampling failed: {}", err);
            return;
        }
    };
    println!("Derived {} grid samples", result.len());

    let coords_flat: Vec<f32> = result.coords.iter().flatten().copied().collect();
    let out_points = format!("{}.sub.csv", points_path.trim_end_matches(".csv"));
    let out_values = format!("{}.sub.csv", values_path.trim_end_matches(".csv"));

    if let Err(err) = write_csv_matrix(&out_points, "lon,lat", &coords_flat, 2) {
        eprintln!("Failed to write {}: {}", out_points, err);
        return;
    }
    if let Err(err) = write_csv_matrix(&out_values, "pm25", &result.values, 1) {
        eprintln!("Failed to write {}: {}", out_values, err);
        return;
    }

    println!("Wrote {} and {}", out_points, out_values);
}
