#![deny(unsafe_code)]
//! CLI binary for the isoline contour sketches.
//!
//! Subcommands:
//! - `extract <sketch>`: run a sketch for N frames, write contours as JSON
//! - `schema <sketch>`: print a sketch's parameter schema
//! - `list`: print available sketches and saddle modes

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use isoline_core::{SaddleResolution, Seed, Sketch};
use isoline_marching_squares::JOIN_TOLERANCE;
use isoline_sketches::export;
use isoline_sketches::SketchKind;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "isoline", about = "Marching-squares contour sketches")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log filter used when RUST_LOG is unset (e.g. "debug").
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a sketch for N frames and write its contours as JSON.
    Extract {
        /// Sketch name (e.g. "contour-map"). Optional with --seed-file.
        sketch: Option<String>,

        /// Grid cells along x.
        #[arg(long, default_value_t = 64)]
        cols: usize,

        /// Grid cells along y.
        #[arg(long, default_value_t = 48)]
        rows: usize,

        /// Noise seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u32,

        /// Number of frames to extract.
        #[arg(short, long, default_value_t = 1)]
        frames: usize,

        /// Saddle resolution (edge-order, center-average).
        #[arg(long, default_value_t = SaddleResolution::EdgeOrder)]
        saddle: SaddleResolution,

        /// Sketch parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Load sketch, grid, params, seed, frames and saddle mode from a JSON
        /// seed file.
        #[arg(
            long,
            conflicts_with_all = ["sketch", "cols", "rows", "seed", "frames", "saddle", "params"]
        )]
        seed_file: Option<PathBuf>,

        /// Output file path.
        #[arg(short, long, default_value = "contours.json")]
        output: PathBuf,

        /// Split rows across all cores.
        #[arg(long)]
        parallel: bool,

        /// Also stitch segments into polylines.
        #[arg(long)]
        join: bool,
    },
    /// Print the parameter schema of a sketch.
    Schema {
        /// Sketch name.
        sketch: String,
    },
    /// List available sketches and saddle modes.
    List,
}

fn read_seed_file(path: &Path) -> Result<Seed, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid seed file {}: {e}", path.display())))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let sketches = SketchKind::list_sketches();
            let saddles: Vec<&str> = SaddleResolution::ALL.iter().map(|s| s.name()).collect();
            if cli.json {
                let info = serde_json::json!({
                    "sketches": sketches,
                    "saddle_modes": saddles,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Sketches:");
                for name in sketches {
                    println!("  {name}");
                }
                println!("Saddle modes:");
                println!("  {}", saddles.join(", "));
            }
        }
        Command::Schema { sketch } => {
            let s = SketchKind::from_name(&sketch, 1, 1, 0, &serde_json::json!({}))?;
            println!("{}", serde_json::to_string_pretty(&s.param_schema())?);
        }
        Command::Extract {
            sketch,
            cols,
            rows,
            seed,
            frames,
            saddle,
            params,
            seed_file,
            output,
            parallel,
            join,
        } => {
            let plan = match seed_file {
                Some(path) => read_seed_file(&path)?,
                None => {
                    let name = sketch.ok_or_else(|| {
                        CliError::Input("a sketch name or --seed-file is required".into())
                    })?;
                    let params: serde_json::Value = serde_json::from_str(&params)
                        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
                    Seed {
                        params,
                        frames,
                        saddle,
                        ..Seed::new(&name, cols, rows, seed)
                    }
                }
            };

            tracing::info!(
                sketch = %plan.sketch,
                cols = plan.cols,
                rows = plan.rows,
                frames = plan.frames,
                saddle = %plan.saddle,
                "extracting"
            );
            let rendered = export::render_seed(&plan, parallel, join.then_some(JOIN_TOLERANCE))?;
            export::write_json(&rendered, &output)?;

            let segments: usize = rendered.iter().map(|f| f.contours.segment_count()).sum();
            if cli.json {
                // `seed` is a complete seed file for replaying this run.
                let info = serde_json::json!({
                    "seed": plan,
                    "segments": segments,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "extracted {} ({}x{}, {} frames, seed {}, {}, {segments} segments) -> {}",
                    plan.sketch,
                    plan.cols,
                    plan.rows,
                    plan.frames,
                    plan.seed,
                    plan.saddle,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn extract_parses_saddle_and_flags() {
        let cli = Cli::try_parse_from([
            "isoline",
            "extract",
            "terrain",
            "--saddle",
            "center-average",
            "--parallel",
            "--join",
            "--frames",
            "3",
        ])
        .unwrap();
        match cli.command {
            Command::Extract {
                sketch,
                saddle,
                parallel,
                join,
                frames,
                ..
            } => {
                assert_eq!(sketch.as_deref(), Some("terrain"));
                assert_eq!(saddle, SaddleResolution::CenterAverage);
                assert!(parallel && join);
                assert_eq!(frames, 3);
            }
            _ => panic!("expected extract"),
        }
    }

    #[test]
    fn unknown_saddle_is_rejected() {
        assert!(Cli::try_parse_from(["isoline", "extract", "terrain", "--saddle", "diagonal"]).is_err());
    }

    #[test]
    fn seed_file_conflicts_with_sketch_name() {
        assert!(Cli::try_parse_from([
            "isoline",
            "extract",
            "terrain",
            "--seed-file",
            "seed.json"
        ])
        .is_err());
    }

    #[test]
    fn seed_file_conflicts_with_run_flags() {
        for flag in [
            ["--saddle", "center-average"],
            ["--cols", "10"],
            ["--rows", "10"],
            ["--seed", "5"],
            ["--frames", "2"],
        ] {
            assert!(
                Cli::try_parse_from(["isoline", "extract", "--seed-file", "seed.json", flag[0], flag[1]])
                    .is_err(),
                "{} was accepted alongside --seed-file",
                flag[0]
            );
        }
    }

    #[test]
    fn extract_without_sketch_is_input_error() {
        let cli = Cli::try_parse_from(["isoline", "extract"]).unwrap();
        let err = run(cli).unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn bad_params_json_is_input_error() {
        let cli =
            Cli::try_parse_from(["isoline", "extract", "terrain", "--params", "{nope"]).unwrap();
        assert_eq!(run(cli).unwrap_err().exit_code(), 12);
    }

    #[test]
    fn unknown_sketch_is_contour_error() {
        let cli = Cli::try_parse_from(["isoline", "schema", "spirograph"]).unwrap();
        assert_eq!(run(cli).unwrap_err().exit_code(), 10);
    }

    #[test]
    fn missing_seed_file_is_io_error() {
        let err = read_seed_file(Path::new("/nonexistent/seed.json")).unwrap_err();
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn seed_file_run_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let seed_path = dir.path().join("seed.json");
        let out_path = dir.path().join("out.json");
        std::fs::write(
            &seed_path,
            r#"{"sketch": "noise-contours", "cols": 8, "rows": 6, "seed": 3, "frames": 2}"#,
        )
        .unwrap();
        let cli = Cli::try_parse_from([
            "isoline",
            "extract",
            "--seed-file",
            seed_path.to_str().unwrap(),
            "--output",
            out_path.to_str().unwrap(),
        ])
        .unwrap();
        run(cli).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
        assert_eq!(written.as_array().unwrap().len(), 2);
    }

    fn extract_seed_file(seed_path: &Path, out_path: &Path) -> String {
        let cli = Cli::try_parse_from([
            "isoline",
            "extract",
            "--seed-file",
            seed_path.to_str().unwrap(),
            "--output",
            out_path.to_str().unwrap(),
        ])
        .unwrap();
        run(cli).unwrap();
        std::fs::read_to_string(out_path).unwrap()
    }

    #[test]
    fn seed_file_saddle_mode_replays_identically() {
        let dir = tempfile::tempdir().unwrap();
        let center = dir.path().join("center.json");
        let edge = dir.path().join("edge.json");
        std::fs::write(
            &center,
            r#"{"sketch": "noise-contours", "cols": 48, "rows": 48, "seed": 7, "saddle": "center-average"}"#,
        )
        .unwrap();
        std::fs::write(
            &edge,
            r#"{"sketch": "noise-contours", "cols": 48, "rows": 48, "seed": 7}"#,
        )
        .unwrap();

        let first = extract_seed_file(&center, &dir.path().join("a.json"));
        let second = extract_seed_file(&center, &dir.path().join("b.json"));
        assert_eq!(first, second);

        let frames: serde_json::Value = serde_json::from_str(&first).unwrap();
        assert_eq!(frames[0]["saddle"], "center-average");
        let edge_order = extract_seed_file(&edge, &dir.path().join("c.json"));
        assert_ne!(first, edge_order);
    }
}
