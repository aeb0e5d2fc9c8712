use bridge_gad::sink::{DxfSink, SvgSink};
use bridge_gad::log::info;
use bridge_gad::{generate, parse_named, validate};
use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use std::fs;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "render" => {
            let dir = args.get(2).map(String::as_str).unwrap_or("tests/fixtures");
            if !render_dir(Utf8Path::new(dir)) {
                std::process::exit(1);
            }
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            usage();
            std::process::exit(1);
        }
    }
}

fn usage() {
    eprintln!("Usage: cargo xtask <command>");
    eprintln!("Commands:");
    eprintln!("  render [dir]    Render every .gad file in dir to .svg and .dxf (default: tests/fixtures)");
}

/// Render all parameter files in `dir`; false if any failed
fn render_dir(dir: &Utf8Path) -> bool {
    let mut inputs: Vec<Utf8PathBuf> = match dir.read_dir_utf8() {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|p| p.extension() == Some("gad"))
            .collect(),
        Err(e) => {
            eprintln!("Failed to read {dir}: {e}");
            return false;
        }
    };
    inputs.sort();

    if inputs.is_empty() {
        eprintln!("No .gad files in {dir}");
        return true;
    }

    // generations are independent, so each file gets its own task
    let failures: Vec<(Utf8PathBuf, miette::Report)> = inputs
        .par_iter()
        .filter_map(|path| render_one(path).err().map(|e| (path.clone(), e)))
        .collect();

    for (path, report) in &failures {
        eprintln!("{path}:\n{report:?}");
    }
    eprintln!("Rendered {} of {} files", inputs.len() - failures.len(), inputs.len());
    failures.is_empty()
}

fn render_one(path: &Utf8Path) -> miette::Result<()> {
    let source = fs::read_to_string(path).map_err(|e| miette::miette!("{e}"))?;
    let params = parse_named(path.as_str(), &source)?;

    for issue in validate::check(&params) {
        eprintln!("{path}: warning: {issue}");
    }

    let drawing = generate(&params);
    for note in drawing.notes() {
        info!("{path}: {note}");
    }

    let mut svg = SvgSink::for_drawing(&drawing);
    let Ok(()) = drawing.emit(&mut svg);
    svg.save(path.with_extension("svg"))?;

    let mut dxf = DxfSink::for_drawing(&drawing);
    let Ok(()) = drawing.emit(&mut dxf);
    dxf.save_file(path.with_extension("dxf"))?;

    eprintln!("{path}: {} primitives", drawing.len());
    Ok(())
}
