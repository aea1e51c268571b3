//! Import an SVG and print what came out.
//!
//! ```text
//! RUST_LOG=cadpath=debug cargo run --features tracing --example inspect -- drawing.svg [--biarc] [--buckets 1,5]
//! ```

use cadpath::{CurveFitting, ImportOptions, SvgReader, bucket_by_radius, import};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "tests/fixtures/basic_shapes.svg".to_string());
    let mut options = ImportOptions::default();
    let mut buckets: Vec<f64> = Vec::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--biarc" => options = options.with_curve_fitting(CurveFitting::Biarc),
            "--no-circles" => options = options.with_detect_circles(false),
            "--buckets" => {
                let list = args.next().unwrap_or_default();
                buckets = list.split(',').filter_map(|s| s.trim().parse().ok()).collect();
            }
            other => eprintln!("ignoring unknown argument {other}"),
        }
    }

    let bytes = std::fs::read(&path).unwrap_or_else(|e| panic!("Failed to read {path}: {e}"));
    let mut doc = import(&path, &bytes, &[&SvgReader], &options)?;
    tracing::info!(file = %path, shapes = doc.len(), "imported");
    if !buckets.is_empty() {
        doc = bucket_by_radius(&doc, &buckets);
    }

    println!(
        "{}: lines={} circles={} arcs={} polylines={}",
        doc.file_name,
        doc.lines.len(),
        doc.circles.len(),
        doc.arcs.len(),
        doc.polylines.len()
    );
    match doc.bounds {
        Some(b) => println!("bounds: {} .. {} ({:.3} x {:.3} mm)", b.min, b.max, b.width(), b.height()),
        None => println!("bounds: none"),
    }
    for p in doc.primitives() {
        let hidden = if p.is_visible() { "" } else { " (hidden)" };
        println!("  [{}] {}{}", p.layer(), p.tag(), hidden);
    }
    println!("layers: {:?}", doc.to_cad().layers());
    Ok(())
}
