//! Data-driven import checks over `tests/fixtures/*.svg`.
//!
//! A fixture declares what it should produce in a comment:
//!
//! ```text
//! <!-- expect: lines=1 circles=2 arcs=0 polylines=1 -->
//! ```
//!
//! Files named `bad_*` must be rejected instead.

use cadpath::{ImportOptions, Primitive, import_svg};
use datatest_stable::Utf8Path;

#[derive(Debug, Default, PartialEq)]
struct Counts {
    lines: usize,
    circles: usize,
    arcs: usize,
    polylines: usize,
}

fn expected(source: &str) -> Option<Counts> {
    let start = source.find("<!-- expect:")? + "<!-- expect:".len();
    let end = start + source[start..].find("-->")?;
    let mut counts = Counts::default();
    for field in source[start..end].split_whitespace() {
        let (key, value) = field.split_once('=')?;
        let value: usize = value.parse().ok()?;
        match key {
            "lines" => counts.lines = value,
            "circles" => counts.circles = value,
            "arcs" => counts.arcs = value,
            "polylines" => counts.polylines = value,
            _ => return None,
        }
    }
    Some(counts)
}

fn check_fixture(path: &Utf8Path) -> datatest_stable::Result<()> {
    let source = std::fs::read_to_string(path)?;
    let name = path.file_name().unwrap_or_default();
    let result = import_svg(name, &source, &ImportOptions::default());

    if name.starts_with("bad_") {
        return match result {
            Ok(doc) => Err(format!("{name}: expected a failure, got {} shapes", doc.len()).into()),
            Err(_) => Ok(()),
        };
    }

    let doc = result.map_err(|e| format!("{name}: {:?}", miette::Report::new(e)))?;
    let want = expected(&source).ok_or_else(|| format!("{name}: missing expect comment"))?;
    let got = Counts {
        lines: doc.lines.len(),
        circles: doc.circles.len(),
        arcs: doc.arcs.len(),
        polylines: doc.polylines.len(),
    };
    if got != want {
        return Err(format!("{name}: expected {want:?}, got {got:?}").into());
    }

    if let Some(bounds) = doc.bounds {
        for p in doc.primitives().filter(|p| p.is_visible()) {
            let b = p.bounds();
            if !(bounds.contains(b.min, 1e-9) && bounds.contains(b.max, 1e-9)) {
                return Err(format!("{name}: {} lies outside the document bounds", p.tag()).into());
            }
        }
    }
    Ok(())
}

datatest_stable::harness! {
    { test = check_fixture, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"), pattern = r"\.svg$" },
}
