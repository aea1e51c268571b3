use cadpath::cad::{CadArc, CadCircle, CadLine};
use cadpath::{
    CadCodec, CadDocument, CadReader, CurveFitting, FormatReader, ImportError, ImportOptions,
    Point, SvgReader, bucket_by_radius, detect_circles, import, import_svg,
};
use std::f64::consts::TAU;

fn page(body: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="100mm" height="100mm" viewBox="0 0 100 100">{body}</svg>"#
    )
}

/// Closed path through `n` points on a circle, in user units.
fn polygon_path(cx: f64, cy: f64, r: f64, n: usize) -> String {
    let mut d = String::new();
    for i in 0..n {
        let a = TAU * i as f64 / n as f64;
        let cmd = if i == 0 { 'M' } else { 'L' };
        d.push_str(&format!("{cmd} {} {} ", cx + r * a.cos(), cy + r * a.sin()));
    }
    d.push('Z');
    format!(r#"<path d="{d}"/>"#)
}

#[test]
fn twelve_sided_path_becomes_a_circle() {
    let svg = page(&polygon_path(50.0, 50.0, 5.0, 12));
    let doc = import_svg("ring.svg", &svg, &ImportOptions::default()).unwrap();
    assert_eq!(doc.circles.len(), 1);
    assert!(doc.polylines.is_empty());
    let c = &doc.circles[0];
    assert!(c.center.approx_eq(Point::new(50.0, 50.0), 1e-6));
    assert!((c.radius - 5.0).abs() < 0.05);
}

#[test]
fn circle_detection_can_be_disabled() {
    let svg = page(&polygon_path(50.0, 50.0, 5.0, 12));
    let options = ImportOptions::default().with_detect_circles(false);
    let doc = import_svg("ring.svg", &svg, &options).unwrap();
    assert!(doc.circles.is_empty());
    assert_eq!(doc.polylines.len(), 1);

    // and recovered afterwards, without touching the original
    let detected = detect_circles(&doc, &options.circle_fit);
    assert_eq!(detected.circles.len(), 1);
    assert_eq!(doc.polylines.len(), 1);
}

#[test]
fn square_stays_a_polyline() {
    let svg = page(r#"<path d="M 10 10 h 20 v 20 h -20 z"/>"#);
    let doc = import_svg("square.svg", &svg, &ImportOptions::default()).unwrap();
    assert!(doc.circles.is_empty());
    let square = &doc.polylines[0];
    assert!(square.closed);
    assert_eq!(square.vertices.len(), 5);
    let bounds = doc.bounds.unwrap();
    assert!(bounds.min.approx_eq(Point::new(10.0, 70.0), 1e-9));
    assert!(bounds.max.approx_eq(Point::new(30.0, 90.0), 1e-9));
}

#[test]
fn hidden_elements_are_kept_but_not_bounded() {
    let svg = page(
        r#"<circle cx="50" cy="50" r="10"/>
           <g style="display:none"><line x1="-500" y1="-500" x2="500" y2="500"/></g>"#,
    );
    let doc = import_svg("hidden.svg", &svg, &ImportOptions::default()).unwrap();
    assert_eq!(doc.lines.len(), 1);
    assert!(!doc.lines[0].meta.style.visible);
    let bounds = doc.bounds.unwrap();
    assert!(bounds.min.approx_eq(Point::new(40.0, 40.0), 1e-9));
    assert!(bounds.max.approx_eq(Point::new(60.0, 60.0), 1e-9));
}

#[test]
fn biarc_fitting_keeps_curve_endpoints() {
    let svg = page(r#"<path d="M 10 50 C 10 20 40 20 40 50 L 10 50"/>"#);
    for fitting in [CurveFitting::Flatten, CurveFitting::Biarc] {
        let options = ImportOptions::default().with_curve_fitting(fitting);
        let doc = import_svg("curve.svg", &svg, &options).unwrap();
        let poly = &doc.polylines[0];
        assert!(poly.vertices[0].approx_eq(Point::new(10.0, 50.0), 1e-9));
        assert!(poly.vertices.iter().any(|p| p.approx_eq(Point::new(40.0, 50.0), 1e-9)));
        let bounds = doc.bounds.unwrap();
        // the curve peaks at y = 27.5 in user units, 72.5 after the flip
        assert!((bounds.max.y - 72.5).abs() < 0.1, "{fitting:?}: {bounds:?}");
    }
}

#[test]
fn arc_commands_are_sampled_on_the_circle() {
    let svg = page(r#"<path d="M 40 50 A 10 10 0 0 1 60 50 L 50 80 Z"/>"#);
    let doc = import_svg("arc.svg", &svg, &ImportOptions::default()).unwrap();
    let poly = &doc.polylines[0];
    let on_circle = poly
        .vertices
        .iter()
        .filter(|p| (p.distance(Point::new(50.0, 50.0)) - 10.0).abs() < 1e-6)
        .count();
    assert!(on_circle > 10, "only {on_circle} arc samples");
}

#[test]
fn radius_buckets_on_imported_circles() {
    let svg = page(r#"<circle cx="10" cy="10" r="1"/><circle cx="50" cy="50" r="8"/>"#);
    let doc = import_svg("holes.svg", &svg, &ImportOptions::default()).unwrap();
    let bucketed = bucket_by_radius(&doc, &[2.0, 5.0]);
    let layers: Vec<_> = bucketed.to_cad().circles.into_iter().map(|c| c.layer).collect();
    assert_eq!(layers, vec!["R<=2", "R>5"]);
}

/// Stands in for an interchange codec: one record per line, `L x1 y1 x2 y2`,
/// `C cx cy r` or `A cx cy r start end`.
struct TextCodec;

impl CadCodec for TextCodec {
    fn name(&self) -> &'static str {
        "text-cad"
    }

    fn decode(&self, bytes: &[u8]) -> Result<CadDocument, ImportError> {
        let text = std::str::from_utf8(bytes).map_err(|e| ImportError::codec(e.to_string()))?;
        let mut doc = CadDocument::default();
        for line in text.lines() {
            let mut fields = line.split_whitespace();
            let kind = fields.next();
            let nums: Vec<f64> = fields
                .map(|f| f.parse().map_err(|_| ImportError::codec(format!("bad field {f:?}"))))
                .collect::<Result<_, _>>()?;
            let layer = "cad".to_string();
            match (kind, nums.as_slice()) {
                (Some("L"), &[x1, y1, x2, y2]) => doc.lines.push(CadLine {
                    start: Point::new(x1, y1),
                    end: Point::new(x2, y2),
                    layer,
                }),
                (Some("C"), &[x, y, r]) => doc.circles.push(CadCircle {
                    center: Point::new(x, y),
                    radius: r,
                    layer,
                }),
                (Some("A"), &[x, y, r, s, e]) => doc.arcs.push(CadArc {
                    center: Point::new(x, y),
                    radius: r,
                    start_angle_deg: s,
                    end_angle_deg: e,
                    layer,
                }),
                _ => return Err(ImportError::codec(format!("unknown record {line:?}"))),
            }
        }
        Ok(doc)
    }

    fn encode(&self, document: &CadDocument) -> Result<Vec<u8>, ImportError> {
        let mut out = String::new();
        for l in &document.lines {
            out.push_str(&format!("L {} {} {} {}\n", l.start.x, l.start.y, l.end.x, l.end.y));
        }
        for c in &document.circles {
            out.push_str(&format!("C {} {} {}\n", c.center.x, c.center.y, c.radius));
        }
        for a in &document.arcs {
            out.push_str(&format!(
                "A {} {} {} {} {}\n",
                a.center.x, a.center.y, a.radius, a.start_angle_deg, a.end_angle_deg
            ));
        }
        Ok(out.into_bytes())
    }
}

#[test]
fn import_falls_through_to_the_codec() {
    let cad = CadReader::new(TextCodec);
    let readers: [&dyn FormatReader; 2] = [&SvgReader, &cad];
    let doc = import(
        "part.txt",
        b"L 0 0 10 0\nA 0 0 5 0 180\n",
        &readers,
        &ImportOptions::default(),
    )
    .unwrap();
    assert_eq!(doc.lines.len(), 1);
    assert_eq!(doc.arcs.len(), 1);
    let bounds = doc.bounds.unwrap();
    assert!(bounds.min.approx_eq(Point::new(-5.0, 0.0), 1e-9));
    assert!(bounds.max.approx_eq(Point::new(10.0, 5.0), 1e-9));
}

#[test]
fn svg_round_trips_through_the_codec() {
    let svg = page(r#"<line x1="0" y1="100" x2="10" y2="100"/><circle cx="50" cy="50" r="4"/>"#);
    let doc = import_svg("rt.svg", &svg, &ImportOptions::default()).unwrap();
    let bytes = TextCodec.encode(&doc.to_cad()).unwrap();

    let cad = CadReader::new(TextCodec);
    let readers: [&dyn FormatReader; 2] = [&SvgReader, &cad];
    let back = import("rt.txt", &bytes, &readers, &ImportOptions::default()).unwrap();
    assert_eq!(back.lines.len(), 1);
    assert!(back.lines[0].end.approx_eq(Point::new(10.0, 0.0), 1e-9));
    assert!((back.circles[0].radius - 4.0).abs() < 1e-9);
}

#[test]
fn unsupported_lists_every_reader() {
    let cad = CadReader::new(TextCodec);
    let readers: [&dyn FormatReader; 2] = [&SvgReader, &cad];
    let err = import("junk", b"<html/>", &readers, &ImportOptions::default()).unwrap_err();
    let ImportError::Unsupported { attempts } = &err else {
        panic!("expected Unsupported, got {err:?}");
    };
    assert_eq!(attempts.len(), 2);
    assert!(matches!(*attempts[0].error, ImportError::NotSvg { .. }));
    insta::assert_snapshot!(err.to_string(), @"conversion unsuccessful (2 readers tried)");
}

#[test]
fn invalid_options_are_rejected_before_reading() {
    let options = ImportOptions {
        curve_section: Some(-1.0),
        ..ImportOptions::default()
    };
    let err = import("a.svg", page("").as_bytes(), &[&SvgReader], &options).unwrap_err();
    assert!(matches!(err, ImportError::Options(_)));
}
