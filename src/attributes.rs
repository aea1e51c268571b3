//! Parse declarative attributes: transform lists and style declarations.

use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::errors::{AttributeError, SourceContext};
use crate::geometry::transform::{Matrix2D, TransformOp};
use crate::log::warn;
use crate::types::Point;

#[derive(Parser)]
#[grammar = "attributes.pest"]
pub struct AttributeParser;

fn syntax_error(attribute: &'static str, source: &str, err: pest::error::Error<Rule>) -> AttributeError {
    let (start, end) = match err.location {
        InputLocation::Pos(p) => (p, p),
        InputLocation::Span(span) => span,
    };
    AttributeError::Syntax {
        attribute,
        src: SourceContext::new(attribute, source).named_source(),
        span: (start, end.saturating_sub(start)).into(),
        message: err.variant.message().into_owned(),
    }
}

/// Parse a transform list into its operations, in reading order.
///
/// Unknown functions and wrong argument counts contribute nothing.
pub fn parse_transform(source: &str) -> Result<Vec<TransformOp>, AttributeError> {
    let pairs = AttributeParser::parse(Rule::transform_list, source)
        .map_err(|e| syntax_error("transform", source, e))?;

    let mut ops = Vec::new();
    for pair in pairs.flatten().filter(|p| p.as_rule() == Rule::transform) {
        if let Some(op) = parse_transform_op(pair) {
            ops.push(op);
        }
    }
    Ok(ops)
}

/// Parse a transform list straight into a matrix (identity if degenerate).
pub fn parse_transform_matrix(source: &str) -> Result<Matrix2D, AttributeError> {
    parse_transform(source).map(|ops| Matrix2D::from_ops(&ops))
}

fn parse_transform_op(pair: Pair<Rule>) -> Option<TransformOp> {
    let mut inner = pair.into_inner();
    let name = inner.next()?.as_str();
    // Grammar guarantees every number token is a valid float literal
    let args: Vec<f64> = inner
        .next()?
        .into_inner()
        .filter_map(|n| n.as_str().parse().ok())
        .collect();

    let op = match (name, args.as_slice()) {
        ("matrix", &[a, b, c, d, e, f]) => TransformOp::Matrix([a, b, c, d, e, f]),
        ("translate", &[tx]) => TransformOp::Translate { tx, ty: 0.0 },
        ("translate", &[tx, ty]) => TransformOp::Translate { tx, ty },
        ("scale", &[s]) => TransformOp::Scale { sx: s, sy: s },
        ("scale", &[sx, sy]) => TransformOp::Scale { sx, sy },
        ("rotate", &[angle]) => TransformOp::Rotate { angle, center: None },
        ("rotate", &[angle, cx, cy]) => TransformOp::Rotate {
            angle,
            center: Some(Point::new(cx, cy)),
        },
        ("skewX", &[angle]) => TransformOp::SkewX(angle),
        ("skewY", &[angle]) => TransformOp::SkewY(angle),
        _ => {
            warn!(name, args = args.len(), "ignoring transform function");
            return None;
        }
    };
    Some(op)
}

/// Parse `style` declarations into `(property, value)` pairs, in order.
pub fn parse_style(source: &str) -> Result<Vec<(String, String)>, AttributeError> {
    let pairs = AttributeParser::parse(Rule::declarations, source)
        .map_err(|e| syntax_error("style", source, e))?;

    let mut decls = Vec::new();
    for decl in pairs.flatten().filter(|p| p.as_rule() == Rule::declaration) {
        let mut inner = decl.into_inner();
        let (Some(property), Some(value)) = (inner.next(), inner.next()) else {
            continue;
        };
        decls.push((
            property.as_str().trim().to_ascii_lowercase(),
            value.as_str().trim().to_string(),
        ));
    }
    Ok(decls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chained_transforms() {
        let ops = parse_transform("translate(10, 20) rotate(45) scale(2)").unwrap();
        assert_eq!(
            ops,
            vec![
                TransformOp::Translate { tx: 10.0, ty: 20.0 },
                TransformOp::Rotate {
                    angle: 45.0,
                    center: None
                },
                TransformOp::Scale { sx: 2.0, sy: 2.0 },
            ]
        );
    }

    #[test]
    fn parses_matrix_with_mixed_separators() {
        let ops = parse_transform("matrix(1 0,0 1 -5e1 .5)").unwrap();
        assert_eq!(ops, vec![TransformOp::Matrix([1.0, 0.0, 0.0, 1.0, -50.0, 0.5])]);
    }

    #[test]
    fn single_argument_translate_defaults_ty() {
        let ops = parse_transform("translate(7)").unwrap();
        assert_eq!(ops, vec![TransformOp::Translate { tx: 7.0, ty: 0.0 }]);
    }

    #[test]
    fn unknown_functions_are_identity() {
        let ops = parse_transform("perspective(3) translate(1,2)").unwrap();
        assert_eq!(ops, vec![TransformOp::Translate { tx: 1.0, ty: 2.0 }]);
        assert!(parse_transform("rotate(1, 2)").unwrap().is_empty());
    }

    #[test]
    fn empty_transform_is_identity() {
        assert!(parse_transform("").unwrap().is_empty());
        assert!(parse_transform_matrix("  ").unwrap().is_identity());
    }

    #[test]
    fn broken_transform_is_an_error() {
        let err = parse_transform("translate(10").unwrap_err();
        assert!(matches!(err, AttributeError::Syntax { attribute: "transform", .. }));
    }

    #[test]
    fn style_declarations() {
        let decls = parse_style("stroke:#FF0000; stroke-width : 0.5;;Fill: none ;").unwrap();
        assert_eq!(
            decls,
            vec![
                ("stroke".to_string(), "#FF0000".to_string()),
                ("stroke-width".to_string(), "0.5".to_string()),
                ("fill".to_string(), "none".to_string()),
            ]
        );
    }

    #[test]
    fn empty_style() {
        assert!(parse_style("").unwrap().is_empty());
        assert!(parse_style(" ; ").unwrap().is_empty());
    }
}
