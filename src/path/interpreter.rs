//! Path interpreter.
//!
//! A state machine that consumes tokens from [`PathTokenizer`] and builds
//! contours in the path's local coordinates.
//!
//! # State
//!
//! - **current point**: where the pen is; the origin before any command
//! - **sub-path start**: where the last move (or close) left the pen
//! - **reflection point**: the implicit first control point of a following
//!   smooth curve (`S`, `T`)
//! - **open contour**: the contour under construction
//!
//! # Rules
//!
//! - A number with no command letter before it repeats the last command. A
//!   repeated move is a line (`M 0 0 10 10` draws to `10 10`).
//! - Close appends the sub-path start, finishes the contour as closed and opens
//!   an empty one. The next drawing command seeds it with the current point.
//! - Curves set the reflection point to the mirror of their last control point
//!   through their endpoint. Arcs set it to their endpoint. Every other command
//!   resets it to the current point.
//! - Curves and arcs always finish exactly on their declared endpoint.
//! - Finished contours with two points or fewer are dropped.

use crate::defaults::DEGENERATE_CONTOUR_POINTS;
use crate::errors::{PathError, SourceContext};
use crate::geometry::arc::{ArcResolution, resolve_arc, sample_arc};
use crate::geometry::bezier::{flatten_cubic, flatten_quadratic, reflect};
use crate::geometry::biarc::fit_biarc;
use crate::log::{debug, trace};
use crate::options::{CurveFitting, Sampling};
use crate::types::Point;

use super::tokenizer::{Lookahead, PathTokenizer};

/// One connected piecewise-linear boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour {
    pub points: Vec<Point>,
    /// Explicitly closed, or first and last points coincide.
    pub closed: bool,
}

impl Contour {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<Point>, closed: bool) -> Self {
        let mut contour = Contour::new();
        contour.extend(points);
        contour.closed = closed;
        contour
    }

    /// Append a point unless it repeats the last one.
    pub fn push(&mut self, p: Point) {
        if self.points.last() != Some(&p) {
            self.points.push(p);
        }
    }

    pub fn extend(&mut self, points: impl IntoIterator<Item = Point>) {
        for p in points {
            self.push(p);
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First and last points are the same.
    pub fn ends_meet(&self) -> bool {
        self.points.len() > 1 && self.points.first() == self.points.last()
    }
}

/// Interprets one path string. Not reusable across strings.
#[derive(Debug)]
pub struct PathInterpreter<'a> {
    tokens: PathTokenizer<'a>,
    sampling: Sampling,
    fitting: CurveFitting,

    current: Point,
    subpath_start: Point,
    reflection: Point,
    open: Contour,
    contours: Vec<Contour>,

    /// Command a bare number repeats; a move is stored as its line form.
    last_command: Option<char>,
}

impl<'a> PathInterpreter<'a> {
    pub fn new(data: &'a str, sampling: Sampling, fitting: CurveFitting) -> Self {
        Self {
            tokens: PathTokenizer::new(data),
            sampling,
            fitting,
            current: Point::ORIGIN,
            subpath_start: Point::ORIGIN,
            reflection: Point::ORIGIN,
            open: Contour::new(),
            contours: Vec::new(),
            last_command: None,
        }
    }

    /// Consume the whole path and return its contours in source order.
    pub fn run(mut self) -> Result<Vec<Contour>, PathError> {
        loop {
            let command = match self.tokens.lookahead() {
                Lookahead::End => break,
                Lookahead::Command(_) => match self.tokens.next_command() {
                    Some(c) => c,
                    None => break,
                },
                Lookahead::Number => match self.last_command {
                    Some(c) if !matches!(c, 'Z' | 'z') => c,
                    _ => return Err(self.expected_command()),
                },
            };
            self.execute(command)?;
        }
        self.finish_contour();
        Ok(self.contours)
    }

    fn source_context(&self) -> SourceContext {
        SourceContext::new("path data", self.tokens.source())
    }

    fn expected_command(&mut self) -> PathError {
        let src = self.source_context().named_source();
        let span = match self.tokens.extract_number() {
            Some(t) => (t.start, t.text.len()).into(),
            None => (self.tokens.position(), 0).into(),
        };
        PathError::ExpectedCommand { src, span }
    }

    fn read_number(&mut self, command: char) -> Result<f64, PathError> {
        match self.tokens.extract_number() {
            Some(token) => token.to_f64(self.tokens.source()),
            None => Err(PathError::MissingArgument {
                command,
                src: self.source_context().named_source(),
                span: (self.tokens.position(), 0).into(),
            }),
        }
    }

    fn read_flag(&mut self, command: char) -> Result<bool, PathError> {
        match self.tokens.extract_flag() {
            Some(token) => Ok(token.to_f64(self.tokens.source())? != 0.0),
            None => Err(PathError::MissingArgument {
                command,
                src: self.source_context().named_source(),
                span: (self.tokens.position(), 0).into(),
            }),
        }
    }

    /// Read a coordinate pair, resolving it against the current point for
    /// relative commands.
    fn read_point(&mut self, command: char) -> Result<Point, PathError> {
        let x = self.read_number(command)?;
        let y = self.read_number(command)?;
        Ok(if command.is_ascii_lowercase() {
            Point::new(self.current.x + x, self.current.y + y)
        } else {
            Point::new(x, y)
        })
    }

    fn execute(&mut self, command: char) -> Result<(), PathError> {
        trace!(%command, current = %self.current, "path command");
        let relative = command.is_ascii_lowercase();
        match command.to_ascii_uppercase() {
            'M' => {
                let p = self.read_point(command)?;
                self.move_to(p);
                self.last_command = Some(if relative { 'l' } else { 'L' });
                return Ok(());
            }
            'L' => {
                let p = self.read_point(command)?;
                self.line_to(p);
            }
            'H' => {
                let x = self.read_number(command)?;
                let x = if relative { self.current.x + x } else { x };
                self.line_to(Point::new(x, self.current.y));
            }
            'V' => {
                let y = self.read_number(command)?;
                let y = if relative { self.current.y + y } else { y };
                self.line_to(Point::new(self.current.x, y));
            }
            'C' => {
                let c1 = self.read_point(command)?;
                let c2 = self.read_point(command)?;
                let p = self.read_point(command)?;
                self.cubic_to(c1, c2, p);
            }
            'S' => {
                let c1 = self.reflection;
                let c2 = self.read_point(command)?;
                let p = self.read_point(command)?;
                self.cubic_to(c1, c2, p);
            }
            'Q' => {
                let c = self.read_point(command)?;
                let p = self.read_point(command)?;
                self.quadratic_to(c, p);
            }
            'T' => {
                let c = self.reflection;
                let p = self.read_point(command)?;
                self.quadratic_to(c, p);
            }
            'A' => {
                let rx = self.read_number(command)?;
                let ry = self.read_number(command)?;
                let rotation = self.read_number(command)?;
                let large_arc = self.read_flag(command)?;
                let sweep = self.read_flag(command)?;
                let p = self.read_point(command)?;
                self.arc_to(rx, ry, rotation, large_arc, sweep, p);
            }
            'Z' => self.close(),
            _ => {}
        }
        self.last_command = Some(command);
        Ok(())
    }

    /// Seed an empty contour with the pen position before drawing.
    fn begin_segment(&mut self) {
        if self.open.is_empty() {
            self.open.push(self.current);
        }
    }

    fn move_to(&mut self, p: Point) {
        self.finish_contour();
        self.current = p;
        self.subpath_start = p;
        self.reflection = p;
        self.open.push(p);
    }

    fn line_to(&mut self, p: Point) {
        self.begin_segment();
        self.open.push(p);
        self.current = p;
        self.reflection = p;
    }

    fn cubic_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.begin_segment();
        let from = self.current;
        let samples = match self.fitting {
            CurveFitting::Flatten => flatten_cubic(from, c1, c2, p, &self.sampling),
            CurveFitting::Biarc => match fit_biarc(from, c1, p, c2) {
                Some(biarc) => biarc.sample(&self.sampling),
                None => flatten_cubic(from, c1, c2, p, &self.sampling),
            },
        };
        self.open.extend(samples);
        self.open.push(p);
        self.current = p;
        self.reflection = reflect(c2, p);
    }

    fn quadratic_to(&mut self, c: Point, p: Point) {
        self.begin_segment();
        let samples = flatten_quadratic(self.current, c, p, &self.sampling);
        self.open.extend(samples);
        self.open.push(p);
        self.current = p;
        self.reflection = reflect(c, p);
    }

    fn arc_to(&mut self, rx: f64, ry: f64, rotation: f64, large_arc: bool, sweep: bool, p: Point) {
        match resolve_arc(self.current, p, rx, ry, rotation, large_arc, sweep) {
            ArcResolution::Omit => {}
            ArcResolution::Line => {
                self.begin_segment();
                self.open.push(p);
            }
            ArcResolution::Arc(spec) => {
                self.begin_segment();
                self.open.extend(sample_arc(&spec, p, &self.sampling));
            }
        }
        self.current = p;
        self.reflection = p;
    }

    fn close(&mut self) {
        if !self.open.is_empty() {
            self.open.push(self.subpath_start);
            self.open.closed = true;
            self.finish_contour();
        }
        self.current = self.subpath_start;
        self.reflection = self.current;
    }

    /// Move the open contour to the finished list, or drop it if degenerate.
    fn finish_contour(&mut self) {
        let mut contour = std::mem::take(&mut self.open);
        if contour.len() <= DEGENERATE_CONTOUR_POINTS {
            if !contour.is_empty() {
                debug!(points = contour.len(), "dropping degenerate contour");
            }
            return;
        }
        contour.closed |= contour.ends_meet();
        self.contours.push(contour);
    }
}

/// Interpret path data into contours in its own coordinate system.
pub fn interpret_path(
    data: &str,
    sampling: &Sampling,
    fitting: CurveFitting,
) -> Result<Vec<Contour>, PathError> {
    PathInterpreter::new(data, *sampling, fitting).run()
}
