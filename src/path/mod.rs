//! Path data: tokenizing and interpreting the compact path grammar.

pub mod interpreter;
pub mod tokenizer;

pub use interpreter::{Contour, PathInterpreter, interpret_path};
pub use tokenizer::{PathTokenizer, Token};
