//! Expression parsing for hand-written MDX fragments.
//!
//! The converter never parses text itself. Raw axis expressions and textual
//! filter conditions go through an [`ExpressionParser`], so callers can plug
//! in the parser of the engine they target. [`MdxParser`] is the default.
//!
//! # Example
//!
//! ```ignore
//! use mdxgen::parser::{ExpressionParser, MdxParser};
//!
//! let expr = MdxParser.parse_expression("{[Product].[Drink], [Product].[Food]}")?;
//! assert_eq!(expr.to_mdx(), "{Product.Drink, Product.Food}");
//! ```

pub mod grammar;

use std::ops::Range;

use crate::mdx::Expr;

/// A malformed expression, with the byte range where parsing failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Syntax error in '{input}' at {span:?}: {message}")]
pub struct ParseError {
    pub input: String,
    pub span: Range<usize>,
    pub message: String,
}

impl ParseError {
    pub fn new(input: &str, span: Range<usize>, message: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            span,
            message: message.into(),
        }
    }
}

/// Turns expression text into an expression tree.
pub trait ExpressionParser: Send + Sync {
    fn parse_expression(&self, text: &str) -> Result<Expr, ParseError>;
}

impl<F> ExpressionParser for F
where
    F: Fn(&str) -> Result<Expr, ParseError> + Send + Sync,
{
    fn parse_expression(&self, text: &str) -> Result<Expr, ParseError> {
        self(text)
    }
}

/// The built-in MDX expression parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct MdxParser;

impl ExpressionParser for MdxParser {
    fn parse_expression(&self, text: &str) -> Result<Expr, ParseError> {
        use chumsky::error::Rich;
        use chumsky::span::Span as _;
        use chumsky::Parser as _;

        let (expr, errs) = grammar::parser().parse(text).into_output_errors();

        if let Some(e) = errs.into_iter().next() {
            let e: Rich<'_, char> = e;
            let span = e.span();
            return Err(ParseError::new(
                text,
                span.start()..span.end(),
                e.to_string(),
            ));
        }

        expr.ok_or_else(|| ParseError::new(text, 0..text.len(), "no expression found"))
    }
}
