//! Set filters - transforms applied to a scope's set before ordering.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::mdx::expr::{func, infix, lit_int, lit_str, prefix, property, Expr};
use crate::mdx::Name;
use crate::parser::{ExpressionParser, ParseError};

/// A transform that takes a set expression and returns a (possibly filtered) one.
///
/// Filters that accept condition text parse it with the supplied parser, and
/// syntax errors are returned unchanged.
pub trait SetFilter: fmt::Debug + Send + Sync {
    fn apply(&self, set: Expr, parser: &dyn ExpressionParser) -> Result<Expr, ParseError>;
}

/// Ranking functions usable by [`Filter::TopN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TopNFunction {
    TopCount,
    TopPercent,
    TopSum,
    BottomCount,
    BottomPercent,
    BottomSum,
}

impl TopNFunction {
    pub fn name(&self) -> &'static str {
        match self {
            TopNFunction::TopCount => "TopCount",
            TopNFunction::TopPercent => "TopPercent",
            TopNFunction::TopSum => "TopSum",
            TopNFunction::BottomCount => "BottomCount",
            TopNFunction::BottomPercent => "BottomPercent",
            TopNFunction::BottomSum => "BottomSum",
        }
    }
}

/// Built-in filters, plus an escape hatch for caller-defined transforms.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Filter {
    /// `TopCount(set, n[, expression])` and friends.
    TopN {
        function: TopNFunction,
        n: i64,
        #[serde(default)]
        expression: Option<String>,
    },

    /// Keep (or drop) members whose name is one of `names`.
    Name {
        hierarchy: Name,
        names: Vec<String>,
        #[serde(default)]
        exclude: bool,
    },

    /// Keep (or drop) members whose name contains one of `patterns`.
    NameLike {
        hierarchy: Name,
        patterns: Vec<String>,
        #[serde(default)]
        exclude: bool,
    },

    /// `Filter(set, condition)` with a hand-written condition.
    Generic { condition: String },

    #[serde(skip)]
    Custom(Arc<dyn SetFilter>),
}

impl Filter {
    pub fn top_n(function: TopNFunction, n: i64, expression: Option<&str>) -> Self {
        Filter::TopN {
            function,
            n,
            expression: expression.map(String::from),
        }
    }

    pub fn generic(condition: &str) -> Self {
        Filter::Generic {
            condition: condition.into(),
        }
    }

    pub fn custom(filter: impl SetFilter + 'static) -> Self {
        Filter::Custom(Arc::new(filter))
    }
}

/// `<hierarchy>.CurrentMember.Name`
fn current_name(hierarchy: &Name) -> Expr {
    property(
        property(Expr::Identifier(hierarchy.clone()), "CurrentMember"),
        "Name",
    )
}

/// Fold conditions into `(a OR b OR ...)`, optionally negated, and filter the set by it.
fn filter_by_any(set: Expr, conditions: Vec<Expr>, exclude: bool) -> Expr {
    let Some(condition) = conditions.into_iter().reduce(|acc, c| infix("OR", acc, c)) else {
        return set;
    };
    let condition = if exclude {
        prefix("NOT", condition)
    } else {
        condition
    };
    func("Filter", vec![set, condition])
}

impl SetFilter for Filter {
    fn apply(&self, set: Expr, parser: &dyn ExpressionParser) -> Result<Expr, ParseError> {
        match self {
            Filter::TopN {
                function,
                n,
                expression,
            } => {
                let mut args = vec![set, lit_int(*n)];
                if let Some(text) = expression {
                    args.push(parser.parse_expression(text)?);
                }
                Ok(func(function.name(), args))
            }

            Filter::Name {
                hierarchy,
                names,
                exclude,
            } => {
                let conditions = names
                    .iter()
                    .map(|n| infix("=", current_name(hierarchy), lit_str(n)))
                    .collect();
                Ok(filter_by_any(set, conditions, *exclude))
            }

            Filter::NameLike {
                hierarchy,
                patterns,
                exclude,
            } => {
                let conditions = patterns
                    .iter()
                    .map(|p| {
                        let position = func("InStr", vec![current_name(hierarchy), lit_str(p)]);
                        infix(">", position, lit_int(0))
                    })
                    .collect();
                Ok(filter_by_any(set, conditions, *exclude))
            }

            Filter::Generic { condition } => {
                let condition = parser.parse_expression(condition)?;
                Ok(func("Filter", vec![set, condition]))
            }

            Filter::Custom(filter) => filter.apply(set, parser),
        }
    }
}
