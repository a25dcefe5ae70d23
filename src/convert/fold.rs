//! Right-associative CrossJoin and Union folds.

use crate::mdx::expr::{empty_set, func, Expr};

use super::{ConvertError, ConvertResult};

/// `first op (second op (... op last))`, built from the back so depth costs no stack.
fn fold_right(name: &str, operands: Vec<Expr>) -> Option<Expr> {
    operands
        .into_iter()
        .rev()
        .reduce(|rest, first| func(name, vec![first, rest]))
}

/// Cross-join operands as `CrossJoin(a, CrossJoin(b, c))`.
///
/// Bare members are promoted to singleton sets first. One operand is
/// returned on its own; none gives `None`.
pub fn cross_join<I>(operands: I) -> Option<Expr>
where
    I: IntoIterator<Item = Expr>,
{
    let operands = operands.into_iter().map(Expr::into_set_operand).collect();
    fold_right("CrossJoin", operands)
}

/// Union of alternative selections, each cross-joined first.
///
/// An empty selection contributes `{}`.
pub fn union<I>(selections: I) -> ConvertResult<Expr>
where
    I: IntoIterator<Item = Vec<Expr>>,
{
    let parts: Vec<Expr> = selections
        .into_iter()
        .map(|selection| cross_join(selection).unwrap_or_else(empty_set))
        .collect();

    if parts.len() < 2 {
        return Err(ConvertError::UnionArity(parts.len()));
    }

    let count = parts.len();
    fold_right("Union", parts).ok_or(ConvertError::UnionArity(count))
}

/// `Hierarchize(Union(...))`
pub fn hierarchize_union<I>(selections: I) -> ConvertResult<Expr>
where
    I: IntoIterator<Item = Vec<Expr>>,
{
    Ok(func("Hierarchize", vec![union(selections)?]))
}
