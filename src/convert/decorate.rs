//! Scope decoration: filters, then ordering.

use tracing::{trace, warn};

use crate::mdx::expr::{func, symbol, Expr};
use crate::model::{HierarchizeMode, QueryScope, SetFilter, SortSpec};
use crate::parser::ExpressionParser;

use super::ConvertResult;

/// The single ordering directive applied to a scope's set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decorator<'a> {
    None,
    Sort(&'a SortSpec),
    Hierarchize(HierarchizeMode),
}

impl<'a> Decorator<'a> {
    /// Pick the directive for a scope. A sort always beats a hierarchize.
    pub fn resolve<S: QueryScope + ?Sized>(scope: &'a S) -> Self {
        match (scope.sort(), scope.hierarchize()) {
            (Some(sort), Some(mode)) => {
                warn!(
                    evaluation = %sort.evaluation,
                    hierarchize = mode.name(),
                    "Scope is both sorted and hierarchized; dropping the hierarchize"
                );
                Decorator::Sort(sort)
            }
            (Some(sort), None) => Decorator::Sort(sort),
            (None, Some(mode)) => Decorator::Hierarchize(mode),
            (None, None) => Decorator::None,
        }
    }

    /// Wrap the set in `Order(...)` or `Hierarchize(...)`.
    pub fn apply(self, set: Expr) -> Expr {
        match self {
            Decorator::None => set,
            Decorator::Sort(sort) => {
                trace!(evaluation = %sort.evaluation, order = %sort.order, "Applying Order");
                func(
                    "Order",
                    vec![set, symbol(&sort.evaluation), symbol(sort.order.name())],
                )
            }
            Decorator::Hierarchize(HierarchizeMode::Pre) => {
                trace!("Applying Hierarchize");
                func("Hierarchize", vec![set])
            }
            Decorator::Hierarchize(HierarchizeMode::Post) => {
                trace!("Applying Hierarchize POST");
                func(
                    "Hierarchize",
                    vec![set, symbol(HierarchizeMode::Post.name())],
                )
            }
        }
    }
}

/// Run a scope's filters over the set in declared order, then its decorator.
pub fn decorate<S: QueryScope + ?Sized>(
    set: Expr,
    scope: &S,
    parser: &dyn ExpressionParser,
) -> ConvertResult<Expr> {
    let mut expr = set;
    for filter in scope.filters() {
        expr = filter.apply(expr, parser)?;
    }
    Ok(Decorator::resolve(scope).apply(expr))
}
