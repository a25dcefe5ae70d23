use tracing::debug;

use crate::mdx::expr::{set, Expr};
use crate::model::QueryHierarchy;
use crate::parser::ExpressionParser;

use super::{decorate, level_set, ConvertOptions, ConvertResult};

/// `{level1, level2, ...}` with each level set filtered and decorated.
///
/// A single level is still wrapped, and a hierarchy with no active levels
/// yields `{}`.
pub fn hierarchy_set(
    hierarchy: &QueryHierarchy,
    parser: &dyn ExpressionParser,
    options: &ConvertOptions,
) -> ConvertResult<Expr> {
    debug!(
        hierarchy = %hierarchy.name,
        levels = hierarchy.levels.len(),
        "Building hierarchy set"
    );

    let levels = hierarchy
        .levels
        .iter()
        .map(|level| decorate(level_set(level, options), level, parser))
        .collect::<ConvertResult<Vec<_>>>()?;

    Ok(set(levels))
}
