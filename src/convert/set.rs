//! Level member selection to set expression.

use crate::mdx::expr::{func, property, set, Expr};
use crate::mdx::MemberRef;
use crate::model::QueryLevel;

use super::ConvertOptions;

/// `{m1, m2, ...}` in declaration order.
pub fn member_set(members: &[MemberRef]) -> Expr {
    set(members.iter().cloned().map(Expr::Member).collect())
}

/// The base set of a level minus its exclusions.
///
/// No inclusions means every member of the level. Exclusions only ever
/// subtract from this level's own base set.
pub fn level_set(level: &QueryLevel, options: &ConvertOptions) -> Expr {
    let base = if level.inclusions.is_empty() {
        property(
            Expr::Level(level.level.clone()),
            options.level_members.property_name(),
        )
    } else {
        member_set(&level.inclusions)
    };

    if level.exclusions.is_empty() {
        base
    } else {
        func("Except", vec![base, member_set(&level.exclusions)])
    }
}
