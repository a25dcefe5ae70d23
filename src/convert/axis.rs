//! One query axis to a named set and the clause referencing it.

use tracing::debug;

use crate::mdx::{AxisClause, AxisLocation, Name, WithSet};
use crate::model::QueryAxis;
use crate::parser::ExpressionParser;

use super::{cross_join, decorate, hierarchy_set, ConvertOptions, ConvertResult};

/// What a converted axis contributes to the statement.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisOutput {
    /// `SET <prefix><LOCATION> AS <expr>`
    pub binding: WithSet,
    /// `[NON EMPTY] <prefix><LOCATION> ON <LOCATION>`
    pub clause: AxisClause,
}

/// Name of the set bound for an axis. Depends only on the location.
pub fn axis_identifier(location: AxisLocation, options: &ConvertOptions) -> Name {
    Name::simple(format!("{}{}", options.axis_prefix, location.name()))
}

/// Convert one axis. Returns `None` when there is nothing on it.
///
/// A raw `mdx` expression replaces the hierarchies and is parsed as
/// `{<text>}`. Otherwise each hierarchy set is cross-joined with the next.
/// Either way the axis filters and ordering apply before binding.
pub fn convert_axis(
    location: AxisLocation,
    axis: &QueryAxis,
    parser: &dyn ExpressionParser,
    options: &ConvertOptions,
) -> ConvertResult<Option<AxisOutput>> {
    let expr = match &axis.mdx {
        Some(text) => {
            debug!(axis = %location, "Parsing raw axis expression");
            parser.parse_expression(&format!("{{{}}}", text))?
        }
        None => {
            debug!(
                axis = %location,
                hierarchies = axis.hierarchies.len(),
                "Processing axis"
            );
            let sets = axis
                .hierarchies
                .iter()
                .map(|h| hierarchy_set(h, parser, options))
                .collect::<ConvertResult<Vec<_>>>()?;
            match cross_join(sets) {
                Some(expr) => expr,
                None => {
                    debug!(axis = %location, "Axis is empty; omitting it");
                    return Ok(None);
                }
            }
        }
    };

    let binding = WithSet::new(axis_identifier(location, options), decorate(expr, axis, parser)?);
    let clause = AxisClause::new(location, binding.identifier()).non_empty(axis.non_empty);

    Ok(Some(AxisOutput { binding, clause }))
}
