//! Query model to MDX statement conversion.
//!
//! This is where query semantics are decided. Each stage is a free function
//! returning a fresh tree:
//!
//! ```text
//! QueryLevel ──► level_set ──► filters ──► Order / Hierarchize
//!                                               │
//! QueryHierarchy ──► {level sets...} ◄──────────┘
//!                          │
//! QueryAxis ──► CrossJoin(h1, CrossJoin(h2, ...)) ──► filters ──► decorator
//!                          │                                          │
//!                   raw mdx "{...}"                     WITH SET Axis<LOCATION>
//!                                                                      │
//! QueryModel ──► Columns, Rows, Filter ──► SelectStatement ◄───────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use mdxgen::convert::to_select;
//! use mdxgen::mdx::{AxisLocation, CubeRef, LevelRef};
//! use mdxgen::model::{QueryAxis, QueryHierarchy, QueryLevel, QueryModel};
//!
//! let query = QueryModel::new(CubeRef::new(["Sales"])).with_axis(
//!     AxisLocation::Columns,
//!     QueryAxis::new().hierarchy(
//!         QueryHierarchy::new("Measures").level(QueryLevel::new(LevelRef::new(["Measures"]))),
//!     ),
//! );
//!
//! let stmt = to_select(&query)?;
//! println!("{}", stmt.to_mdx());
//! ```

mod axis;
mod decorate;
mod error;
mod fold;
mod hierarchy;
mod set;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::mdx::{AxisLocation, SelectStatement};
use crate::model::QueryModel;
use crate::parser::{ExpressionParser, MdxParser};

pub use axis::{axis_identifier, convert_axis, AxisOutput};
pub use decorate::{decorate, Decorator};
pub use error::{ConvertError, ConvertResult};
pub use fold::{cross_join, hierarchize_union, union};
pub use hierarchy::hierarchy_set;
pub use set::{level_set, member_set};

// ============================================================================
// Options
// ============================================================================

/// Which property of a level selects "every member".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelMembers {
    /// `Level.AllMembers`, including calculated members.
    #[default]
    AllMembers,
    /// `Level.Members`
    Members,
}

impl LevelMembers {
    pub fn property_name(&self) -> &'static str {
        match self {
            LevelMembers::AllMembers => "AllMembers",
            LevelMembers::Members => "Members",
        }
    }
}

/// Options for conversion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Prefix of the named set bound for each axis, e.g. `Axis` → `AxisROWS`.
    pub axis_prefix: String,

    pub level_members: LevelMembers,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            axis_prefix: "Axis".into(),
            level_members: LevelMembers::default(),
        }
    }
}

impl ConvertOptions {
    pub fn with_axis_prefix(mut self, prefix: &str) -> Self {
        self.axis_prefix = prefix.into();
        self
    }

    pub fn with_level_members(mut self, level_members: LevelMembers) -> Self {
        self.level_members = level_members;
        self
    }
}

// ============================================================================
// Assembler
// ============================================================================

/// Axes placed in the SELECT list, in output order.
const SELECT_AXES: [AxisLocation; 2] = [AxisLocation::Columns, AxisLocation::Rows];

/// Convert a query model into a SELECT statement.
///
/// Columns and Rows are converted in that order, then the Filter axis (if it
/// has anything on it) becomes the WHERE clause. Bindings appear in the same
/// order. The first error aborts the conversion.
pub fn convert(
    query: &QueryModel,
    parser: &dyn ExpressionParser,
    options: &ConvertOptions,
) -> ConvertResult<SelectStatement> {
    let mut stmt = SelectStatement::new(query.cube.clone());

    for location in SELECT_AXES {
        let Some(axis) = query.axis(location) else {
            continue;
        };
        if let Some(output) = convert_axis(location, axis, parser, options)? {
            stmt.with.push(output.binding);
            stmt.axes.push(output.clause);
        }
    }

    if let Some(axis) = query.axis(AxisLocation::Filter).filter(|a| !a.is_empty()) {
        if let Some(output) = convert_axis(AxisLocation::Filter, axis, parser, options)? {
            stmt.with.push(output.binding);
            stmt.filter = Some(output.clause);
        }
    }

    for (location, axis) in &query.axes {
        if !SELECT_AXES.contains(location) && *location != AxisLocation::Filter && !axis.is_empty() {
            warn!(axis = %location, "Axis location is not placed in the statement; ignoring it");
        }
    }

    debug!(
        cube = %query.cube,
        axes = stmt.axes.len(),
        slicer = stmt.filter.is_some(),
        "Converted query"
    );

    Ok(stmt)
}

/// Convert with the built-in parser and default options.
pub fn to_select(query: &QueryModel) -> ConvertResult<SelectStatement> {
    convert(query, &MdxParser, &ConvertOptions::default())
}
