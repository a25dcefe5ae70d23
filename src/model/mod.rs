//! Query model - the structured description a statement is generated from.
//!
//! The model is plain data: a cube, and per axis location an ordered list of
//! hierarchies, each an ordered list of active levels with member selections.
//! Axes and levels are both [`QueryScope`]s, carrying filters plus an optional
//! sort or hierarchize directive.
//!
//! Models can be built in code or deserialized (TOML or JSON):
//!
//! ```toml
//! cube = ["Sales"]
//!
//! [axes.rows]
//! non_empty = true
//!
//! [[axes.rows.hierarchies]]
//! name = "Product"
//!
//! [[axes.rows.hierarchies.levels]]
//! level = ["Product", "Product Family"]
//! inclusions = [["Product", "Drink"], ["Product", "Food"]]
//! ```

mod filter;
mod load;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::convert::ConvertError;
use crate::mdx::{AxisLocation, CubeRef, LevelRef, MemberRef};

pub use filter::{Filter, SetFilter, TopNFunction};
pub use load::ModelError;

// =============================================================================
// Sort / Hierarchize directives
// =============================================================================

/// Direction argument of `Order()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum SortOrder {
    Asc,
    Desc,
    /// Ascending, breaking the hierarchy
    BAsc,
    /// Descending, breaking the hierarchy
    BDesc,
}

impl SortOrder {
    pub fn name(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
            SortOrder::BAsc => "BASC",
            SortOrder::BDesc => "BDESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortOrder::Asc),
            "DESC" => Ok(SortOrder::Desc),
            "BASC" => Ok(SortOrder::BAsc),
            "BDESC" => Ok(SortOrder::BDesc),
            _ => Err(ConvertError::UnsupportedSortOrder(s.to_string())),
        }
    }
}

impl TryFrom<String> for SortOrder {
    type Error = ConvertError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sort a scope's set by an evaluation expression.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SortSpec {
    /// Expression text evaluated per tuple, e.g. `[Measures].[Unit Sales]`
    pub evaluation: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(evaluation: &str, order: SortOrder) -> Self {
        Self {
            evaluation: evaluation.into(),
            order,
        }
    }
}

/// How `Hierarchize()` orders a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum HierarchizeMode {
    /// Parents before children; written without a direction literal.
    Pre,
    /// Children before parents; written as `Hierarchize(set, POST)`.
    Post,
}

impl HierarchizeMode {
    pub fn name(&self) -> &'static str {
        match self {
            HierarchizeMode::Pre => "PRE",
            HierarchizeMode::Post => "POST",
        }
    }
}

impl FromStr for HierarchizeMode {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PRE" => Ok(HierarchizeMode::Pre),
            "POST" => Ok(HierarchizeMode::Post),
            _ => Err(ConvertError::UnsupportedHierarchizeMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for HierarchizeMode {
    type Error = ConvertError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// =============================================================================
// Scopes
// =============================================================================

/// Anything that can carry filters and an ordering directive.
pub trait QueryScope {
    fn filters(&self) -> &[Filter];
    fn sort(&self) -> Option<&SortSpec>;
    fn hierarchize(&self) -> Option<HierarchizeMode>;
}

/// One active level of a hierarchy and its member selection.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryLevel {
    pub level: LevelRef,
    #[serde(default)]
    pub inclusions: Vec<MemberRef>,
    #[serde(default)]
    pub exclusions: Vec<MemberRef>,
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub sort: Option<SortSpec>,
    #[serde(default)]
    pub hierarchize: Option<HierarchizeMode>,
}

impl QueryLevel {
    pub fn new(level: LevelRef) -> Self {
        Self {
            level,
            inclusions: vec![],
            exclusions: vec![],
            filters: vec![],
            sort: None,
            hierarchize: None,
        }
    }

    pub fn include(mut self, member: MemberRef) -> Self {
        self.inclusions.push(member);
        self
    }

    pub fn exclude(mut self, member: MemberRef) -> Self {
        self.exclusions.push(member);
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn sorted(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn hierarchized(mut self, mode: HierarchizeMode) -> Self {
        self.hierarchize = Some(mode);
        self
    }
}

impl QueryScope for QueryLevel {
    fn filters(&self) -> &[Filter] {
        &self.filters
    }
    fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }
    fn hierarchize(&self) -> Option<HierarchizeMode> {
        self.hierarchize
    }
}

/// A hierarchy placed on an axis: its active levels, in order.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryHierarchy {
    pub name: String,
    #[serde(default)]
    pub levels: Vec<QueryLevel>,
}

impl QueryHierarchy {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            levels: vec![],
        }
    }

    pub fn level(mut self, level: QueryLevel) -> Self {
        self.levels.push(level);
        self
    }
}

/// One axis of the query. Its location is the key it is stored under.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryAxis {
    #[serde(default)]
    pub non_empty: bool,
    #[serde(default)]
    pub hierarchies: Vec<QueryHierarchy>,
    /// Hand-written set expression replacing the hierarchies
    #[serde(default)]
    pub mdx: Option<String>,
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub sort: Option<SortSpec>,
    #[serde(default)]
    pub hierarchize: Option<HierarchizeMode>,
}

impl QueryAxis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn non_empty(mut self, non_empty: bool) -> Self {
        self.non_empty = non_empty;
        self
    }

    pub fn hierarchy(mut self, hierarchy: QueryHierarchy) -> Self {
        self.hierarchies.push(hierarchy);
        self
    }

    pub fn mdx(mut self, expression: &str) -> Self {
        self.mdx = Some(expression.into());
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn sorted(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn hierarchized(mut self, mode: HierarchizeMode) -> Self {
        self.hierarchize = Some(mode);
        self
    }

    /// True when there is nothing to place on the axis.
    pub fn is_empty(&self) -> bool {
        self.hierarchies.is_empty() && self.mdx.is_none()
    }
}

impl QueryScope for QueryAxis {
    fn filters(&self) -> &[Filter] {
        &self.filters
    }
    fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }
    fn hierarchize(&self) -> Option<HierarchizeMode> {
        self.hierarchize
    }
}

// =============================================================================
// Query
// =============================================================================

/// A complete query: a cube and its axes keyed by location.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryModel {
    pub cube: CubeRef,
    #[serde(default)]
    pub axes: BTreeMap<AxisLocation, QueryAxis>,
}

impl QueryModel {
    pub fn new(cube: CubeRef) -> Self {
        Self {
            cube,
            axes: BTreeMap::new(),
        }
    }

    pub fn with_axis(mut self, location: AxisLocation, axis: QueryAxis) -> Self {
        self.axes.insert(location, axis);
        self
    }

    pub fn axis(&self, location: AxisLocation) -> Option<&QueryAxis> {
        self.axes.get(&location)
    }
}
