//! SELECT statement - the root of an MDX parse tree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::expr::Expr;
use super::name::{CubeRef, Name};
use super::token::{Token, TokenStream};

// =============================================================================
// Axis Location
// =============================================================================

/// Where an axis is placed in the result grid.
///
/// Declaration order is the canonical processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisLocation {
    Columns,
    Rows,
    Pages,
    Chapters,
    Sections,
    /// The slicer; written as a WHERE clause rather than an `ON` axis.
    Filter,
}

impl AxisLocation {
    /// Upper-case name used in `ON <location>` and in named-set identifiers.
    pub fn name(&self) -> &'static str {
        match self {
            AxisLocation::Columns => "COLUMNS",
            AxisLocation::Rows => "ROWS",
            AxisLocation::Pages => "PAGES",
            AxisLocation::Chapters => "CHAPTERS",
            AxisLocation::Sections => "SECTIONS",
            AxisLocation::Filter => "FILTER",
        }
    }
}

impl fmt::Display for AxisLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AxisLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "COLUMNS" => Ok(AxisLocation::Columns),
            "ROWS" => Ok(AxisLocation::Rows),
            "PAGES" => Ok(AxisLocation::Pages),
            "CHAPTERS" => Ok(AxisLocation::Chapters),
            "SECTIONS" => Ok(AxisLocation::Sections),
            "FILTER" | "SLICER" => Ok(AxisLocation::Filter),
            _ => Err(format!("unknown axis location '{}'", s)),
        }
    }
}

// =============================================================================
// WITH SET
// =============================================================================

/// A statement-scoped named set: `SET name AS expr`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithSet {
    pub name: Name,
    pub expr: Expr,
}

impl WithSet {
    pub fn new(name: Name, expr: Expr) -> Self {
        Self { name, expr }
    }

    /// An identifier expression referring to this set.
    pub fn identifier(&self) -> Expr {
        Expr::Identifier(self.name.clone())
    }

    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();
        ts.push(Token::Set)
            .space()
            .append(&self.name.to_tokens())
            .space()
            .push(Token::As)
            .space()
            .append(&self.expr.to_tokens());
        ts
    }
}

// =============================================================================
// Axis Clause
// =============================================================================

/// One axis of the SELECT list, or the WHERE slicer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisClause {
    pub location: AxisLocation,
    pub non_empty: bool,
    pub expr: Expr,
    pub dimension_properties: Vec<Name>,
}

impl AxisClause {
    pub fn new(location: AxisLocation, expr: Expr) -> Self {
        Self {
            location,
            non_empty: false,
            expr,
            dimension_properties: vec![],
        }
    }

    pub fn non_empty(mut self, non_empty: bool) -> Self {
        self.non_empty = non_empty;
        self
    }

    /// Tokens for the clause as it appears in the SELECT list.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();
        if self.non_empty {
            ts.push(Token::NonEmpty).space();
        }
        ts.append(&self.expr.to_tokens());
        if !self.dimension_properties.is_empty() {
            ts.space().push(Token::DimensionProperties).space();
            append_names(&mut ts, &self.dimension_properties);
        }
        ts.space()
            .push(Token::On)
            .space()
            .push(Token::Symbol(self.location.name().into()));
        ts
    }
}

fn append_names(ts: &mut TokenStream, names: &[Name]) {
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            ts.comma().space();
        }
        ts.append(&name.to_tokens());
    }
}

// =============================================================================
// SELECT
// =============================================================================

/// A complete MDX SELECT statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[must_use = "SelectStatement has no effect until serialized with to_mdx()"]
pub struct SelectStatement {
    pub with: Vec<WithSet>,
    pub axes: Vec<AxisClause>,
    pub cube: CubeRef,
    pub filter: Option<AxisClause>,
    pub cell_properties: Vec<Name>,
}

impl SelectStatement {
    pub fn new(cube: CubeRef) -> Self {
        Self {
            with: vec![],
            axes: vec![],
            cube,
            filter: None,
            cell_properties: vec![],
        }
    }

    /// Look up a named set by identifier.
    pub fn binding(&self, name: &Name) -> Option<&WithSet> {
        self.with.iter().find(|w| &w.name == name)
    }

    /// The clause placed on the given location, including the slicer.
    pub fn axis(&self, location: AxisLocation) -> Option<&AxisClause> {
        if location == AxisLocation::Filter {
            return self.filter.as_ref();
        }
        self.axes.iter().find(|a| a.location == location)
    }

    /// Convert to token stream.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();

        // WITH
        if !self.with.is_empty() {
            ts.push(Token::With);
            for with_set in &self.with {
                ts.newline().append(&with_set.to_tokens());
            }
            ts.newline();
        }

        // SELECT
        ts.push(Token::Select);
        for (i, axis) in self.axes.iter().enumerate() {
            if i > 0 {
                ts.comma();
            }
            ts.newline().append(&axis.to_tokens());
        }

        // FROM
        ts.newline()
            .push(Token::From)
            .space()
            .append(&self.cube.to_tokens());

        // WHERE
        if let Some(filter) = &self.filter {
            ts.newline()
                .push(Token::Where)
                .space()
                .append(&filter.expr.to_tokens());
        }

        // CELL PROPERTIES
        if !self.cell_properties.is_empty() {
            ts.newline().push(Token::CellProperties).space();
            append_names(&mut ts, &self.cell_properties);
        }

        ts
    }

    /// Generate MDX text.
    pub fn to_mdx(&self) -> String {
        self.to_tokens().serialize()
    }
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_mdx())
    }
}
