//! # mdxgen
//!
//! Converts structured OLAP query models into MDX statements.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 QueryModel (TOML / JSON)                 │
//! │   (cube, axes, hierarchies, levels, filters, ordering)   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [convert]
//! ┌─────────────────────────────────────────────────────────┐
//! │   level sets → hierarchy sets → CrossJoin → named sets   │
//! │        (raw axis text goes through [parser])             │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │              SelectStatement (mdx parse tree)            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [token stream]
//! ┌─────────────────────────────────────────────────────────┐
//! │                        MDX text                          │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod convert;
pub mod mdx;
pub mod model;
pub mod parser;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::convert::{convert, to_select, ConvertError, ConvertOptions, LevelMembers};
    pub use crate::mdx::{
        // Constructors
        empty_set,
        func,
        ident,
        property,
        set,
        symbol,
        // Types
        AxisClause,
        AxisLocation,
        CubeRef,
        Expr,
        LevelRef,
        MemberRef,
        Name,
        SelectStatement,
        Syntax,
        WithSet,
    };
    pub use crate::model::{
        Filter, HierarchizeMode, QueryAxis, QueryHierarchy, QueryLevel, QueryModel, QueryScope,
        SetFilter, SortOrder, SortSpec, TopNFunction,
    };
    pub use crate::parser::{ExpressionParser, MdxParser, ParseError};
}

// Also export at crate root for convenience
pub use convert::{convert, to_select, ConvertError, ConvertOptions};
pub use mdx::{Expr, SelectStatement};
pub use model::QueryModel;
