//! Core type definitions for Estima.
//!
//! This module contains the fundamental types the statistics layer consumes:
//! - Identifier types ([`TableId`])
//! - Value types ([`Value`], [`LogicalType`])
//! - Schema and row types ([`ColumnDef`], [`TableSchema`], [`Row`])

mod id;
mod logical_type;
mod row;
mod schema;
mod value;

pub use id::TableId;
pub use logical_type::LogicalType;
pub use row::Row;
pub use schema::{ColumnDef, TableSchema};
pub use value::Value;
