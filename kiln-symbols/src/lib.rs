//! Symbol model and type resolution for the kiln generator host.
//!
//! Generators frequently need to locate types in the user's projects, e.g. the
//! model a controller should be scaffolded for. This crate provides:
//!
//! - [`TypeSymbol`], [`NamespaceSymbol`] and [`Compilation`] - the symbol tree
//!   of one compiled project unit
//! - [`ProjectGraph`] - the contract of the compiler's symbol service
//! - [`TypeResolver`] - enumeration and lookup across all compilations
//! - [`SymbolIndex`] - a TOML file standing in for a live symbol service

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod index;
mod resolver;
mod symbol;

pub use error::{Error, Result, SourceContext};
pub use index::{CompilationEntry, ProjectInfo, SymbolIndex, TypeDetails, TypeEntry};
pub use resolver::{AllTypes, ProjectGraph, TypeResolver};
pub use symbol::{Compilation, NamespaceSymbol, PATH_SEPARATOR, TypeSymbol, Visibility};
