//! `enumgen_core` keeps the constants of string-backed enum types in sync with
//! the variants listed in a directive comment above the type.
//!
//! ```go
//! //variants=foo,bar,baz
//! type Enum string
//! ```
//!
//! A synthesis pass generates the block directly after the type, marked so a
//! later pass can find and regenerate it in place:
//!
//! ```go
//! //generated_for=Enum
//! const (
//! 	EnumFoo Enum = "foo"
//! 	EnumBar Enum = "bar"
//! 	EnumBaz Enum = "baz"
//! )
//! ```
//!
//! ## Processing Pipeline
//!
//! ```text
//! source file
//!   -> Lexer and loader (top-level declarations with their leading comments)
//!   -> Comment binding (side table keyed by node id, or inline decorations)
//!   -> Synthesis pass (directive, eligibility, block, locate, insert or replace)
//!   -> Renderer (source text)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: configuration loading from `enumgen.toml`.
//! - [`project`]: project scanning and directory walking.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use enumgen_core::project::scan_project_with_config;
//! use enumgen_core::{check_project, compute_updates, write_updates};
//! use std::path::Path;
//!
//! let ctx = scan_project_with_config(Path::new(".")).unwrap();
//!
//! let result = check_project(&ctx).unwrap();
//! if !result.is_ok() {
//!     eprintln!("{} stale file(s) found", result.stale.len());
//! }
//!
//! let updates = compute_updates(&ctx).unwrap();
//! write_updates(&updates).unwrap();
//! ```

pub use comments::*;
pub use cursor::*;
pub use directive::*;
pub use eligibility::*;
pub use engine::*;
pub use error::*;
pub use loader::*;
pub use locator::*;
pub use mutator::*;
pub use pass::*;
pub use render::*;
pub use synthesizer::*;
pub use syntax::*;

mod comments;
pub mod config;
mod cursor;
mod directive;
mod eligibility;
mod engine;
#[allow(unused_assignments)]
mod error;
pub(crate) mod lexer;
mod loader;
mod locator;
mod mutator;
mod pass;
pub mod project;
mod render;
mod synthesizer;
mod syntax;

#[cfg(test)]
mod __fixtures;
