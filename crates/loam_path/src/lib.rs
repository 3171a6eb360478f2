//! Deep-path addressing into nested loam values.
//!
//! This crate provides:
//! - the path data model ([`Path`], [`PathToken`], [`PathKey`],
//!   [`ContainerKind`], [`PathSpec`]) and the [`tokenize`] scanner;
//! - the resolver operations ([`find`], [`get`], [`get_or`], [`has`],
//!   [`set`], [`set_with`], [`unset`], [`update`], [`update_with`]).
//!
//! # Path strings
//!
//! ```
//! use loam_path::{get, set};
//! use loam_value::Value;
//!
//! let mut doc = Value::empty_map();
//! set(&mut doc, "users[0].name", "ada").unwrap();
//! assert_eq!(get(&doc, "users[0].name"), Value::string("ada"));
//! ```
//!
//! Dots delimit map keys, `[n]` addresses list positions (negative counts
//! from the end on reads), and `\.` escapes a literal dot inside a key.

mod errors;
mod resolve;
mod scanner;
mod token;

pub use errors::PathError;
pub use resolve::{
    find, get, get_or, has, set, set_with, unset, update, update_with, Customizer,
};
pub use token::{tokenize, ContainerKind, Path, PathKey, PathSpec, PathToken};
