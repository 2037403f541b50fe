//! Composition producers
//!
//! Rule chains cover single properties. The producers here let a validator
//! reach into object graphs:
//!
//! - [`NestedLink`]: delegate an optional sub-object to its own validator
//! - [`CollectionLink`]: validate every element, relabeling failures with
//!   their 1-based position
//! - [`RegistryLink`]: reuse an independent validator for a property
//! - [`CustomRule`]: write failures directly from a closure
//!
//! All of them return a fresh outcome per call; the owning
//! [`Validator`](crate::validator::Validator) merges it in registration order.

pub mod collection;
pub mod custom;
pub mod nested;
pub mod registry;

pub use collection::{CollectionLink, Elements};
pub use custom::CustomRule;
pub use nested::NestedLink;
pub use registry::RegistryLink;
