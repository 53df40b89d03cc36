//! Structured-text manipulation of routing files.
//!
//! - [`RoutingManipulator`] prepends resource imports to a YAML routing file
//! - [`append_route`] appends a single route to a YAML, XML or PHP routing file
//! - [`php`] holds the tokenizer used to find insertion points in PHP files

pub mod php;
mod routes;
mod routing;

pub use routes::{RouteEntry, append_route, routing_file};
pub use routing::{MergeState, RoutingManipulator, resource_key};
