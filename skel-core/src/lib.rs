//! Core types and conventions for the skel module generator.
//!
//! This crate provides the pieces shared by the generators, the routing
//! manipulators and the command line: naming rules, validators, generation
//! requests, project configuration and the error type.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod config;
pub mod conventions;
mod error;
pub mod file;
mod format;
pub mod naming;
mod request;
pub mod spec;
pub mod validate;

pub use config::Config;
pub use conventions::{Conventions, conventions};
pub use error::{Error, Result};
pub use format::{Format, License, TemplateFormat};
pub use request::{
    ArtifactKind, ArtifactRequest, Container, ControllerRequest, CrudRequest, EntityRequest,
    FormRequest, ModuleRequest, default_route_prefix, entity_class, entity_file_stem,
};
pub use spec::{ActionSpec, Actions, EntityMetadata, FieldSpec, Fields, TemplateRef};
