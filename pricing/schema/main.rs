//! Attribute schema modules.

/// Attribute specs, domains, and the validated schema table.
pub mod attributes;
/// Built-in housing catalog.
pub mod catalog;
