//! Feature layout and record encoding modules.

/// Record-to-vector encoding against a layout.
pub mod encoder;
/// Order-fixed trained column layout.
pub mod layout;
