//! Validation trait definition

/// Implemented by every configuration structure.
///
/// Errors are plain messages; `Config::validate` wraps them with the section name.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
