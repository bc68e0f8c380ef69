//! Configuration data models
//!
//! This module defines all configuration structures used by the access core.

pub mod access;
pub mod backend;
pub mod logging;

pub use access::*;
pub use backend::*;
pub use logging::*;

/// Default backend base URL (a local bench site)
pub fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

/// Remote method returning the current principal's roles
pub fn default_roles_endpoint() -> String {
    "library_app.api.get_current_user_roles".to_string()
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Where denied principals are sent
pub fn default_fallback_path() -> String {
    "/".to_string()
}

/// Where unauthenticated principals are sent
pub fn default_login_path() -> String {
    "/login".to_string()
}

pub fn default_fallback_message() -> String {
    "You do not have permission to access this page.".to_string()
}

pub fn default_librarian_roles() -> Vec<String> {
    vec![
        "Librarian".to_string(),
        "Library Manager".to_string(),
        "System Manager".to_string(),
    ]
}

pub fn default_member_roles() -> Vec<String> {
    vec![
        "Library Member".to_string(),
        "Librarian".to_string(),
        "Library Manager".to_string(),
        "System Manager".to_string(),
    ]
}

pub fn default_admin_roles() -> Vec<String> {
    vec!["System Manager".to_string()]
}

pub fn default_log_level() -> String {
    "info".to_string()
}
