//! Access and logging configuration validators

use super::trait_def::Validate;
use crate::config::models::*;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Validate for CapabilityRolesConfig {
    fn validate(&self) -> Result<(), String> {
        let tables = [
            ("librarian_roles", &self.librarian_roles),
            ("member_roles", &self.member_roles),
            ("admin_roles", &self.admin_roles),
        ];
        for (name, roles) in tables {
            if roles.iter().any(|role| role.trim().is_empty()) {
                return Err(format!("{} contains a blank role name", name));
            }
        }
        Ok(())
    }
}

impl Validate for AccessConfig {
    fn validate(&self) -> Result<(), String> {
        self.capabilities.validate()?;

        for (name, path) in [
            ("fallback_path", &self.fallback_path),
            ("login_path", &self.login_path),
        ] {
            if !path.starts_with('/') {
                return Err(format!("{} must start with '/', got: {}", name, path));
            }
        }

        if self.denial_mode == DenialMode::Forbidden && self.fallback_message.trim().is_empty() {
            return Err("fallback_message cannot be empty in forbidden mode".to_string());
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let level = self.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(format!(
                "log level must be one of {}, got: {}",
                LOG_LEVELS.join(", "),
                self.level
            ));
        }
        Ok(())
    }
}
