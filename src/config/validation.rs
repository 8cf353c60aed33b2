use crate::config::types::{AdmissionConfig, Config, ScopeConfig, StatisticsConfig, TrapConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_admission_config(&config.admission)?;
    validate_trap_config(&config.traps)?;
    validate_scope_config(&config.scope)?;
    validate_statistics_config(&config.statistics)?;
    Ok(())
}

/// Validates admission thresholds
fn validate_admission_config(config: &AdmissionConfig) -> Result<(), ConfigError> {
    if !(100..=599).contains(&config.success_status) {
        return Err(ConfigError::Validation(format!(
            "success_status must be a valid HTTP status code, got {}",
            config.success_status
        )));
    }

    if config.max_content_length == 0 {
        return Err(ConfigError::Validation(
            "max_content_length must be > 0".to_string(),
        ));
    }

    if !(0.0..=1.0).contains(&config.min_text_ratio) {
        return Err(ConfigError::Validation(format!(
            "min_text_ratio must be between 0.0 and 1.0, got {}",
            config.min_text_ratio
        )));
    }

    if config
        .excluded_content_types
        .iter()
        .any(|prefix| prefix.trim().is_empty())
    {
        return Err(ConfigError::Validation(
            "excluded_content_types cannot contain empty entries".to_string(),
        ));
    }

    Ok(())
}

/// Validates trap detection tuning
fn validate_trap_config(config: &TrapConfig) -> Result<(), ConfigError> {
    if config.window_secs == 0 {
        return Err(ConfigError::Validation(
            "window_secs must be >= 1".to_string(),
        ));
    }

    if config.discovery_rate_threshold == 0 {
        return Err(ConfigError::Validation(
            "discovery_rate_threshold must be >= 1".to_string(),
        ));
    }

    for pattern in &config.extra_patterns {
        regex::Regex::new(pattern).map_err(|e| {
            ConfigError::InvalidPattern(format!("Invalid trap pattern '{}': {}", pattern, e))
        })?;
    }

    Ok(())
}

/// Validates the crawl scope
fn validate_scope_config(config: &ScopeConfig) -> Result<(), ConfigError> {
    if config.allowed_domains.is_empty() && config.allowed_paths.is_empty() {
        return Err(ConfigError::Validation(
            "scope must list at least one allowed domain or path".to_string(),
        ));
    }

    for pattern in &config.allowed_domains {
        validate_domain_pattern(pattern)?;
    }

    for prefix in &config.allowed_paths {
        validate_path_prefix(prefix)?;
    }

    Ok(())
}

/// Validates statistics settings
fn validate_statistics_config(config: &StatisticsConfig) -> Result<(), ConfigError> {
    if config.top_words == 0 {
        return Err(ConfigError::Validation(
            "top_words must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates a domain pattern (supports wildcards)
fn validate_domain_pattern(pattern: &str) -> Result<(), ConfigError> {
    if pattern.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain pattern cannot be empty".to_string(),
        ));
    }

    validate_domain_string(pattern.strip_prefix("*.").unwrap_or(pattern))
}

/// Validates a domain string (without wildcard prefix)
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' must contain at least one dot (e.g., 'uci.edu')",
            domain
        )));
    }

    Ok(())
}

/// Validates a host+path prefix such as "today.uci.edu/department/x"
fn validate_path_prefix(prefix: &str) -> Result<(), ConfigError> {
    let (host, path) = prefix.split_once('/').ok_or_else(|| {
        ConfigError::InvalidPattern(format!(
            "Path prefix '{}' must have the form host/path",
            prefix
        ))
    })?;

    if path.is_empty() {
        return Err(ConfigError::InvalidPattern(format!(
            "Path prefix '{}' has an empty path; list the host under allowed_domains instead",
            prefix
        )));
    }

    validate_domain_string(host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_domain_pattern() {
        assert!(validate_domain_pattern("uci.edu").is_ok());
        assert!(validate_domain_pattern("*.ics.uci.edu").is_ok());

        assert!(validate_domain_pattern("").is_err());
        assert!(validate_domain_pattern("*.").is_err());
        assert!(validate_domain_pattern("edu").is_err());
        assert!(validate_domain_pattern(".ics.uci.edu").is_err());
        assert!(validate_domain_pattern("ics..uci.edu").is_err());
    }

    #[test]
    fn test_validate_path_prefix() {
        assert!(validate_path_prefix("today.uci.edu/department/information_computer_sciences").is_ok());

        assert!(validate_path_prefix("today.uci.edu").is_err());
        assert!(validate_path_prefix("today.uci.edu/").is_err());
        assert!(validate_path_prefix("/department").is_err());
    }

    #[test]
    fn test_ratio_out_of_range() {
        let mut config = Config::default();
        config.admission.min_text_ratio = -0.1;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));

        config.admission.min_text_ratio = 1.0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_thresholds_rejected() {
        let mut config = Config::default();
        config.traps.window_secs = 0;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.traps.discovery_rate_threshold = 0;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.admission.max_content_length = 0;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.statistics.top_words = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_invalid_trap_pattern_rejected() {
        let mut config = Config::default();
        config.traps.extra_patterns = vec!["/archive/(".to_string()];
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidPattern(_))
        ));

        config.traps.extra_patterns = vec![r"/archive/\d+".to_string()];
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_scope_rejected() {
        let mut config = Config::default();
        config.scope.allowed_domains.clear();
        config.scope.allowed_paths.clear();
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }
}
