use crate::config::types::{
    Config, CrawlerConfig, FetcherConfig, InputConfig, RetryConfig, StorageConfig,
};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_retry_config(&config.retry)?;
    validate_storage_config(&config.storage)?;
    validate_input_config(&config.input)?;
    Ok(())
}

/// Validates crawl bounds and pacing
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages_per_domain < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages-per-domain must be >= 1, got {}",
            config.max_pages_per_domain
        )));
    }

    if !config.request_delay.is_finite() || config.request_delay < 0.0 {
        return Err(ConfigError::Validation(format!(
            "request-delay must be a non-negative number of seconds, got {}",
            config.request_delay
        )));
    }

    Ok(())
}

/// Validates fetcher timeouts and identity
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout must be >= 1 second, got {}",
            config.request_timeout
        )));
    }

    if config.connect_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout must be >= 1 second, got {}",
            config.connect_timeout
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    // reqwest rejects header values with control characters at build time;
    // catch it here so the message names the config key
    if config.user_agent.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(
            "user-agent cannot contain control characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates the retry policy
fn validate_retry_config(config: &RetryConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max-attempts must be >= 1, got {}",
            config.max_attempts
        )));
    }

    if !config.backoff.is_finite() || config.backoff < 0.0 {
        return Err(ConfigError::Validation(format!(
            "backoff must be a non-negative number of seconds, got {}",
            config.backoff
        )));
    }

    if !config.backoff_multiplier.is_finite() || config.backoff_multiplier < 1.0 {
        return Err(ConfigError::Validation(format!(
            "backoff-multiplier must be >= 1.0, got {}",
            config.backoff_multiplier
        )));
    }

    Ok(())
}

fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_input_config(config: &InputConfig) -> Result<(), ConfigError> {
    if config.seeds_path.is_empty() {
        return Err(ConfigError::Validation(
            "seeds-path cannot be empty".to_string(),
        ));
    }
    Ok(())
}
