use crate::config::types::{Config, CrawlerConfig, DecodingConfig};
use crate::{ConfigError, ConfigResult};
use encoding_rs::Encoding;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_crawler_config(&config.crawler)?;
    validate_decoding_config(&config.decoding)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> ConfigResult<()> {
    if config.root_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "root_dir cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.markup_extensions.iter().any(|ext| ext.is_empty()) {
        return Err(ConfigError::Validation(
            "markup_extensions cannot contain an empty entry".to_string(),
        ));
    }

    if let Some(bad) = config
        .markup_extensions
        .iter()
        .find(|ext| ext.contains('/') || ext.contains('.'))
    {
        return Err(ConfigError::Validation(format!(
            "markup extension '{}' must be a bare extension such as 'html'",
            bad
        )));
    }

    Ok(())
}

/// Validates decoding configuration
fn validate_decoding_config(config: &DecodingConfig) -> ConfigResult<()> {
    if config.encodings.is_empty() {
        return Err(ConfigError::Validation(
            "at least one candidate encoding is required".to_string(),
        ));
    }

    for label in &config.encodings {
        resolve_encoding(label)?;
    }

    Ok(())
}

/// Resolves a WHATWG encoding label to an encoding
pub fn resolve_encoding(label: &str) -> ConfigResult<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| ConfigError::UnknownEncoding(label.to_string()))
}
