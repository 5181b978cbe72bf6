use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// Every section and key is optional; missing values take their defaults.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use site_crawler::config::load_config;
///
/// let config = load_config(Path::new("crawler.toml")).unwrap();
/// println!("Workers: {}", config.crawler.workers);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[crawler]
workers = 8
max-pages = 250
same-domain = false

[http]
user-agent = "TestCrawler/1.0"
connect-timeout-secs = 5
timeout-secs = 15
max-redirects = 3

[output]
directory = "/tmp/crawls"
file-prefix = "site"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.workers, 8);
        assert_eq!(config.crawler.max_pages, 250);
        assert!(!config.crawler.same_domain);
        assert_eq!(config.http.user_agent, "TestCrawler/1.0");
        assert_eq!(config.http.max_redirects, 3);
        assert_eq!(config.output.directory, "/tmp/crawls");
        assert_eq!(config.output.file_prefix, "site");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();

        assert_eq!(config.crawler.workers, 4);
        assert_eq!(config.crawler.max_pages, 100);
        assert!(config.crawler.same_domain);
        assert_eq!(config.http.connect_timeout_secs, 10);
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.http.max_redirects, 10);
        assert_eq!(config.output.file_prefix, "crawl_results");
    }

    #[test]
    fn test_partial_section_uses_defaults() {
        let config = parse_config("[crawler]\nmax-pages = 7\n").unwrap();

        assert_eq!(config.crawler.max_pages, 7);
        assert_eq!(config.crawler.workers, 4);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/crawler.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config("[crawler]\nworkers = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
