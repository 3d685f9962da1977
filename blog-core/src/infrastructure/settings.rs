use anyhow::{Context, Result, anyhow};

use crate::domain::post::PostLimits;

#[derive(Debug, Clone)]
pub struct Settings {
    pub page_size: u32,
    pub min_content_chars: usize,
    pub max_title_chars: usize,
    pub max_excerpt_chars: usize,
    pub max_comment_chars: usize,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: 10,
            min_content_chars: 50,
            max_title_chars: 200,
            max_excerpt_chars: 500,
            max_comment_chars: 1000,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let page_size = parse_u32_env("BLOG_PAGE_SIZE", 10)?;
        // zero is allowed: the publish-time empty-content rule still applies
        let min_content_chars = parse_usize_env("BLOG_MIN_CONTENT_CHARS", 50, true)?;
        let max_title_chars = parse_usize_env("BLOG_MAX_TITLE_CHARS", 200, false)?;
        let max_excerpt_chars = parse_usize_env("BLOG_MAX_EXCERPT_CHARS", 500, false)?;
        let max_comment_chars = parse_usize_env("BLOG_MAX_COMMENT_CHARS", 1000, false)?;
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            page_size,
            min_content_chars,
            max_title_chars,
            max_excerpt_chars,
            max_comment_chars,
            log_level,
        })
    }

    pub fn post_limits(&self) -> PostLimits {
        PostLimits {
            min_content_chars: self.min_content_chars,
            max_title_chars: self.max_title_chars,
            max_excerpt_chars: self.max_excerpt_chars,
        }
    }
}

fn parse_u32_env(key: &str, default: u32) -> Result<u32> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u32>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_usize_env(key: &str, default: usize, allow_zero: bool) -> Result<usize> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {key}, expecting integer"))?;

    if value == 0 && !allow_zero {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::Settings;

    #[test]
    fn defaults_match_the_shipped_configuration() {
        let settings = Settings::default();
        assert_eq!(settings.page_size, 10);
        assert_eq!(settings.min_content_chars, 50);
        assert_eq!(settings.max_comment_chars, 1000);
    }

    #[test]
    fn post_limits_carries_the_relevant_fields() {
        let settings = Settings {
            min_content_chars: 5,
            max_title_chars: 20,
            max_excerpt_chars: 30,
            ..Settings::default()
        };
        let limits = settings.post_limits();
        assert_eq!(limits.min_content_chars, 5);
        assert_eq!(limits.max_title_chars, 20);
        assert_eq!(limits.max_excerpt_chars, 30);
    }
}
