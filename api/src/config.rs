use std::env;
use std::time::Duration;

use anyhow::{bail, Context};

/// Where the achievement rule table is loaded from at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulesSource {
    /// Compiled-in default table
    Builtin,
    /// The backend's `achievements` table
    Backend,
}

impl std::str::FromStr for RulesSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "builtin" => Ok(RulesSource::Builtin),
            "backend" => Ok(RulesSource::Backend),
            _ => Err(format!("Unknown achievement rules source: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the hosted backend
    pub backend_url: String,
    /// Service key sent with every backend request
    pub backend_service_key: String,
    pub port: u16,
    /// How often the activity stream polls for new records
    pub activity_poll_interval: Duration,
    pub rules_source: RulesSource,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let backend_url = env::var("BACKEND_URL").context("BACKEND_URL must be set")?;
        let backend_service_key =
            env::var("BACKEND_SERVICE_KEY").context("BACKEND_SERVICE_KEY must be set")?;

        let port = match env::var("PORT") {
            Ok(p) => p.parse().with_context(|| format!("Invalid PORT: {}", p))?,
            Err(_) => 8080,
        };

        let poll_secs: u64 = match env::var("ACTIVITY_POLL_INTERVAL_SECS") {
            Ok(s) => s
                .parse()
                .with_context(|| format!("Invalid ACTIVITY_POLL_INTERVAL_SECS: {}", s))?,
            Err(_) => 5,
        };
        if poll_secs == 0 {
            bail!("ACTIVITY_POLL_INTERVAL_SECS must be at least 1");
        }

        let rules_source = match env::var("ACHIEVEMENT_RULES_SOURCE") {
            Ok(s) => s.parse().map_err(anyhow::Error::msg)?,
            Err(_) => RulesSource::Builtin,
        };

        Ok(Self {
            backend_url,
            backend_service_key,
            port,
            activity_poll_interval: Duration::from_secs(poll_secs),
            rules_source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_source_from_str() {
        assert_eq!(
            "Backend".parse::<RulesSource>().unwrap(),
            RulesSource::Backend
        );
        assert_eq!(
            " builtin ".parse::<RulesSource>().unwrap(),
            RulesSource::Builtin
        );
        assert!("yaml".parse::<RulesSource>().is_err());
    }
}
