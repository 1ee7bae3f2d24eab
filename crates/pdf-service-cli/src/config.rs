use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

pub const URL_ENV: &str = "PDF_SERVICE_URL";
pub const TOKEN_ENV: &str = "PDF_SERVICE_S2S_TOKEN";
pub const TIMEOUT_ENV: &str = "PDF_SERVICE_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Start-up configuration, read once from flags and the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub timeout: Duration,
    /// Whether `PDF_SERVICE_S2S_TOKEN` was set at start-up. The token itself
    /// is re-read on every render call.
    pub s2s_auth: bool,
}

impl Settings {
    /// `url_flag` wins over `PDF_SERVICE_URL`.
    pub fn load(url_flag: Option<String>) -> Result<Self> {
        let base_url = match url_flag.or_else(|| std::env::var(URL_ENV).ok()) {
            Some(url) if !url.trim().is_empty() => url,
            _ => bail!("PDF service URL not set: pass --url or set {URL_ENV}"),
        };

        let timeout = match std::env::var(TIMEOUT_ENV) {
            Ok(secs) => Duration::from_secs(
                secs.trim()
                    .parse()
                    .with_context(|| format!("{TIMEOUT_ENV} must be a whole number of seconds"))?,
            ),
            Err(_) => DEFAULT_TIMEOUT,
        };

        let s2s_auth = std::env::var(TOKEN_ENV).is_ok();
        info!(%base_url, timeout_secs = timeout.as_secs(), s2s_auth, "loaded PDF service settings");

        Ok(Self {
            base_url,
            timeout,
            s2s_auth,
        })
    }
}

/// Current value of `PDF_SERVICE_S2S_TOKEN`.
///
/// If the variable was unset or cleared since start-up this returns an empty
/// string, which is still sent as an empty `ServiceAuthorization` header.
pub fn current_s2s_token() -> String {
    let token = std::env::var(TOKEN_ENV).unwrap_or_default();
    if token.is_empty() {
        warn!("{TOKEN_ENV} is empty; sending an empty ServiceAuthorization header");
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_env() {
        temp_env::with_vars(
            [
                (URL_ENV, Some("http://from-env")),
                (TIMEOUT_ENV, None),
                (TOKEN_ENV, None),
            ],
            || {
                let settings = Settings::load(Some("http://from-flag".into())).unwrap();
                assert_eq!(settings.base_url, "http://from-flag");
                assert_eq!(settings.timeout, DEFAULT_TIMEOUT);
                assert!(!settings.s2s_auth);
            },
        );
    }

    #[test]
    fn env_supplies_url_timeout_and_token() {
        temp_env::with_vars(
            [
                (URL_ENV, Some("http://pdf-service:5500")),
                (TIMEOUT_ENV, Some("5")),
                (TOKEN_ENV, Some("tok-123")),
            ],
            || {
                let settings = Settings::load(None).unwrap();
                assert_eq!(settings.base_url, "http://pdf-service:5500");
                assert_eq!(settings.timeout, Duration::from_secs(5));
                assert!(settings.s2s_auth);
                assert_eq!(current_s2s_token(), "tok-123");
            },
        );
    }

    #[test]
    fn token_cleared_after_start_up_is_empty() {
        temp_env::with_var_unset(TOKEN_ENV, || {
            assert_eq!(current_s2s_token(), "");
        });
    }

    #[test]
    fn missing_url_is_an_error() {
        temp_env::with_var_unset(URL_ENV, || {
            let err = Settings::load(None).unwrap_err();
            assert!(err.to_string().contains(URL_ENV), "got: {err}");
        });
    }

    #[test]
    fn bad_timeout_is_an_error() {
        temp_env::with_vars(
            [(URL_ENV, Some("http://x")), (TIMEOUT_ENV, Some("soon"))],
            || {
                assert!(Settings::load(None).is_err());
            },
        );
    }
}
