use std::env;
use std::str::FromStr;

/// How the SMTP session is encrypted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpTls {
    /// TLS from the first byte (SMTPS)
    Wrapper,
    /// Plain connection upgraded with STARTTLS
    StartTls,
    /// No encryption, local relays only
    None,
}

impl FromStr for SmtpTls {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tls" | "wrapper" | "smtps" => Ok(SmtpTls::Wrapper),
            "starttls" => Ok(SmtpTls::StartTls),
            "none" | "plain" => Ok(SmtpTls::None),
            other => Err(ConfigError::InvalidSmtpTls(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_tls: SmtpTls,
    pub email_from: String,
    pub supabase_url: String,
    pub supabase_service_key: String,
    pub send_email_function_url: Option<String>,
    pub app_url: String,
    pub function_secret: Option<String>,
}

pub const DEFAULT_EMAIL_FROM: &str = "noreply@webxio.app";
pub const DEFAULT_APP_URL: &str = "http://localhost:3000";

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            server_host: var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: var("SERVER_PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort("SERVER_PORT"))?,
            smtp_host: var("SMTP_HOST").ok_or(ConfigError::MissingSmtpHost)?,
            smtp_port: var("SMTP_PORT")
                .unwrap_or_else(|| "587".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort("SMTP_PORT"))?,
            smtp_username: var("SMTP_USERNAME"),
            smtp_password: var("SMTP_PASSWORD"),
            smtp_tls: var("SMTP_TLS")
                .unwrap_or_else(|| "tls".to_string())
                .parse()?,
            email_from: var("EMAIL_FROM").unwrap_or_else(|| DEFAULT_EMAIL_FROM.to_string()),
            supabase_url: var("SUPABASE_URL")
                .unwrap_or_default()
                .trim_end_matches('/')
                .to_string(),
            supabase_service_key: var("SUPABASE_SERVICE_ROLE_KEY").unwrap_or_default(),
            send_email_function_url: var("SEND_EMAIL_FUNCTION_URL"),
            app_url: var("APP_URL")
                .unwrap_or_else(|| DEFAULT_APP_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            function_secret: var("FUNCTION_SECRET"),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Bearer token for calling the `send-email` route.
    ///
    /// That route checks `FUNCTION_SECRET` when one is set, so it takes
    /// precedence over the service-role key.
    pub fn invocation_token(&self) -> &str {
        self.function_secret
            .as_deref()
            .unwrap_or(&self.supabase_service_key)
    }

    /// Implicit TLS on 587, where most relays expect STARTTLS
    pub fn smtps_on_submission_port(&self) -> bool {
        self.smtp_tls == SmtpTls::Wrapper && self.smtp_port == 587
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port in {0}")]
    InvalidPort(&'static str),
    #[error("SMTP_HOST environment variable is required")]
    MissingSmtpHost,
    #[error("Invalid SMTP_TLS mode: {0} (expected tls, starttls or none)")]
    InvalidSmtpTls(String),
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 8080,
        smtp_host: "smtp.example.com".to_string(),
        smtp_port: 465,
        smtp_username: Some("mailer".to_string()),
        smtp_password: Some("hunter2".to_string()),
        smtp_tls: SmtpTls::Wrapper,
        email_from: DEFAULT_EMAIL_FROM.to_string(),
        supabase_url: "https://project.supabase.co".to_string(),
        supabase_service_key: "service-key".to_string(),
        send_email_function_url: None,
        app_url: "https://app.webxio.app".to_string(),
        function_secret: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_tls_modes() {
        assert_eq!("tls".parse::<SmtpTls>().unwrap(), SmtpTls::Wrapper);
        assert_eq!("STARTTLS".parse::<SmtpTls>().unwrap(), SmtpTls::StartTls);
        assert_eq!(" none ".parse::<SmtpTls>().unwrap(), SmtpTls::None);
        assert!("ssl3".parse::<SmtpTls>().is_err());
    }

    #[test]
    fn test_server_addr() {
        assert_eq!(test_config().server_addr(), "127.0.0.1:8080");
    }

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("SMTP_HOST", "smtp.example.com")]).expect("SMTP_HOST is enough");

        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.smtp_port, 587);
        assert_eq!(config.smtp_tls, SmtpTls::Wrapper);
        assert_eq!(config.email_from, DEFAULT_EMAIL_FROM);
        assert_eq!(config.app_url, DEFAULT_APP_URL);
        assert!(config.smtp_username.is_none());
        assert!(config.function_secret.is_none());
        assert!(config.send_email_function_url.is_none());
    }

    #[test]
    fn test_smtp_host_required() {
        assert!(matches!(load(&[]), Err(ConfigError::MissingSmtpHost)));
        assert!(matches!(
            load(&[("SMTP_HOST", "   ")]),
            Err(ConfigError::MissingSmtpHost)
        ));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("SMTP_HOST", "smtp.example.com"), ("SMTP_TLS", "ssl3")]),
            Err(ConfigError::InvalidSmtpTls(_))
        ));
        assert!(matches!(
            load(&[("SMTP_HOST", "smtp.example.com"), ("SMTP_PORT", "smtp")]),
            Err(ConfigError::InvalidPort("SMTP_PORT"))
        ));
    }

    #[test]
    fn test_trailing_slashes_dropped() {
        let config = load(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("APP_URL", "https://app.webxio.app/"),
            ("SUPABASE_URL", "https://project.supabase.co/"),
        ])
        .unwrap();

        assert_eq!(config.app_url, "https://app.webxio.app");
        assert_eq!(config.supabase_url, "https://project.supabase.co");
        assert_eq!(
            crate::mail::templates::invitation_url(&config.app_url, "tok", "team-1"),
            "https://app.webxio.app/invitation?token=tok&team=team-1"
        );
    }

    #[test]
    fn test_blank_email_from_uses_default() {
        let config = load(&[("SMTP_HOST", "smtp.example.com"), ("EMAIL_FROM", "")]).unwrap();
        assert_eq!(config.email_from, DEFAULT_EMAIL_FROM);
    }

    #[test]
    fn test_invocation_token_prefers_function_secret() {
        let mut config = test_config();
        assert_eq!(config.invocation_token(), "service-key");

        config.function_secret = Some("s3cret".to_string());
        assert_eq!(config.invocation_token(), "s3cret");
    }

    #[test]
    fn test_smtps_on_submission_port() {
        let mut config = load(&[("SMTP_HOST", "smtp.example.com")]).unwrap();
        assert!(config.smtps_on_submission_port());

        config.smtp_tls = SmtpTls::StartTls;
        assert!(!config.smtps_on_submission_port());

        config.smtp_tls = SmtpTls::Wrapper;
        config.smtp_port = 465;
        assert!(!config.smtps_on_submission_port());
    }
}
