//! SMTP Config

use clap::Args;

use roomkeeper_app::notifications::SmtpSettings;

/// Invoice delivery settings. Invoices are only logged when no host is set.
#[derive(Debug, Args)]
pub struct SmtpConfig {
    /// SMTP relay host
    #[arg(long, env = "SMTP_HOST")]
    pub smtp_host: Option<String>,

    /// SMTP relay port
    #[arg(long, env = "SMTP_PORT", default_value_t = 587_u16)]
    pub smtp_port: u16,

    /// SMTP username
    #[arg(long, env = "SMTP_USERNAME", default_value = "")]
    pub smtp_username: String,

    /// SMTP password
    #[arg(long, env = "SMTP_PASSWORD", default_value = "", hide_env_values = true)]
    pub smtp_password: String,

    /// Sender address for invoices
    #[arg(long, env = "SMTP_FROM", default_value = "Roomkeeper <no-reply@localhost>")]
    pub smtp_from: String,
}

impl SmtpConfig {
    /// Relay settings, if a host is configured.
    #[must_use]
    pub fn settings(&self) -> Option<SmtpSettings> {
        let host = self.smtp_host.as_ref().filter(|host| !host.trim().is_empty())?;

        Some(SmtpSettings {
            host: host.clone(),
            port: self.smtp_port,
            username: self.smtp_username.clone(),
            password: self.smtp_password.clone(),
            from: self.smtp_from.clone(),
        })
    }
}
