//! Contact form submissions

use async_trait::async_trait;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub subject: String,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}

/// Delivers validated contact submissions to whoever handles them
#[async_trait]
pub trait ContactNotifier: Send + Sync {
    async fn notify(&self, to: &str, form: &ContactForm) -> anyhow::Result<()>;
}

/// Writes submissions to the log instead of sending mail
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl ContactNotifier for LogNotifier {
    async fn notify(&self, to: &str, form: &ContactForm) -> anyhow::Result<()> {
        tracing::info!(
            to,
            from = %form.email,
            name = %form.name,
            subject = %form.subject,
            "Contact form submitted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            subject: "Viewing".to_string(),
            message: "Is the flat still available?".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn test_invalid_email() {
        let input = ContactForm {
            email: "not-an-email".to_string(),
            ..form()
        };

        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_empty_message_and_name() {
        let input = ContactForm {
            name: String::new(),
            message: String::new(),
            ..form()
        };

        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("message"));
    }

    #[tokio::test]
    async fn test_log_notifier_accepts_submission() {
        assert!(LogNotifier.notify("contact@estately.local", &form()).await.is_ok());
    }
}
