use log::{info, warn};
use crate::api::DashboardApi;
use crate::error::{Error, Result, LOGIN_FAILED};
use crate::models::User;
use crate::notify::Toasts;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    LoggedIn(User),
    /// The server (or the network) refused; message already shown as a toast.
    Rejected(String),
    /// Rejected locally, no request issued.
    Invalid(String),
}

#[derive(Debug, Default)]
pub struct LoginView {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    submitting: bool,
}

impl LoginView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Marks the submit control busy. Cleared when [`LoginView::submit`] finishes.
    pub fn begin_submit(&mut self) {
        self.submitting = true;
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    pub fn input_char(&mut self, c: char) {
        match self.focus {
            LoginField::Email => self.email.push(c),
            LoginField::Password => self.password.push(c),
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            LoginField::Email => self.email.pop(),
            LoginField::Password => self.password.pop(),
        };
    }

    /// Same constraints as a required `type=email` field plus a required password.
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(Error::ValidationError("Email is required".into()));
        }
        if !is_email_shaped(self.email.trim()) {
            return Err(Error::ValidationError(format!(
                "'{}' is not a valid email address",
                self.email.trim()
            )));
        }
        if self.password.is_empty() {
            return Err(Error::ValidationError("Password is required".into()));
        }
        Ok(())
    }

    /// One authentication attempt. On success the credentials are stored in
    /// `session`; the caller is responsible for navigating.
    pub async fn submit<A>(&mut self, api: &A, session: &Session, toasts: &mut Toasts) -> LoginOutcome
    where
        A: DashboardApi + ?Sized,
    {
        if let Err(e) = self.validate() {
            let message = e.user_message();
            toasts.error(message.clone());
            self.submitting = false;
            return LoginOutcome::Invalid(message);
        }

        self.submitting = true;
        let result = api.login(self.email.trim(), &self.password).await;
        self.submitting = false;

        match result {
            Ok(resp) => {
                let user = resp.user.clone();
                session.login(resp.user, resp.token);
                self.password.clear();
                toasts.success("Login Successful!");
                info!("Login succeeded for {}", user.email);
                LoginOutcome::LoggedIn(user)
            }
            Err(e) => {
                warn!("Login failed for {}: {}", self.email.trim(), e);
                let message = match e {
                    Error::AuthError(msg) => msg,
                    _ => LOGIN_FAILED.to_string(),
                };
                toasts.error(message.clone());
                LoginOutcome::Rejected(message)
            }
        }
    }
}

/// Loose `local@domain` check in the spirit of browser email inputs.
pub fn is_email_shaped(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    domain.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{LoginResponse, MockDashboardApi};
    use crate::tests::common::create_test_user;

    fn filled(email: &str, password: &str) -> LoginView {
        LoginView {
            email: email.into(),
            password: password.into(),
            ..LoginView::default()
        }
    }

    #[test]
    fn test_email_shape() {
        assert!(is_email_shaped("ada@example.com"));
        assert!(is_email_shaped("ada@localhost"));
        assert!(!is_email_shaped("ada.example.com"));
        assert!(!is_email_shaped("@example.com"));
        assert!(!is_email_shaped("ada@"));
        assert!(!is_email_shaped("ada@exa mple.com"));
        assert!(!is_email_shaped("ada@example..com"));
    }

    #[tokio::test]
    async fn test_invalid_input_issues_no_request() {
        let mut api = MockDashboardApi::new();
        api.expect_login().times(0);
        let session = Session::new();
        let mut toasts = Toasts::new();

        let mut view = filled("not-an-email", "pw");
        let outcome = view.submit(&api, &session, &mut toasts).await;
        assert!(matches!(outcome, LoginOutcome::Invalid(_)));

        let mut view = filled("ada@example.com", "");
        let outcome = view.submit(&api, &session, &mut toasts).await;
        assert_eq!(outcome, LoginOutcome::Invalid("Password is required".into()));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_success_stores_credentials() {
        let mut api = MockDashboardApi::new();
        api.expect_login()
            .withf(|email, password| email == "test@example.com" && password == "secret")
            .times(1)
            .returning(|_, _| {
                Ok(LoginResponse {
                    user: create_test_user(),
                    token: "jwt".into(),
                })
            });
        let session = Session::new();
        let mut toasts = Toasts::new();
        let mut view = filled(" test@example.com ", "secret");

        let outcome = view.submit(&api, &session, &mut toasts).await;
        assert_eq!(outcome, LoginOutcome::LoggedIn(create_test_user()));
        assert_eq!(session.token().as_deref(), Some("jwt"));
        assert_eq!(toasts.last().unwrap().message, "Login Successful!");
        assert!(!view.is_submitting());
    }

    #[tokio::test]
    async fn test_rejection_shows_server_message_or_fallback() {
        let mut api = MockDashboardApi::new();
        let mut calls = 0;
        api.expect_login().times(2).returning(move |_, _| {
            calls += 1;
            if calls == 1 {
                Err(Error::AuthError("Invalid credentials".into()))
            } else {
                Err(Error::ApiInvalidFormat("garbage".into()))
            }
        });
        let session = Session::new();
        let mut toasts = Toasts::new();
        let mut view = filled("ada@example.com", "wrong");

        let outcome = view.submit(&api, &session, &mut toasts).await;
        assert_eq!(outcome, LoginOutcome::Rejected("Invalid credentials".into()));
        // Form stays usable for a retry.
        assert_eq!(view.password, "wrong");
        assert!(!view.is_submitting());

        let outcome = view.submit(&api, &session, &mut toasts).await;
        assert_eq!(outcome, LoginOutcome::Rejected(LOGIN_FAILED.into()));
        assert!(!session.is_authenticated());
    }
}
