//! Login and registration handlers.
//!
//! Nothing is verified or stored: a sign-in with any non-empty credentials
//! succeeds, and registration only checks that the form is complete.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::models::session::keys;
use crate::models::{CurrentShopper, Flash};
use crate::routes::PageChrome;
use crate::state::AppState;

/// Notice for a sign-in attempt with a missing field.
pub const LOGIN_INCOMPLETE: &str = "Enter a username and password to continue.";

/// Notice for an incomplete or malformed registration form.
pub const REGISTER_INCOMPLETE: &str = "Please fill in every required field.";

/// Notice for an email address without an `@`.
pub const REGISTER_BAD_EMAIL: &str = "Enter a valid email address or leave it blank.";

/// Notice after a registration passes validation.
pub const REGISTER_SUCCESS: &str = "Registration successful! (demo)";

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub email_address: String,
}

impl RegisterForm {
    /// Check the form, returning the notice to show on failure.
    ///
    /// # Errors
    ///
    /// Returns the user-facing message for the first problem found.
    pub fn validate(&self) -> std::result::Result<(), &'static str> {
        let required = [
            &self.username,
            &self.password,
            &self.full_name,
            &self.address,
            &self.contact_number,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(REGISTER_INCOMPLETE);
        }

        let email = self.email_address.trim();
        if !email.is_empty() && !email.contains('@') {
            return Err(REGISTER_BAD_EMAIL);
        }

        Ok(())
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub chrome: PageChrome,
    /// Username of the last successful registration, shown as a hint.
    pub registered_as: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub chrome: PageChrome,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page.
#[instrument(skip(state, session))]
pub async fn login_page(State(state): State<AppState>, session: Session) -> Result<Response> {
    let chrome = PageChrome::load(&session, state.catalog()).await?;
    let registered_as = session.remove::<String>(REGISTERED_AS).await?;

    Ok(LoginTemplate {
        chrome,
        registered_as,
    }
    .into_response())
}

/// Handle login form submission.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    let username = form.username.trim();
    if username.is_empty() || form.password.is_empty() {
        Flash::error(LOGIN_INCOMPLETE).push(&session).await?;
        return Ok(Redirect::to("/"));
    }

    let shopper = CurrentShopper::sign_in(state.catalog(), username);
    session.cycle_id().await?;
    session.insert(keys::SHOPPER, &shopper).await?;

    set_sentry_user(&shopper.username);
    add_breadcrumb("auth", "Signed in", Some(&[("username", shopper.username.as_str())]));
    tracing::info!(
        username = %shopper.username,
        linked = shopper.buyer_id.is_some(),
        "Shopper signed in"
    );

    Ok(Redirect::to("/menu"))
}

/// Display the registration page.
#[instrument(skip(state, session))]
pub async fn register_page(State(state): State<AppState>, session: Session) -> Result<Response> {
    let chrome = PageChrome::load(&session, state.catalog()).await?;
    Ok(RegisterTemplate { chrome }.into_response())
}

/// Handle registration form submission.
#[instrument(skip(session, form))]
pub async fn register(session: Session, Form(form): Form<RegisterForm>) -> Result<Redirect> {
    if let Err(message) = form.validate() {
        Flash::error(message).push(&session).await?;
        return Ok(Redirect::to("/register"));
    }

    session
        .insert(REGISTERED_AS, form.username.trim().to_string())
        .await?;
    Flash::success(REGISTER_SUCCESS).push(&session).await?;
    tracing::info!(username = %form.username.trim(), "Registration accepted");

    Ok(Redirect::to("/"))
}

/// Sign out and drop the session, cart included.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Response> {
    session.flush().await?;
    clear_sentry_user();
    Ok(Redirect::to("/").into_response())
}

/// Session key for the username of the last registration.
const REGISTERED_AS: &str = "registered_as";

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> RegisterForm {
        RegisterForm {
            username: "juan".to_string(),
            password: "secret".to_string(),
            full_name: "Juan Dela Cruz".to_string(),
            address: "221 Mabini St".to_string(),
            contact_number: "0918".to_string(),
            email_address: String::new(),
        }
    }

    #[test]
    fn test_complete_form_passes() {
        assert_eq!(complete().validate(), Ok(()));
    }

    #[test]
    fn test_missing_field_fails() {
        let form = RegisterForm {
            address: "   ".to_string(),
            ..complete()
        };
        assert_eq!(form.validate(), Err(REGISTER_INCOMPLETE));
    }

    #[test]
    fn test_email_needs_at_sign() {
        let form = RegisterForm {
            email_address: "juan.example.ph".to_string(),
            ..complete()
        };
        assert_eq!(form.validate(), Err(REGISTER_BAD_EMAIL));

        let form = RegisterForm {
            email_address: "juan@example.ph".to_string(),
            ..complete()
        };
        assert_eq!(form.validate(), Ok(()));
    }
}
