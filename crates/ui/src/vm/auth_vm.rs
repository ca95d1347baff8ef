use bridge_core::model::ProfileError;
use services::auth_service::MIN_PASSWORD_LEN;
use services::{AuthError, SignUpRequest};

//
// ─── REGISTER FORM ─────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub agree_to_terms: bool,
}

/// Per-field messages shown under the register inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFormErrors {
    pub first_name: Option<&'static str>,
    pub last_name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
    pub confirm_password: Option<&'static str>,
    pub agree_to_terms: Option<&'static str>,
}

impl RegisterFormErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl RegisterForm {
    /// Check the form before it reaches the auth service.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages when any field is missing or malformed.
    pub fn validate(&self) -> Result<SignUpRequest, RegisterFormErrors> {
        let mut errors = RegisterFormErrors::default();

        if self.first_name.trim().is_empty() {
            errors.first_name = Some("First name is required");
        }
        if self.last_name.trim().is_empty() {
            errors.last_name = Some("Last name is required");
        }
        let email = self.email.trim();
        if email.is_empty() {
            errors.email = Some("Email is required");
        } else if !looks_like_email(email) {
            errors.email = Some("Email address is invalid");
        }
        if self.password.trim().is_empty() {
            errors.password = Some("Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.password = Some("Password must be at least 6 characters");
        }
        if self.confirm_password.trim().is_empty() {
            errors.confirm_password = Some("Please confirm your password");
        } else if self.password != self.confirm_password {
            errors.confirm_password = Some("Passwords do not match");
        }
        if !self.agree_to_terms {
            errors.agree_to_terms = Some("You must agree to the terms and privacy policy");
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(SignUpRequest {
            email: email.to_owned(),
            password: self.password.clone(),
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
        })
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !value.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

//
// ─── LOGIN FORM ────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns a message when either field is blank.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err("Please fill in all fields");
        }
        Ok(())
    }
}

/// Human message for a failed sign-in, sign-up or profile save.
#[must_use]
pub fn auth_error_message(err: &AuthError) -> String {
    match err {
        AuthError::Profile(ProfileError::InvalidEmail(_)) => "Email address is invalid".to_owned(),
        AuthError::Profile(ProfileError::EmptyFirstName) => "First name is required".to_owned(),
        AuthError::Profile(ProfileError::EmptyLastName) => "Last name is required".to_owned(),
        AuthError::WeakPassword { min } => format!("Password must be at least {min} characters"),
        AuthError::EmailTaken => "An account with this email already exists".to_owned(),
        AuthError::InvalidCredentials => "Invalid email or password".to_owned(),
        AuthError::NotSignedIn => "Please log in again".to_owned(),
        _ => "Something went wrong. Please try again.".to_owned(),
    }
}
