use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::UserId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("first name cannot be empty")]
    EmptyFirstName,

    #[error("last name cannot be empty")]
    EmptyLastName,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

//
// ─── EMAIL ─────────────────────────────────────────────────────────────────────
//

/// Lower-cased, trimmed email address with a single `@` and text on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Validate and normalize an email address.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::InvalidEmail` when the shape is wrong.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ProfileError> {
        let raw = raw.into();
        let normalized = raw.trim().to_lowercase();
        let mut parts = normalized.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        if local.is_empty() || domain.is_empty() || parts.next().is_some() {
            return Err(ProfileError::InvalidEmail(raw));
        }
        if normalized.chars().any(char::is_whitespace) {
            return Err(ProfileError::InvalidEmail(raw));
        }
        Ok(Self(normalized))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//
// ─── PROFILE ───────────────────────────────────────────────────────────────────
//

/// Registration form input before validation.
#[derive(Clone, Debug, Default)]
pub struct ProfileDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl ProfileDraft {
    /// Validate the draft into a profile owned by `id`.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` when a name is blank or the email is malformed.
    pub fn validate(self, id: UserId) -> Result<UserProfile, ProfileError> {
        let first_name = normalize_name(&self.first_name).ok_or(ProfileError::EmptyFirstName)?;
        let last_name = normalize_name(&self.last_name).ok_or(ProfileError::EmptyLastName)?;
        let email = Email::parse(self.email)?;
        Ok(UserProfile {
            id,
            first_name,
            last_name,
            email,
        })
    }
}

/// Partial profile edit; `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    id: UserId,
    first_name: String,
    last_name: String,
    email: Email,
}

impl UserProfile {
    /// Rehydrate a profile from storage, re-running validation.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` if persisted values no longer validate.
    pub fn from_persisted(
        id: UserId,
        first_name: String,
        last_name: String,
        email: String,
    ) -> Result<Self, ProfileError> {
        ProfileDraft {
            first_name,
            last_name,
            email,
        }
        .validate(id)
    }

    /// Apply a partial update, returning the validated result.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` if the merged profile is invalid.
    pub fn apply(&self, update: ProfileUpdate) -> Result<Self, ProfileError> {
        ProfileDraft {
            first_name: update.first_name.unwrap_or_else(|| self.first_name.clone()),
            last_name: update.last_name.unwrap_or_else(|| self.last_name.clone()),
            email: update
                .email
                .unwrap_or_else(|| self.email.as_str().to_string()),
        }
        .validate(self.id)
    }

    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn normalize_name(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(first: &str, last: &str, email: &str) -> ProfileDraft {
        ProfileDraft {
            first_name: first.into(),
            last_name: last.into(),
            email: email.into(),
        }
    }

    #[test]
    fn validate_trims_and_lowercases() {
        let profile = draft("  Ada ", " Lovelace", " Ada@Example.COM ")
            .validate(UserId::generate())
            .unwrap();
        assert_eq!(profile.first_name(), "Ada");
        assert_eq!(profile.last_name(), "Lovelace");
        assert_eq!(profile.email().as_str(), "ada@example.com");
        assert_eq!(profile.display_name(), "Ada Lovelace");
    }

    #[test]
    fn validate_rejects_blank_names() {
        let err = draft("  ", "L", "a@b.c").validate(UserId::generate()).unwrap_err();
        assert_eq!(err, ProfileError::EmptyFirstName);
        let err = draft("A", "", "a@b.c").validate(UserId::generate()).unwrap_err();
        assert_eq!(err, ProfileError::EmptyLastName);
    }

    #[test]
    fn email_rejects_bad_shapes() {
        for bad in ["", "plain", "@host", "user@", "a@b@c", "a b@c.d"] {
            assert!(Email::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn apply_keeps_untouched_fields() {
        let profile = draft("Ada", "Lovelace", "ada@example.com")
            .validate(UserId::generate())
            .unwrap();
        let updated = profile
            .apply(ProfileUpdate {
                first_name: Some("Augusta".into()),
                ..ProfileUpdate::default()
            })
            .unwrap();
        assert_eq!(updated.first_name(), "Augusta");
        assert_eq!(updated.last_name(), "Lovelace");
        assert_eq!(updated.id(), profile.id());
    }

    #[test]
    fn apply_revalidates_email() {
        let profile = draft("Ada", "Lovelace", "ada@example.com")
            .validate(UserId::generate())
            .unwrap();
        let err = profile
            .apply(ProfileUpdate {
                email: Some("nope".into()),
                ..ProfileUpdate::default()
            })
            .unwrap_err();
        assert!(matches!(err, ProfileError::InvalidEmail(_)));
    }
}
