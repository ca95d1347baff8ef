use std::sync::{Arc, Mutex};

use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use argon2::{Argon2, Params};
use bridge_core::gate::{Destination, landing_after_sign_in};
use bridge_core::model::{
    Email, ProfileDraft, ProfileUpdate, UserId, UserProfile, UserProgress,
};
use storage::repository::{
    CredentialRecord, CredentialRepository, ProfileRepository, StorageError,
};

use crate::Clock;
use crate::error::AuthError;
use crate::progress_service::ProgressService;

/// Shortest password accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Debug)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// The signed-in user together with their progress snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthSession {
    pub profile: UserProfile,
    pub progress: UserProgress,
    pub landing: Destination,
}

impl AuthSession {
    fn new(profile: UserProfile, progress: UserProgress) -> Self {
        let landing = landing_after_sign_in(progress.gate_state());
        Self {
            profile,
            progress,
            landing,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.profile.id()
    }
}

/// Local account store: argon2 credentials plus the single active session.
#[derive(Clone)]
pub struct AuthService {
    clock: Clock,
    profiles: Arc<dyn ProfileRepository>,
    credentials: Arc<dyn CredentialRepository>,
    progress: ProgressService,
    params: Params,
    session: Arc<Mutex<Option<AuthSession>>>,
}

impl AuthService {
    #[must_use]
    pub fn new(
        clock: Clock,
        profiles: Arc<dyn ProfileRepository>,
        credentials: Arc<dyn CredentialRepository>,
        progress: ProgressService,
    ) -> Self {
        Self {
            clock,
            profiles,
            credentials,
            progress,
            params: Params::default(),
            session: Arc::new(Mutex::new(None)),
        }
    }

    /// Override the argon2 cost parameters (tests use cheap ones).
    #[must_use]
    pub fn with_hash_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Create an account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Profile` for invalid names or email, `WeakPassword`
    /// for short passwords, `EmailTaken` for duplicates, and `Storage` on
    /// repository failures.
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<AuthSession, AuthError> {
        let profile = ProfileDraft {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
        }
        .validate(UserId::generate())?;

        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword {
                min: MIN_PASSWORD_LEN,
            });
        }
        if self
            .credentials
            .find_credential_by_email(profile.email())
            .await?
            .is_some()
        {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = self.hash_password(&request.password)?;

        let record = CredentialRecord {
            user_id: profile.id(),
            email: profile.email().clone(),
            password_hash,
            created_at: self.clock.now(),
        };
        self.credentials
            .register_account(&profile, &record)
            .await
            .map_err(taken_on_conflict)?;
        let progress = self
            .progress
            .get_or_create(profile.id())
            .await
            .map_err(progress_storage)?;

        tracing::info!(user_id = %profile.id(), "account created");
        Ok(self.start_session(profile, progress))
    }

    /// Verify credentials and start a session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown email or wrong
    /// password, and `Storage` on repository failures.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;
        let Some(record) = self.credentials.find_credential_by_email(&email).await? else {
            tracing::info!("sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        };
        if !verify_password(password, &record.password_hash)? {
            tracing::info!(user_id = %record.user_id, "sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let profile = self
            .profiles
            .get_profile(record.user_id)
            .await?
            .ok_or(AuthError::Storage(StorageError::NotFound))?;
        let progress = self
            .progress
            .get_or_create(record.user_id)
            .await
            .map_err(progress_storage)?;

        tracing::info!(user_id = %record.user_id, "signed in");
        Ok(self.start_session(profile, progress))
    }

    pub fn sign_out(&self) {
        if let Ok(mut guard) = self.session.lock()
            && let Some(session) = guard.take()
        {
            tracing::info!(user_id = %session.user_id(), "signed out");
        }
    }

    #[must_use]
    pub fn current_session(&self) -> Option<AuthSession> {
        self.session.lock().ok().and_then(|guard| guard.clone())
    }

    /// Reload the session's progress snapshot after a write elsewhere.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotSignedIn` without a session, `Storage` on repository failures.
    pub async fn refresh_session(&self) -> Result<AuthSession, AuthError> {
        let session = self.current_session().ok_or(AuthError::NotSignedIn)?;
        let progress = self
            .progress
            .get_or_create(session.user_id())
            .await
            .map_err(progress_storage)?;
        Ok(self.start_session(session.profile, progress))
    }

    /// Validate and persist profile edits for the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotSignedIn`, `Profile` for invalid fields,
    /// `EmailTaken` if the new email belongs to someone else, or `Storage`.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<UserProfile, AuthError> {
        let session = self.current_session().ok_or(AuthError::NotSignedIn)?;
        if update.is_empty() {
            return Ok(session.profile);
        }
        let updated = session.profile.apply(update)?;
        self.profiles
            .update_profile(&updated)
            .await
            .map_err(taken_on_conflict)?;

        if let Ok(mut guard) = self.session.lock()
            && let Some(active) = guard.as_mut()
        {
            active.profile = updated.clone();
        }
        tracing::info!(user_id = %updated.id(), "profile updated");
        Ok(updated)
    }

    fn start_session(&self, profile: UserProfile, progress: UserProgress) -> AuthSession {
        let session = AuthSession::new(profile, progress);
        if let Ok(mut guard) = self.session.lock() {
            *guard = Some(session.clone());
        }
        session
    }

    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let argon2 = Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            self.params.clone(),
        );
        let salt = SaltString::generate(&mut OsRng);
        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }
}

fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hashing(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

fn taken_on_conflict(err: StorageError) -> AuthError {
    match err {
        StorageError::Conflict => AuthError::EmailTaken,
        other => AuthError::Storage(other),
    }
}

fn progress_storage(err: crate::error::ProgressError) -> AuthError {
    match err {
        crate::error::ProgressError::Storage(storage) => AuthError::Storage(storage),
        other => AuthError::Storage(StorageError::Connection(other.to_string())),
    }
}
