use async_trait::async_trait;
use log::debug;

use super::model::{OnboardingUpdate, UserChanges, UserDto};
use super::{Email, Id, Repository};

#[async_trait]
pub trait UserService {
    /// Persists one wizard step. A step whose answers already match the
    /// stored row is a no-op returning the row as-is.
    async fn update_step(&self, id: &Id, update: OnboardingUpdate) -> super::Result<UserDto>;

    /// Idempotent: completing twice returns the row unchanged.
    async fn complete_onboarding(&self, id: &Id) -> super::Result<UserDto>;

    async fn find_onboarding(&self, id: &Id) -> super::Result<UserDto>;
}

#[derive(Clone)]
pub struct UserServiceImpl {
    repo: Repository,
}

impl UserServiceImpl {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// The row's stored email wins; a fresh insert needs one supplied.
    fn resolve_email(existing: Option<&Email>, provided: Option<Email>) -> super::Result<Email> {
        existing
            .cloned()
            .or(provided)
            .ok_or(super::Error::EmailRequired)
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn update_step(&self, id: &Id, update: OnboardingUpdate) -> super::Result<UserDto> {
        let existing = self.repo.find_by_id(id)?;

        if let Some(user) = &existing {
            if update.step.matches(user) {
                debug!("Step already recorded for user {id}, skipping write");
                return Ok(UserDto::from(user.clone()));
            }
        }

        let email = Self::resolve_email(existing.as_ref().map(|u| &u.email), update.email)?;
        let changes = UserChanges::new(*id, email).with_step(update.step);

        self.repo.upsert(&changes).map(UserDto::from)
    }

    async fn complete_onboarding(&self, id: &Id) -> super::Result<UserDto> {
        if let Some(user) = self.repo.find_by_id(id)? {
            if user.onboarding_complete {
                return Ok(UserDto::from(user));
            }
        }

        self.repo.set_onboarding_complete(id).map(UserDto::from)
    }

    async fn find_onboarding(&self, id: &Id) -> super::Result<UserDto> {
        self.repo
            .find_by_id(id)?
            .map(UserDto::from)
            .ok_or(super::Error::NotFound(*id))
    }
}
