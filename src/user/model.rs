use chrono::{DateTime, Utc};
use diesel::prelude::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::schema::users;

use super::{Email, Id};

#[derive(Queryable, Selectable, Clone, Debug)]
#[diesel(table_name = users, check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Id,
    pub email: Email,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub use_case: Option<Vec<String>>,
    pub leads_per_month: Option<String>,
    pub active_platforms: Option<Vec<String>>,
    pub business_type: Option<String>,
    pub pilot_goal: Option<Vec<String>>,
    pub current_tracking: Option<Vec<String>>,
    pub onboarding_complete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Debug)]
pub struct UserDto {
    pub id: Id,
    pub email: Email,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub use_case: Option<Vec<String>>,
    pub leads_per_month: Option<String>,
    pub active_platforms: Option<Vec<String>>,
    pub business_type: Option<String>,
    pub pilot_goal: Option<Vec<String>>,
    pub current_tracking: Option<Vec<String>>,
    pub onboarding_complete: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            gender: u.gender,
            use_case: u.use_case,
            leads_per_month: u.leads_per_month,
            active_platforms: u.active_platforms,
            business_type: u.business_type,
            pilot_goal: u.pilot_goal,
            current_tracking: u.current_tracking,
            onboarding_complete: u.onboarding_complete,
            created_at: u.created_at.to_rfc3339(),
            updated_at: u.updated_at.to_rfc3339(),
        }
    }
}

/// One wizard step's answers, tagged by step number.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "step")]
pub enum StepData {
    #[serde(rename = "1")]
    Profile { name: String, gender: String },
    #[serde(rename = "2")]
    UseCase {
        use_case: Vec<String>,
        leads_per_month: String,
    },
    #[serde(rename = "3")]
    Platforms { active_platforms: Vec<String> },
    #[serde(rename = "4")]
    Business {
        business_type: String,
        pilot_goal: Vec<String>,
    },
    #[serde(rename = "5")]
    Tracking { current_tracking: Vec<String> },
}

impl StepData {
    /// True when the stored row already holds exactly these answers, in
    /// which case the write is skipped.
    pub fn matches(&self, user: &User) -> bool {
        match self {
            Self::Profile { name, gender } => {
                user.name.as_deref() == Some(name) && user.gender.as_deref() == Some(gender)
            }
            Self::UseCase {
                use_case,
                leads_per_month,
            } => {
                user.use_case.as_deref() == Some(use_case)
                    && user.leads_per_month.as_deref() == Some(leads_per_month)
            }
            Self::Platforms { active_platforms } => {
                user.active_platforms.as_deref() == Some(active_platforms)
            }
            Self::Business {
                business_type,
                pilot_goal,
            } => {
                user.business_type.as_deref() == Some(business_type)
                    && user.pilot_goal.as_deref() == Some(pilot_goal)
            }
            Self::Tracking { current_tracking } => {
                user.current_tracking.as_deref() == Some(current_tracking)
            }
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct OnboardingUpdate {
    #[serde(flatten)]
    pub step: StepData,
    pub email: Option<Email>,
}

/// Upsert row for a single onboarding write. `None` fields stay
/// untouched on conflict.
#[derive(Insertable, AsChangeset, Clone, Debug)]
#[diesel(table_name = users)]
pub struct UserChanges {
    pub id: Id,
    pub email: Email,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub use_case: Option<Vec<String>>,
    pub leads_per_month: Option<String>,
    pub active_platforms: Option<Vec<String>>,
    pub business_type: Option<String>,
    pub pilot_goal: Option<Vec<String>>,
    pub current_tracking: Option<Vec<String>>,
    pub onboarding_complete: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl UserChanges {
    pub fn new(id: Id, email: Email) -> Self {
        Self {
            id,
            email,
            name: None,
            gender: None,
            use_case: None,
            leads_per_month: None,
            active_platforms: None,
            business_type: None,
            pilot_goal: None,
            current_tracking: None,
            onboarding_complete: None,
            updated_at: Utc::now(),
        }
    }

    pub fn with_step(mut self, step: StepData) -> Self {
        match step {
            StepData::Profile { name, gender } => {
                self.name = Some(name);
                self.gender = Some(gender);
            }
            StepData::UseCase {
                use_case,
                leads_per_month,
            } => {
                self.use_case = Some(use_case);
                self.leads_per_month = Some(leads_per_month);
            }
            StepData::Platforms { active_platforms } => {
                self.active_platforms = Some(active_platforms);
            }
            StepData::Business {
                business_type,
                pilot_goal,
            } => {
                self.business_type = Some(business_type);
                self.pilot_goal = Some(pilot_goal);
            }
            StepData::Tracking { current_tracking } => {
                self.current_tracking = Some(current_tracking);
            }
        }

        self
    }

    pub fn completed(mut self) -> Self {
        self.onboarding_complete = Some(true);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_payloads_deserialize_by_tag() {
        let step: StepData =
            serde_json::from_str(r#"{"step": "1", "name": "Dana", "gender": "Other"}"#).unwrap();
        assert_eq!(
            step,
            StepData::Profile {
                name: "Dana".into(),
                gender: "Other".into(),
            }
        );

        let step: StepData = serde_json::from_str(
            r#"{"step": "4", "business_type": "Agency", "pilot_goal": ["Follow up"]}"#,
        )
        .unwrap();
        assert!(matches!(step, StepData::Business { .. }));
    }

    #[test]
    fn update_carries_optional_email() {
        let update: OnboardingUpdate = serde_json::from_str(
            r#"{"step": "3", "active_platforms": ["Instagram DMs"], "email": "dana@example.com"}"#,
        )
        .unwrap();

        assert!(update.email.is_some());
        assert!(matches!(update.step, StepData::Platforms { .. }));
    }

    #[test]
    fn invalid_email_is_rejected() {
        let result: Result<Email, _> = serde_json::from_str(r#""not-an-email""#);
        assert!(result.is_err());
    }
}
