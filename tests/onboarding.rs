use std::sync::Arc;

use diesel::connection::SimpleConnection;
use testcontainers_modules::postgres::Postgres;
use testcontainers_modules::testcontainers::runners::AsyncRunner;
use uuid::Uuid;

use pilot::integration::db;
use pilot::user::model::OnboardingUpdate;
use pilot::user::repository::PgUserRepository;
use pilot::user::service::{UserService, UserServiceImpl};
use pilot::user::{self, Id};

const SCHEMA: &str = include_str!("../migrations/2025-06-01-000001_create_users/up.sql");

async fn pool() -> (
    db::Pool,
    testcontainers_modules::testcontainers::ContainerAsync<Postgres>,
) {
    let container = Postgres::default().start().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();

    let config = db::Config::new("127.0.0.1", port, "postgres", "postgres", "postgres");
    let pool = db::init(&config);

    pool.get().unwrap().batch_execute(SCHEMA).unwrap();

    (pool, container)
}

fn step1(email: Option<&str>) -> OnboardingUpdate {
    serde_json::from_value(serde_json::json!({
        "step": "1",
        "name": "Dana",
        "gender": "Other",
        "email": email,
    }))
    .unwrap()
}

#[tokio::test]
#[ignore = "needs a local Docker daemon"]
async fn onboarding_steps_accumulate_on_one_row() {
    let (pool, _container) = pool().await;
    let repo: user::Repository = Arc::new(PgUserRepository::new(pool));
    let service = UserServiceImpl::new(repo);

    let id = Id::from(Uuid::new_v4());

    let after_step1 = service
        .update_step(&id, step1(Some("dana@example.com")))
        .await
        .unwrap();
    assert_eq!(after_step1.name.as_deref(), Some("Dana"));
    assert!(!after_step1.onboarding_complete);

    let step3: OnboardingUpdate = serde_json::from_value(serde_json::json!({
        "step": "3",
        "active_platforms": ["Instagram DMs", "Email"],
    }))
    .unwrap();

    let after_step3 = service.update_step(&id, step3).await.unwrap();

    // earlier answers survive later steps, email rides along
    assert_eq!(after_step3.name.as_deref(), Some("Dana"));
    assert_eq!(
        after_step3.active_platforms.as_deref(),
        Some(["Instagram DMs".to_string(), "Email".to_string()].as_slice())
    );
    assert_eq!(after_step3.email.as_str(), "dana@example.com");

    let completed = service.complete_onboarding(&id).await.unwrap();
    assert!(completed.onboarding_complete);
}

#[tokio::test]
#[ignore = "needs a local Docker daemon"]
async fn unchanged_step_skips_the_write() {
    let (pool, _container) = pool().await;
    let repo: user::Repository = Arc::new(PgUserRepository::new(pool));
    let service = UserServiceImpl::new(repo);

    let id = Id::from(Uuid::new_v4());

    let first = service
        .update_step(&id, step1(Some("dana@example.com")))
        .await
        .unwrap();
    let second = service.update_step(&id, step1(None)).await.unwrap();

    // identical answers: no new write, timestamps untouched
    assert_eq!(first.updated_at, second.updated_at);
}

#[tokio::test]
#[ignore = "needs a local Docker daemon"]
async fn fresh_row_requires_an_email() {
    let (pool, _container) = pool().await;
    let repo: user::Repository = Arc::new(PgUserRepository::new(pool));
    let service = UserServiceImpl::new(repo);

    let id = Id::from(Uuid::new_v4());
    let result = service.update_step(&id, step1(None)).await;

    assert!(matches!(result, Err(user::Error::EmailRequired)));
}

#[tokio::test]
#[ignore = "needs a local Docker daemon"]
async fn completing_twice_is_idempotent() {
    let (pool, _container) = pool().await;
    let repo: user::Repository = Arc::new(PgUserRepository::new(pool));
    let service = UserServiceImpl::new(repo);

    let id = Id::from(Uuid::new_v4());
    service
        .update_step(&id, step1(Some("dana@example.com")))
        .await
        .unwrap();

    let first = service.complete_onboarding(&id).await.unwrap();
    let second = service.complete_onboarding(&id).await.unwrap();

    assert!(first.onboarding_complete && second.onboarding_complete);
    assert_eq!(first.updated_at, second.updated_at);
}

#[tokio::test]
#[ignore = "needs a local Docker daemon"]
async fn missing_row_is_reported_not_found() {
    let (pool, _container) = pool().await;
    let repo: user::Repository = Arc::new(PgUserRepository::new(pool));
    let service = UserServiceImpl::new(repo);

    let id = Id::from(Uuid::new_v4());
    let result = service.find_onboarding(&id).await;

    assert!(matches!(result, Err(user::Error::NotFound(_))));
}
