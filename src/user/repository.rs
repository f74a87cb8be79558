use chrono::Utc;
use diesel::ExpressionMethods;
use diesel::OptionalExtension;
use diesel::QueryDsl;
use diesel::RunQueryDsl;
use diesel::SelectableHelper;

use crate::integration::db;
use crate::schema::users;

use super::Id;
use super::model::{User, UserChanges};

pub trait UserRepository {
    fn find_by_id(&self, id: &Id) -> super::Result<Option<User>>;

    /// Inserts the row or, on an existing id, applies only the fields
    /// present in `changes`.
    fn upsert(&self, changes: &UserChanges) -> super::Result<User>;

    fn set_onboarding_complete(&self, id: &Id) -> super::Result<User>;
}

pub struct PgUserRepository {
    pool: db::Pool,
}

impl PgUserRepository {
    pub fn new(pool: db::Pool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgUserRepository {
    fn find_by_id(&self, id: &Id) -> super::Result<Option<User>> {
        let mut conn = self.pool.get()?;

        let user = users::table
            .find(id)
            .select(User::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(user)
    }

    fn upsert(&self, changes: &UserChanges) -> super::Result<User> {
        let mut conn = self.pool.get()?;

        let user = diesel::insert_into(users::table)
            .values(changes)
            .on_conflict(users::id)
            .do_update()
            .set(changes)
            .returning(User::as_returning())
            .get_result(&mut conn)?;

        Ok(user)
    }

    fn set_onboarding_complete(&self, id: &Id) -> super::Result<User> {
        let mut conn = self.pool.get()?;

        let user = diesel::update(users::table.find(id))
            .set((
                users::onboarding_complete.eq(true),
                users::updated_at.eq(Utc::now()),
            ))
            .returning(User::as_returning())
            .get_result(&mut conn)
            .optional()?;

        user.ok_or(super::Error::NotFound(*id))
    }
}
