pub(super) mod api {
    use axum::Json;
    use axum::extract::{Path, State};

    use crate::user::model::{OnboardingUpdate, UserDto};
    use crate::user::{self, Id};

    pub async fn find_onboarding(
        Path(id): Path<Id>,
        user_service: State<user::Service>,
    ) -> crate::Result<Json<UserDto>> {
        let user = user_service.find_onboarding(&id).await?;
        Ok(Json(user))
    }

    pub async fn update_step(
        Path(id): Path<Id>,
        user_service: State<user::Service>,
        Json(update): Json<OnboardingUpdate>,
    ) -> crate::Result<Json<UserDto>> {
        let user = user_service.update_step(&id, update).await?;
        Ok(Json(user))
    }

    pub async fn complete(
        Path(id): Path<Id>,
        user_service: State<user::Service>,
    ) -> crate::Result<Json<UserDto>> {
        let user = user_service.complete_onboarding(&id).await?;
        Ok(Json(user))
    }
}
