//! Profile service - business logic for the planner's biometric profile

use crate::error::{ApiError, ApiResult};
use crate::repositories::{ProfileStore, ProfileUpdate};
use nutrition_planner_shared::validation::{
    get_field_display_label, validate_activity_level, validate_gender, validate_height_text,
};
use nutrition_planner_shared::{
    ActivityLevel, FeetInchesHeight, ProfileResolver, ProfileResponse, Sex, UpdateProfileRequest,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Profile operations over the profile store
#[derive(Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileStore>,
    resolver: ProfileResolver,
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileStore>, resolver: ProfileResolver) -> Self {
        Self { profiles, resolver }
    }

    /// Stored profile plus the fields still missing for planning
    pub async fn get_profile(&self, user_id: Uuid) -> ApiResult<ProfileResponse> {
        let stored = self.profiles.get_profile(user_id).await?;
        let resolved = self.resolver.resolve(&stored);
        Ok(ProfileResponse::new(stored, &resolved))
    }

    /// Validate and apply a partial profile update
    ///
    /// Text fields are stored in canonical form (`5'11"`, lowercase enums).
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        req: UpdateProfileRequest,
    ) -> ApiResult<ProfileResponse> {
        req.validate()?;
        let update = Self::normalize(req)?;

        let stored = self.profiles.update_profile(user_id, update).await?;
        info!(%user_id, "Updated profile");

        let resolved = self.resolver.resolve(&stored);
        Ok(ProfileResponse::new(stored, &resolved))
    }

    fn normalize(req: UpdateProfileRequest) -> ApiResult<ProfileUpdate> {
        let height = req
            .height
            .map(|h| -> ApiResult<String> {
                validate_height_text(&h).map_err(|msg| field_error("height", msg))?;
                FeetInchesHeight::parse(&h)
                    .map(|parsed| parsed.to_string())
                    .ok_or_else(|| field_error("height", "Height could not be parsed".to_string()))
            })
            .transpose()?;

        let gender = req
            .gender
            .map(|g| -> ApiResult<String> {
                validate_gender(&g).map_err(|msg| field_error("gender", msg))?;
                Ok(Sex::parse_lossy(&g).as_str().to_string())
            })
            .transpose()?;

        let activity_level = req
            .activity_level
            .map(|level| -> ApiResult<String> {
                validate_activity_level(&level).map_err(|msg| field_error("activity_level", msg))?;
                level
                    .parse::<ActivityLevel>()
                    .map(|parsed| parsed.as_str().to_string())
                    .map_err(|msg| field_error("activity_level", msg))
            })
            .transpose()?;

        Ok(ProfileUpdate {
            age: req.age,
            height,
            gender,
            weight: req.weight,
            activity_level,
        })
    }
}

fn field_error(field: &str, message: String) -> ApiError {
    ApiError::InvalidField {
        field: field.to_string(),
        message: format!("{}: {}", get_field_display_label(field), message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryProfileStore;
    use rstest::rstest;

    fn service() -> ProfileService {
        ProfileService::new(
            Arc::new(InMemoryProfileStore::new()),
            ProfileResolver::new(ActivityLevel::Light),
        )
    }

    #[tokio::test]
    async fn test_empty_profile_reports_all_missing() {
        let profile = service().get_profile(Uuid::new_v4()).await.unwrap();
        assert_eq!(profile.missing_fields, vec!["age", "weight", "height", "sex"]);
        assert_eq!(profile.activity_level, ActivityLevel::Light);
        assert!(!profile.complete);
    }

    #[tokio::test]
    async fn test_update_normalizes_text_fields() {
        let service = service();
        let user_id = Uuid::new_v4();
        let profile = service
            .update_profile(
                user_id,
                UpdateProfileRequest {
                    age: Some(30),
                    height: Some(" 5 ' 10 \" ".to_string()),
                    gender: Some("Male".to_string()),
                    weight: Some(154.0),
                    activity_level: Some("very_active".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(profile.height.as_deref(), Some("5'10\""));
        assert_eq!(profile.gender.as_deref(), Some("male"));
        assert_eq!(profile.activity_level, ActivityLevel::Very);
        assert!(profile.complete);
    }

    #[tokio::test]
    async fn test_invalid_height_names_field() {
        let err = service()
            .update_profile(
                Uuid::new_v4(),
                UpdateProfileRequest {
                    height: Some("5'14\"".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        match err {
            ApiError::InvalidField { field, message } => {
                assert_eq!(field, "height");
                assert!(message.starts_with("Height:"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[rstest]
    #[case::unknown_gender(UpdateProfileRequest { gender: Some("robot".into()), ..Default::default() }, "gender")]
    #[case::age_too_high(UpdateProfileRequest { age: Some(200), ..Default::default() }, "age")]
    #[case::bad_activity(UpdateProfileRequest { activity_level: Some("couch".into()), ..Default::default() }, "activity_level")]
    #[case::zero_feet(UpdateProfileRequest { height: Some("0'9\"".into()), ..Default::default() }, "height")]
    #[tokio::test]
    async fn test_invalid_update_names_field(
        #[case] req: UpdateProfileRequest,
        #[case] expected: &str,
    ) {
        let err = service().update_profile(Uuid::new_v4(), req).await.unwrap_err();
        assert!(
            matches!(&err, ApiError::InvalidField { field, .. } if field == expected),
            "unexpected error: {:?}",
            err
        );
    }
}
