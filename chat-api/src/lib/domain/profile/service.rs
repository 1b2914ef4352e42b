use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::profile::errors::ProfileError;
use crate::domain::profile::models::CreateProfileCommand;
use crate::domain::profile::models::NewProfile;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileId;
use crate::domain::profile::models::UpdateProfileCommand;
use crate::domain::profile::ports::ProfileRepository;
use crate::domain::profile::ports::ProfileServicePort;
use crate::domain::user::models::UserId;

pub struct ProfileService<PR>
where
    PR: ProfileRepository,
{
    repository: Arc<PR>,
}

impl<PR> ProfileService<PR>
where
    PR: ProfileRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }

    async fn active_profile_of(&self, user_id: &UserId) -> Result<Profile, ProfileError> {
        self.repository
            .find_by_user_id(user_id)
            .await?
            .filter(|profile| !profile.is_deleted())
            .ok_or(ProfileError::NotFound(user_id.to_string()))
    }
}

#[async_trait]
impl<PR> ProfileServicePort for ProfileService<PR>
where
    PR: ProfileRepository,
{
    async fn get_own_profile(&self, user_id: &UserId) -> Result<Profile, ProfileError> {
        self.active_profile_of(user_id).await
    }

    async fn get_profile(&self, id: &ProfileId) -> Result<Profile, ProfileError> {
        self.repository
            .find_by_id(id)
            .await?
            .filter(|profile| !profile.is_deleted())
            .ok_or(ProfileError::NotFound(id.to_string()))
    }

    async fn create_profile(
        &self,
        user_id: &UserId,
        command: CreateProfileCommand,
    ) -> Result<Profile, ProfileError> {
        if self.repository.find_by_user_id(user_id).await?.is_some() {
            return Err(ProfileError::AlreadyExists(user_id.to_string()));
        }

        let profile = self
            .repository
            .create(NewProfile {
                id: ProfileId::new(),
                user_id: *user_id,
                first_name: command.first_name,
                last_name: command.last_name,
                bio: command.bio,
                avatar: command.avatar,
            })
            .await?;

        tracing::info!(user_id = %user_id, profile_id = %profile.id, "Profile created");

        Ok(profile)
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<Profile, ProfileError> {
        let mut profile = self.active_profile_of(user_id).await?;
        command.apply(&mut profile);
        self.repository.update(profile).await
    }

    async fn delete_profile(&self, user_id: &UserId) -> Result<(), ProfileError> {
        self.active_profile_of(user_id).await?;
        self.repository
            .set_deleted_at(user_id, Some(Utc::now()))
            .await?;

        tracing::info!(user_id = %user_id, "Profile deactivated");

        Ok(())
    }

    async fn reactivate_profile(&self, user_id: &UserId) -> Result<Profile, ProfileError> {
        let mut profile = self
            .repository
            .find_by_user_id(user_id)
            .await?
            .ok_or(ProfileError::NotFound(user_id.to_string()))?;

        if profile.is_deleted() {
            self.repository.set_deleted_at(user_id, None).await?;
            profile.deleted_at = None;
            tracing::info!(user_id = %user_id, "Profile reactivated");
        }

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::profile::models::Avatar;
    use crate::domain::profile::models::PersonName;

    mock! {
        pub TestProfileRepository {}

        #[async_trait]
        impl ProfileRepository for TestProfileRepository {
            async fn create(&self, profile: NewProfile) -> Result<Profile, ProfileError>;
            async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, ProfileError>;
            async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Profile>, ProfileError>;
            async fn update(&self, profile: Profile) -> Result<Profile, ProfileError>;
            async fn set_deleted_at(
                &self,
                user_id: &UserId,
                deleted_at: Option<DateTime<Utc>>,
            ) -> Result<(), ProfileError>;
        }
    }

    fn profile_for(user_id: UserId) -> Profile {
        let now = Utc::now();
        Profile {
            id: ProfileId::new(),
            user_id,
            first_name: PersonName::new("Ada".to_string()).unwrap(),
            last_name: PersonName::new("Lovelace".to_string()).unwrap(),
            bio: None,
            avatar: Avatar::new("https://cdn.example.com/ada.png".to_string()).unwrap(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn from_new(new: NewProfile) -> Profile {
        let mut profile = profile_for(new.user_id);
        profile.id = new.id;
        profile.first_name = new.first_name;
        profile.last_name = new.last_name;
        profile.bio = new.bio;
        profile.avatar = new.avatar;
        profile
    }

    fn create_command() -> CreateProfileCommand {
        CreateProfileCommand {
            first_name: PersonName::new("Ada".to_string()).unwrap(),
            last_name: PersonName::new("Lovelace".to_string()).unwrap(),
            bio: Some("Analyst".to_string()),
            avatar: Avatar::new("https://cdn.example.com/ada.png".to_string()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_profile_success() {
        let user_id = UserId::new();
        let mut repository = MockTestProfileRepository::new();

        repository
            .expect_find_by_user_id()
            .with(eq(user_id))
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(move |new| new.user_id == user_id && new.bio.as_deref() == Some("Analyst"))
            .times(1)
            .returning(|new| Ok(from_new(new)));

        let service = ProfileService::new(Arc::new(repository));

        let profile = service
            .create_profile(&user_id, create_command())
            .await
            .unwrap();
        assert_eq!(profile.user_id, user_id);
        assert_eq!(profile.first_name.as_str(), "Ada");
    }

    #[tokio::test]
    async fn test_create_profile_rejects_second_profile() {
        let user_id = UserId::new();
        let mut existing = profile_for(user_id);
        existing.deleted_at = Some(Utc::now());

        let mut repository = MockTestProfileRepository::new();
        repository
            .expect_find_by_user_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_create().times(0);

        let service = ProfileService::new(Arc::new(repository));

        let result = service.create_profile(&user_id, create_command()).await;
        assert!(matches!(result, Err(ProfileError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_get_profile_hides_deactivated() {
        let mut profile = profile_for(UserId::new());
        profile.deleted_at = Some(Utc::now());
        let profile_id = profile.id;

        let mut repository = MockTestProfileRepository::new();
        repository
            .expect_find_by_id()
            .with(eq(profile_id))
            .times(1)
            .returning(move |_| Ok(Some(profile.clone())));

        let service = ProfileService::new(Arc::new(repository));

        let result = service.get_profile(&profile_id).await;
        assert!(matches!(result, Err(ProfileError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_profile_applies_only_provided_fields() {
        let user_id = UserId::new();
        let existing = profile_for(user_id);

        let mut repository = MockTestProfileRepository::new();
        repository
            .expect_find_by_user_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_update()
            .withf(|profile| {
                profile.first_name.as_str() == "Augusta"
                    && profile.last_name.as_str() == "Lovelace"
                    && profile.bio.is_none()
            })
            .times(1)
            .returning(|profile| Ok(profile));

        let service = ProfileService::new(Arc::new(repository));

        let command = UpdateProfileCommand::new(
            Some(PersonName::new("Augusta".to_string()).unwrap()),
            None,
            None,
            None,
        )
        .unwrap();

        let profile = service.update_profile(&user_id, command).await.unwrap();
        assert_eq!(profile.first_name.as_str(), "Augusta");
    }

    #[tokio::test]
    async fn test_update_profile_requires_active_profile() {
        let mut repository = MockTestProfileRepository::new();
        repository
            .expect_find_by_user_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update().times(0);

        let service = ProfileService::new(Arc::new(repository));

        let command = UpdateProfileCommand::new(None, None, Some("bio".to_string()), None).unwrap();
        let result = service.update_profile(&UserId::new(), command).await;
        assert!(matches!(result, Err(ProfileError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_profile_sets_timestamp() {
        let user_id = UserId::new();
        let existing = profile_for(user_id);

        let mut repository = MockTestProfileRepository::new();
        repository
            .expect_find_by_user_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_set_deleted_at()
            .withf(move |id, deleted_at| *id == user_id && deleted_at.is_some())
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ProfileService::new(Arc::new(repository));

        assert!(service.delete_profile(&user_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_reactivate_profile_clears_timestamp() {
        let user_id = UserId::new();
        let mut existing = profile_for(user_id);
        existing.deleted_at = Some(Utc::now());

        let mut repository = MockTestProfileRepository::new();
        repository
            .expect_find_by_user_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_set_deleted_at()
            .withf(move |id, deleted_at| *id == user_id && deleted_at.is_none())
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ProfileService::new(Arc::new(repository));

        let profile = service.reactivate_profile(&user_id).await.unwrap();
        assert!(!profile.is_deleted());
    }

    #[tokio::test]
    async fn test_reactivate_active_profile_is_noop() {
        let user_id = UserId::new();
        let existing = profile_for(user_id);

        let mut repository = MockTestProfileRepository::new();
        repository
            .expect_find_by_user_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_set_deleted_at().times(0);

        let service = ProfileService::new(Arc::new(repository));

        assert!(service.reactivate_profile(&user_id).await.is_ok());
    }
}
