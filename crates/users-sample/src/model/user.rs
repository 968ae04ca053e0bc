use super::validator::UserValidator;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use repository_framework::{
    ensure_valid, sort_by_field, DomainError, Entity, ResourceEntity, SearchableEntity,
    SortDirection, SortKey, SortableFields,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload of a [`UserEntity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProps {
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl UserProps {
    /// Props created now.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            created_at: Utc::now(),
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

/// A registered user.
///
/// Props are validated on construction and before every change, so a
/// `UserEntity` always satisfies [`UserRules`](super::UserRules).
///
/// # Search
/// - filter: case-insensitive substring of name or email
/// - sortable: `name`, `email`, `createdAt`
/// - no sort requested: newest first (`createdAt desc`)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UserEntity {
    entity: Entity<UserProps>,
}

impl UserEntity {
    /// Validates `props` and wraps them with `id`, or a fresh UUID.
    pub fn new(props: UserProps, id: Option<String>) -> Result<Self, DomainError> {
        Self::validate(&props)?;
        Ok(Self {
            entity: Entity::with_id(props, id),
        })
    }

    pub fn validate(props: &UserProps) -> Result<(), DomainError> {
        ensure_valid(&mut UserValidator::new(), props)
    }

    /// Renames the user. Nothing changes when the new name is rejected.
    pub fn update(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let candidate = UserProps {
            name: name.into(),
            ..self.props().clone()
        };
        Self::validate(&candidate)?;
        self.entity.props_mut().name = candidate.name;
        Ok(())
    }

    /// Replaces the password. Nothing changes when it is rejected.
    pub fn update_password(&mut self, password: impl Into<String>) -> Result<(), DomainError> {
        let candidate = UserProps {
            password: password.into(),
            ..self.props().clone()
        };
        Self::validate(&candidate)?;
        self.entity.props_mut().password = candidate.password;
        Ok(())
    }

    pub fn id(&self) -> &str {
        self.entity.id()
    }

    pub fn props(&self) -> &UserProps {
        self.entity.props()
    }

    pub fn name(&self) -> &str {
        &self.props().name
    }

    pub fn email(&self) -> &str {
        &self.props().email
    }

    pub fn password(&self) -> &str {
        &self.props().password
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.props().created_at
    }
}

impl ResourceEntity for UserEntity {
    fn id(&self) -> &str {
        self.entity.id()
    }

    fn to_json(&self) -> Value {
        self.entity.to_json()
    }
}

#[async_trait]
impl SearchableEntity for UserEntity {
    fn sortable_fields() -> SortableFields<Self> {
        SortableFields::new()
            .field("name", |u: &UserEntity| SortKey::text(u.name()))
            .field("email", |u: &UserEntity| SortKey::text(u.email()))
            .field("createdAt", |u: &UserEntity| SortKey::Timestamp(u.created_at()))
    }

    async fn apply_filter(items: Vec<Self>, filter: Option<&str>) -> Vec<Self> {
        let Some(filter) = filter else {
            return items;
        };
        let needle = filter.to_lowercase();
        items
            .into_iter()
            .filter(|user| {
                user.name().to_lowercase().contains(&needle)
                    || user.email().to_lowercase().contains(&needle)
            })
            .collect()
    }

    fn apply_sort(
        items: Vec<Self>,
        sort: Option<&str>,
        sort_dir: Option<SortDirection>,
    ) -> Vec<Self> {
        let fields = Self::sortable_fields();
        match sort {
            Some(_) => sort_by_field(items, &fields, sort, sort_dir),
            None => sort_by_field(items, &fields, Some("createdAt"), Some(SortDirection::Desc)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::user_data_builder;
    use chrono::Duration;

    #[test]
    fn test_constructor_keeps_props_and_generates_id() {
        let props = user_data_builder().name("Ada").build();
        let user = UserEntity::new(props.clone(), None).unwrap();

        assert_eq!(user.props(), &props);
        assert_eq!(user.name(), "Ada");
        assert_eq!(user.id().len(), 36);
    }

    #[test]
    fn test_constructor_keeps_supplied_id() {
        let user = UserEntity::new(user_data_builder().build(), Some("u-1".to_string())).unwrap();
        assert_eq!(user.id(), "u-1");
    }

    #[test]
    fn test_created_at_defaults_to_now() {
        let before = Utc::now();
        let props = UserProps::new("Ada", "ada@example.com", "secret");
        let user = UserEntity::new(props, None).unwrap();

        assert!(user.created_at() >= before);
        assert!(user.created_at() <= Utc::now());
    }

    #[test]
    fn test_constructor_rejects_invalid_props() {
        let props = user_data_builder().name("").email("nope").build();

        let err = UserEntity::new(props, None).unwrap_err();

        let fields = err.field_errors().unwrap();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(!fields.contains_key("password"));
    }

    #[test]
    fn test_update_name() {
        let mut user = UserEntity::new(user_data_builder().build(), None).unwrap();

        user.update("Grace").unwrap();

        assert_eq!(user.name(), "Grace");
    }

    #[test]
    fn test_rejected_update_leaves_user_untouched() {
        let mut user = UserEntity::new(user_data_builder().name("Ada").build(), None).unwrap();

        let err = user.update("").unwrap_err();

        assert!(matches!(err, DomainError::EntityValidation(_)));
        assert_eq!(user.name(), "Ada");
    }

    #[test]
    fn test_update_password() {
        let mut user = UserEntity::new(user_data_builder().build(), None).unwrap();

        user.update_password("other-secret").unwrap();
        assert_eq!(user.password(), "other-secret");

        assert!(user.update_password("x".repeat(101)).is_err());
        assert_eq!(user.password(), "other-secret");
    }

    #[test]
    fn test_to_json_flattens_props() {
        let user = UserEntity::new(user_data_builder().name("Ada").build(), None).unwrap();
        let json = user.to_json();

        assert_eq!(json["id"], user.id());
        assert_eq!(json["name"], "Ada");
        assert_eq!(json["email"], user.email());
        assert!(json["createdAt"].is_string());
        assert!(json.get("created_at").is_none());
    }

    fn user_created(name: &str, minutes_ago: i64) -> UserEntity {
        let props = user_data_builder()
            .name(name)
            .created_at(Utc::now() - Duration::minutes(minutes_ago))
            .build();
        UserEntity::new(props, None).unwrap()
    }

    fn names(items: &[UserEntity]) -> Vec<&str> {
        items.iter().map(UserEntity::name).collect()
    }

    #[test]
    fn test_default_order_is_newest_first() {
        let items = vec![
            user_created("old", 30),
            user_created("new", 1),
            user_created("mid", 10),
        ];

        let sorted = UserEntity::apply_sort(items, None, None);

        assert_eq!(names(&sorted), ["new", "mid", "old"]);
    }

    #[test]
    fn test_requested_sort_wins() {
        let items = vec![user_created("b", 1), user_created("a", 2), user_created("c", 3)];

        let sorted = UserEntity::apply_sort(items, Some("name"), Some(SortDirection::Asc));

        assert_eq!(names(&sorted), ["a", "b", "c"]);
    }

    #[test]
    fn test_sort_by_created_at_ascending() {
        let items = vec![user_created("mid", 10), user_created("new", 1), user_created("old", 30)];

        let sorted = UserEntity::apply_sort(items, Some("createdAt"), Some(SortDirection::Asc));

        assert_eq!(names(&sorted), ["old", "mid", "new"]);
    }

    #[tokio::test]
    async fn test_filter_matches_name_or_email() {
        let items = vec![
            UserEntity::new(user_data_builder().name("Test Name").build(), None).unwrap(),
            UserEntity::new(
                user_data_builder()
                    .name("someone")
                    .email("TEST@example.com")
                    .build(),
                None,
            )
            .unwrap(),
            UserEntity::new(user_data_builder().name("other").build(), None).unwrap(),
        ];

        let filtered = UserEntity::apply_filter(items, Some("test")).await;

        assert_eq!(names(&filtered), ["Test Name", "someone"]);
    }
}
