//! Validation rules for user payloads.

use super::user::UserProps;
use repository_framework::{ClassValidatorFields, FieldsErrors, ValidatorFields};
use validator::Validate;

/// Field rules applied to [`UserProps`] before a user is created or changed.
#[derive(Debug, Clone, Validate)]
pub struct UserRules {
    #[validate(length(min = 1, max = 255, message = "name must be between 1 and 255 characters"))]
    pub name: String,

    #[validate(
        email(message = "email must be an email"),
        length(min = 1, max = 255, message = "email must be between 1 and 255 characters")
    )]
    pub email: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "password must be between 1 and 100 characters"
    ))]
    pub password: String,
}

impl From<&UserProps> for UserRules {
    fn from(props: &UserProps) -> Self {
        Self {
            name: props.name.clone(),
            email: props.email.clone(),
            password: props.password.clone(),
        }
    }
}

/// Validates [`UserProps`] against [`UserRules`].
#[derive(Debug, Default)]
pub struct UserValidator {
    rules: ClassValidatorFields<UserRules>,
    validated: Option<UserProps>,
}

impl UserValidator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ValidatorFields<UserProps> for UserValidator {
    fn validate(&mut self, data: &UserProps) -> bool {
        self.validated = None;
        let valid = self.rules.validate(&UserRules::from(data));
        if valid {
            self.validated = Some(data.clone());
        }
        valid
    }

    fn errors(&self) -> &FieldsErrors {
        self.rules.errors()
    }

    fn validated_data(&self) -> Option<&UserProps> {
        self.validated.as_ref()
    }
}
