use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{MAX_TEXT_LEN, Validate, email, max_len, required};
use crate::error::{AppError, AppResult};

#[derive(Deserialize, Debug, ToSchema)]
pub struct SignUpRequest {
    #[schema(example = "Jhon Doe")]
    pub full_name: String,
    #[schema(example = "example@email.com")]
    pub email: String,
    #[schema(example = "secret")]
    pub password: String,
}

impl Validate for SignUpRequest {
    fn validate(&self) -> AppResult<()> {
        full_name(&self.full_name)?;
        email(&self.email)?;
        required(&self.password, "Password can't be empty")
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SignInRequest {
    #[schema(example = "example@email.com")]
    pub email: String,
    #[schema(example = "secret")]
    pub password: String,
}

impl Validate for SignInRequest {
    fn validate(&self) -> AppResult<()> {
        email(&self.email)?;
        required(&self.password, "Password can't be empty")
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct ModifyUserRequest {
    pub full_name: String,
    pub email: String,
    pub address: Option<String>,
}

impl Validate for ModifyUserRequest {
    fn validate(&self) -> AppResult<()> {
        full_name(&self.full_name)?;
        email(&self.email)
    }
}

fn full_name(value: &str) -> AppResult<()> {
    required(value, "Full name can't be empty")?;
    max_len(value, MAX_TEXT_LEN, "Full name can't be longer than 60 characters")
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

impl Validate for ChangePasswordRequest {
    fn validate(&self) -> AppResult<()> {
        required(&self.old_password, "Old password can't be empty")?;
        required(&self.new_password, "New password can't be empty")?;
        required(&self.confirm_new_password, "Confirm new password can't be empty")?;
        if self.new_password != self.confirm_new_password {
            return Err(AppError::BadRequest("password didn't match".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_up_requires_every_field() {
        let valid = SignUpRequest {
            full_name: "Jane".into(),
            email: "jane@example.com".into(),
            password: "secret".into(),
        };
        assert!(valid.validate().is_ok());

        let missing_name = SignUpRequest {
            full_name: "".into(),
            ..valid
        };
        match missing_name.validate() {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Full name can't be empty"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn change_password_requires_matching_confirmation() {
        let payload = ChangePasswordRequest {
            old_password: "old".into(),
            new_password: "new-secret".into(),
            confirm_new_password: "new-secrte".into(),
        };
        match payload.validate() {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "password didn't match"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn modify_rejects_overlong_full_name() {
        let payload = ModifyUserRequest {
            full_name: "x".repeat(61),
            email: "jane@example.com".into(),
            address: None,
        };
        match payload.validate() {
            Err(AppError::BadRequest(msg)) => {
                assert_eq!(msg, "Full name can't be longer than 60 characters")
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
