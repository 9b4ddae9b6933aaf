use crate::error::{AppError, AppResult};

pub mod categories;
pub mod orders;
pub mod products;
pub mod transactions;
pub mod users;

/// Payload rules checked after the body has been deserialized.
pub trait Validate {
    fn validate(&self) -> AppResult<()>;
}

pub(crate) fn required(value: &str, message: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(message.to_string()));
    }
    Ok(())
}

/// Column width shared by names, emails and category types.
pub(crate) const MAX_TEXT_LEN: usize = 60;

pub(crate) fn max_len(value: &str, max: usize, message: &str) -> AppResult<()> {
    if value.chars().count() > max {
        return Err(AppError::BadRequest(message.to_string()));
    }
    Ok(())
}

pub(crate) fn positive(value: i64, message: &str) -> AppResult<()> {
    if value <= 0 {
        return Err(AppError::BadRequest(message.to_string()));
    }
    Ok(())
}

pub(crate) fn email(value: &str) -> AppResult<()> {
    required(value, "Email can't be empty")?;
    max_len(value, MAX_TEXT_LEN, "Email can't be longer than 60 characters")?;
    if !looks_like_email(value) {
        return Err(AppError::BadRequest(format!(
            "{value} does not validate as email"
        )));
    }
    Ok(())
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}
