use serde::Deserialize;
use utoipa::ToSchema;

use super::{MAX_TEXT_LEN, Validate, max_len, required};
use crate::error::AppResult;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryRequest {
    #[serde(rename = "type")]
    #[schema(example = "shirts")]
    pub kind: String,
}

impl Validate for CategoryRequest {
    fn validate(&self) -> AppResult<()> {
        required(&self.kind, "Type can't be empty")?;
        max_len(&self.kind, MAX_TEXT_LEN, "Type can't be longer than 60 characters")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn type_must_fit_the_column() {
        let ok = CategoryRequest { kind: "t".repeat(60) };
        assert!(ok.validate().is_ok());

        let long = CategoryRequest { kind: "t".repeat(61) };
        assert!(matches!(long.validate(), Err(AppError::BadRequest(_))));
    }
}
