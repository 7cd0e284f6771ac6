//! 校验错误类型

use std::fmt;
use thiserror::Error;

/// 可校验的任务字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 校验错误，全部对应客户端错误 (HTTP 400)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// 字段缺失或去除空白后为空
    #[error("{}", missing_message(.0))]
    Missing(Vec<Field>),

    /// 字段超出长度上限
    #[error("{field} must be at most {max} characters")]
    TooLong { field: Field, max: usize },

    /// id 格式错误
    #[error("Invalid id")]
    InvalidId(String),
}

impl ValidationError {
    /// 获取错误代码
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::Missing(_) => "MISSING_FIELD",
            ValidationError::TooLong { .. } => "FIELD_TOO_LONG",
            ValidationError::InvalidId(_) => "INVALID_ID",
        }
    }
}

fn missing_message(fields: &[Field]) -> String {
    match fields {
        [] => "required field missing".to_string(),
        [field] => format!("{} is required", field),
        _ => {
            let names: Vec<&str> = fields.iter().map(Field::as_str).collect();
            format!("{} are required", names.join(" and "))
        }
    }
}

/// 校验结果类型别名
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_messages() {
        let one = ValidationError::Missing(vec![Field::Description]);
        assert_eq!(one.to_string(), "description is required");

        let both = ValidationError::Missing(vec![Field::Title, Field::Description]);
        assert_eq!(both.to_string(), "title and description are required");
    }

    #[test]
    fn test_too_long_message() {
        let error = ValidationError::TooLong {
            field: Field::Title,
            max: 120,
        };
        assert_eq!(error.to_string(), "title must be at most 120 characters");
        assert_eq!(error.error_code(), "FIELD_TOO_LONG");
    }

    #[test]
    fn test_invalid_id_hides_input() {
        let error = ValidationError::InvalidId("not-an-id".to_string());
        assert_eq!(error.to_string(), "Invalid id");
    }
}
