//! 공통 에러 타입
//!
//! jobly 전체에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// jobly 공통 에러
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────────
    // Compile Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("no data to update")]
    EmptyInput,

    #[error("invalid filter key: {key}")]
    InvalidFilterKey { key: String },

    #[error("invalid value for filter '{key}': expected {expected}")]
    InvalidFilterValue { key: String, expected: &'static str },

    #[error("invalid range: {max_key} must be greater than or equal to {min_key}")]
    InvalidRange { min_key: String, max_key: String },

    #[error("unknown or read-only field: {key}")]
    UnknownColumn { key: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Entity Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("no {entity}: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("duplicate {entity}: {id}")]
    DuplicateKey { entity: &'static str, id: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Auth Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("authentication required")]
    Unauthenticated,

    #[error("access denied: {reason}")]
    AccessDenied { reason: String },
}

impl Error {
    /// HTTP 상태 코드로 변환
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Error::EmptyInput
            | Error::InvalidFilterKey { .. }
            | Error::InvalidFilterValue { .. }
            | Error::InvalidRange { .. }
            | Error::UnknownColumn { .. } => 400,

            // 401 Unauthorized
            Error::Unauthenticated => 401,

            // 403 Forbidden
            Error::AccessDenied { .. } => 403,

            // 404 Not Found
            Error::NotFound { .. } => 404,

            // 409 Conflict
            Error::DuplicateKey { .. } => 409,
        }
    }

    /// 에러 코드 (클라이언트용)
    pub fn code(&self) -> &'static str {
        match self {
            Error::EmptyInput => "EMPTY_INPUT",
            Error::InvalidFilterKey { .. } => "INVALID_FILTER_KEY",
            Error::InvalidFilterValue { .. } => "INVALID_FILTER_VALUE",
            Error::InvalidRange { .. } => "INVALID_RANGE",
            Error::UnknownColumn { .. } => "UNKNOWN_COLUMN",
            Error::NotFound { .. } => "NOT_FOUND",
            Error::DuplicateKey { .. } => "DUPLICATE_KEY",
            Error::Unauthenticated => "UNAUTHENTICATED",
            Error::AccessDenied { .. } => "ACCESS_DENIED",
        }
    }

    /// NotFound 에러 생성
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Error::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
