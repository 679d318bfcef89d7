//! 데이터 접근 계층 에러 타입

/// 데이터 접근 에러
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Core(#[from] jobly_core::Error),
}

impl DbError {
    /// HTTP 상태 코드로 변환
    pub fn status_code(&self) -> u16 {
        match self {
            DbError::Core(e) => e.status_code(),
            DbError::Config { .. } | DbError::Database(_) => 500,
        }
    }

    /// 에러 코드 (클라이언트용)
    pub fn code(&self) -> &'static str {
        match self {
            DbError::Config { .. } => "CONFIG_ERROR",
            DbError::Database(_) => "DATABASE_ERROR",
            DbError::Core(e) => e.code(),
        }
    }

    /// 내부 에러 (`jobly_core::Error`)
    pub fn as_core(&self) -> Option<&jobly_core::Error> {
        match self {
            DbError::Core(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
