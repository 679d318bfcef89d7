//! 저장소 설정

use std::env;
use std::time::Duration;

use crate::error::{DbError, Result};

const DEFAULT_DATABASE_URL: &str = "postgresql:///jobly";
const TEST_DATABASE_URL: &str = "postgresql:///jobly_test";

/// DB 연결 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// Postgres 연결 URL
    pub database_url: String,

    /// 풀 최대 연결 수
    pub max_connections: u32,

    /// 연결 획득 타임아웃 (초)
    pub acquire_timeout_secs: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
            acquire_timeout_secs: 30,
        }
    }
}

impl DbConfig {
    /// 환경변수에서 설정 로드
    ///
    /// - `JOBLY_ENV=test`이면 항상 테스트 DB
    /// - 그 외에는 `DATABASE_URL` (기본: `postgresql:///jobly`)
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// 임의의 변수 조회 함수로 설정 로드
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let database_url = if var("JOBLY_ENV").as_deref() == Some("test") {
            TEST_DATABASE_URL.to_string()
        } else {
            var("DATABASE_URL").unwrap_or(defaults.database_url)
        };

        Ok(Self {
            database_url,
            max_connections: parse_var(&var, "JOBLY_DB_MAX_CONNECTIONS", defaults.max_connections)?,
            acquire_timeout_secs: parse_var(
                &var,
                "JOBLY_DB_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout_secs,
            )?,
        })
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

fn parse_var<T: std::str::FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T> {
    match var(name) {
        Some(raw) => raw.trim().parse().map_err(|_| DbError::Config {
            message: format!("{} must be a number, got '{}'", name, raw),
        }),
        None => Ok(default),
    }
}
