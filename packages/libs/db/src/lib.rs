//! jobly-db: 엔티티 데이터 접근 계층
//!
//! companies / jobs 테이블에 대한 Create, FindAll, Get, Update, Remove를 제공합니다.
//! 필터와 partial update는 `jobly-sql` 컴파일러로 만들고, 실행만 여기서 합니다.
//!
//! # 모듈 구조
//!
//! - `company`, `job`: 엔티티별 저장소와 정적 컬럼 사전/필터 어휘
//! - `config`: 연결 설정 (환경변수)
//! - `error`: 데이터 접근 에러

mod bind;
pub mod company;
pub mod config;
pub mod error;
pub mod job;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub use company::{Companies, Company, CompanyDetail, NewCompany};
pub use config::DbConfig;
pub use error::{DbError, Result};
pub use job::{Job, JobSummary, Jobs, NewJob};

/// 저장소 핸들
///
/// 커넥션 풀을 보유하고 엔티티별 저장소를 빌려줍니다.
#[derive(Clone)]
pub struct Store {
    pool: PgPool,
}

impl Store {
    /// 설정으로 연결
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(&config.database_url)
            .await?;

        tracing::debug!("Connected to database (max_connections={})", config.max_connections);
        Ok(Self { pool })
    }

    /// 기존 풀로 생성
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn companies(&self) -> Companies<'_> {
        Companies::new(&self.pool)
    }

    pub fn jobs(&self) -> Jobs<'_> {
        Jobs::new(&self.pool)
    }
}
