//! jobs 데이터 접근

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{FromRow, PgPool};

use jobly_core::auth::{ensure_admin, AuthContext};
use jobly_core::Error;
use jobly_sql::{
    compile_filter_predicate, compile_update_clause, AttributeMap, ColumnNames, FilterField,
    FilterOp, FilterVocabulary,
};

use crate::bind::bind_values;
use crate::error::Result;

const ENTITY: &str = "job";

const RETURNING: &str = "id, title, salary, equity::FLOAT8 AS equity, company_handle";

/// 변경 가능한 필드. `id`, `companyHandle`은 변경 불가.
pub static JOB_COLUMNS: ColumnNames<'static> =
    ColumnNames::empty()
        .allow_only(&["title", "salary", "equity"])
        .with_types(&[("salary", "INTEGER"), ("equity", "NUMERIC")]);

/// 검색 필터: `{ title, minSalary, hasEquity }`
pub static JOB_FILTERS: FilterVocabulary<'static> = FilterVocabulary::new(&[
    FilterField::new("title", "title", FilterOp::Contains),
    FilterField::new("minSalary", "salary", FilterOp::AtLeast),
    FilterField::new("hasEquity", "equity", FilterOp::Flag("equity > 0")),
]);

/// 채용공고
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
    pub company_handle: String,
}

/// 회사 상세에 포함되는 채용공고 요약
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobSummary {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
}

/// 채용공고 생성 요청
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<f64>,
    pub company_handle: String,
}

/// 목록 조회 SQL
pub fn find_all_query(filters: Option<&AttributeMap>) -> jobly_core::Result<(String, Vec<Value>)> {
    let (where_clause, values) = match filters {
        Some(filters) => {
            let clause = compile_filter_predicate(filters, &JOB_FILTERS)?;
            (clause.where_clause(), clause.into_values())
        }
        None => (String::new(), Vec::new()),
    };

    let sql = format!("SELECT {} FROM jobs {} ORDER BY title", RETURNING, where_clause);
    Ok((sql, values))
}

/// partial update SQL (id는 마지막 파라미터)
pub fn update_query(id: i32, data: &AttributeMap) -> jobly_core::Result<(String, Vec<Value>)> {
    let clause = compile_update_clause(data, &JOB_COLUMNS)?;
    let id_idx = clause.next_placeholder();

    let sql = format!(
        "UPDATE jobs SET {} WHERE id = ${} RETURNING {}",
        clause.set_clause(),
        id_idx,
        RETURNING
    );

    let mut values = clause.into_values();
    values.push(Value::from(id));
    Ok((sql, values))
}

/// jobs 저장소
#[derive(Clone, Copy)]
pub struct Jobs<'a> {
    pool: &'a PgPool,
}

impl<'a> Jobs<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// 채용공고 생성
    ///
    /// # Errors
    /// * `NotFound` - 소속 회사가 없음
    pub async fn create(&self, actor: &AuthContext, new: &NewJob) -> Result<Job> {
        ensure_admin(actor)?;

        sqlx::query("SELECT handle FROM companies WHERE handle = $1")
            .bind(&new.company_handle)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| Error::not_found("company", &new.company_handle))?;

        let job = sqlx::query_as::<_, Job>(&format!(
            "INSERT INTO jobs (title, salary, equity, company_handle)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            RETURNING
        ))
        .bind(&new.title)
        .bind(new.salary)
        .bind(new.equity)
        .bind(&new.company_handle)
        .fetch_one(self.pool)
        .await?;

        tracing::info!("Created job {} for {}", job.id, job.company_handle);
        Ok(job)
    }

    /// 채용공고 목록 (제목순)
    pub async fn find_all(&self, filters: Option<&AttributeMap>) -> Result<Vec<Job>> {
        let (sql, values) = find_all_query(filters)?;
        tracing::debug!("Job::find_all sql = {}, values = {:?}", sql, values);

        let rows = bind_values(sqlx::query(&sql), values)
            .fetch_all(self.pool)
            .await?;
        let jobs = rows
            .iter()
            .map(|row| Job::from_row(row))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(jobs)
    }

    /// 채용공고 조회
    pub async fn get(&self, id: i32) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(&format!("SELECT {} FROM jobs WHERE id = $1", RETURNING))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| Error::not_found(ENTITY, id))?;
        Ok(job)
    }

    /// 채용공고 partial update
    pub async fn update(&self, actor: &AuthContext, id: i32, data: &AttributeMap) -> Result<Job> {
        ensure_admin(actor)?;

        let (sql, values) = update_query(id, data)?;
        tracing::debug!("Job::update sql = {}, values = {:?}", sql, values);

        let row = bind_values(sqlx::query(&sql), values)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| Error::not_found(ENTITY, id))?;
        let job = Job::from_row(&row)?;

        tracing::info!("Updated job: {}", job.id);
        Ok(job)
    }

    /// 채용공고 삭제
    pub async fn remove(&self, actor: &AuthContext, id: i32) -> Result<()> {
        ensure_admin(actor)?;

        sqlx::query("DELETE FROM jobs WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| Error::not_found(ENTITY, id))?;

        tracing::info!("Removed job: {}", id);
        Ok(())
    }
}
