//! companies 데이터 접근
//!
//! 읽기는 공개, 변경(create/update/remove)은 관리자만 가능합니다.

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
use crate::job::JobSummary;

const ENTITY: &str = "company";

const RETURNING: &str = "handle, name, description, num_employees, logo_url";

/// 변경 가능한 필드와 컬럼 이름. `handle`은 변경 불가.
pub static COMPANY_COLUMNS: ColumnNames<'static> =
    ColumnNames::new(&[("numEmployees", "num_employees"), ("logoUrl", "logo_url")])
        .allow_only(&["name", "description", "numEmployees", "logoUrl"])
        .with_types(&[("numEmployees", "INTEGER")]);

/// 검색 필터: `{ name, minEmployees, maxEmployees }`
pub static COMPANY_FILTERS: FilterVocabulary<'static> = FilterVocabulary::new(&[
    FilterField::new("name", "name", FilterOp::Contains),
    FilterField::new("minEmployees", "num_employees", FilterOp::AtLeast),
    FilterField::new("maxEmployees", "num_employees", FilterOp::AtMost),
]);

/// 회사
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// 회사 + 소속 채용공고
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<JobSummary>,
}

/// 회사 생성 요청
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// 목록 조회 SQL
///
/// 필터가 없거나 비어 있으면 WHERE 없이 전체를 조회합니다.
pub fn find_all_query(filters: Option<&AttributeMap>) -> jobly_core::Result<(String, Vec<Value>)> {
    let (where_clause, values) = match filters {
        Some(filters) => {
            let clause = compile_filter_predicate(filters, &COMPANY_FILTERS)?;
            (clause.where_clause(), clause.into_values())
        }
        None => (String::new(), Vec::new()),
    };

    let sql = format!(
        "SELECT {} FROM companies {} ORDER BY name",
        RETURNING, where_clause
    );
    Ok((sql, values))
}

/// partial update SQL
///
/// handle은 컴파일된 값 뒤에 마지막 파라미터로 붙습니다.
pub fn update_query(handle: &str, data: &AttributeMap) -> jobly_core::Result<(String, Vec<Value>)> {
    let clause = compile_update_clause(data, &COMPANY_COLUMNS)?;
    let handle_idx = clause.next_placeholder();

    let sql = format!(
        "UPDATE companies SET {} WHERE handle = ${} RETURNING {}",
        clause.set_clause(),
        handle_idx,
        RETURNING
    );

    let mut values = clause.into_values();
    values.push(Value::String(handle.to_string()));
    Ok((sql, values))
}

/// companies 저장소
#[derive(Clone, Copy)]
pub struct Companies<'a> {
    pool: &'a PgPool,
}

impl<'a> Companies<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// 회사 생성
    ///
    /// # Errors
    /// * `DuplicateKey` - 같은 handle이 이미 존재
    pub async fn create(&self, actor: &AuthContext, new: &NewCompany) -> Result<Company> {
        ensure_admin(actor)?;

        let existing = sqlx::query("SELECT handle FROM companies WHERE handle = $1")
            .bind(&new.handle)
            .fetch_optional(self.pool)
            .await?;
        if existing.is_some() {
            return Err(Error::DuplicateKey {
                entity: ENTITY,
                id: new.handle.clone(),
            }
            .into());
        }

        let company = sqlx::query_as::<_, Company>(&format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            RETURNING
        ))
        .bind(&new.handle)
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.num_employees)
        .bind(&new.logo_url)
        .fetch_one(self.pool)
        .await?;

        tracing::info!("Created company: {}", company.handle);
        Ok(company)
    }

    /// 회사 목록 (이름순)
    pub async fn find_all(&self, filters: Option<&AttributeMap>) -> Result<Vec<Company>> {
        let (sql, values) = find_all_query(filters)?;
        tracing::debug!("Company::find_all sql = {}, values = {:?}", sql, values);

        let rows = bind_values(sqlx::query(&sql), values)
            .fetch_all(self.pool)
            .await?;
        let companies = rows
            .iter()
            .map(|row| Company::from_row(row))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(companies)
    }

    /// 회사 조회 (소속 채용공고 포함)
    pub async fn get(&self, handle: &str) -> Result<CompanyDetail> {
        let company = sqlx::query_as::<_, Company>(&format!(
            "SELECT {} FROM companies WHERE handle = $1",
            RETURNING
        ))
        .bind(handle)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| Error::not_found(ENTITY, handle))?;

        let jobs = sqlx::query_as::<_, JobSummary>(
            "SELECT id, title, salary, equity::FLOAT8 AS equity
             FROM jobs
             WHERE company_handle = $1
             ORDER BY id",
        )
        .bind(handle)
        .fetch_all(self.pool)
        .await?;

        Ok(CompanyDetail { company, jobs })
    }

    /// 회사 partial update
    ///
    /// # Errors
    /// * `EmptyInput` - 변경할 필드 없음
    /// * `UnknownColumn` - 변경 불가 필드 (예: handle)
    /// * `NotFound` - 대상 없음
    pub async fn update(&self, actor: &AuthContext, handle: &str, data: &AttributeMap) -> Result<Company> {
        ensure_admin(actor)?;

        let (sql, values) = update_query(handle, data)?;
        tracing::debug!("Company::update sql = {}, values = {:?}", sql, values);

        let row = bind_values(sqlx::query(&sql), values)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| Error::not_found(ENTITY, handle))?;
        let company = Company::from_row(&row)?;

        tracing::info!("Updated company: {}", company.handle);
        Ok(company)
    }

    /// 회사 삭제
    pub async fn remove(&self, actor: &AuthContext, handle: &str) -> Result<()> {
        ensure_admin(actor)?;

        sqlx::query("DELETE FROM companies WHERE handle = $1 RETURNING handle")
            .bind(handle)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| Error::not_found(ENTITY, handle))?;

        tracing::info!("Removed company: {}", handle);
        Ok(())
    }
}
