//! 컴파일된 값 목록을 쿼리에 바인딩
//!
//! 값의 Postgres 타입은 JSON 타입으로 정해집니다. 컬럼 타입과 다를 수 있는 값
//! (`null`, 숫자 컬럼에 문자열 등)은 컴파일러가 붙인 `$n::TYPE` 캐스트로 변환됩니다.

use serde_json::{Number, Value};
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::Postgres;

type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// `values[i]`를 `$i+1`에 바인딩
pub(crate) fn bind_values(query: PgQuery<'_>, values: Vec<Value>) -> PgQuery<'_> {
    values.into_iter().fold(query, bind_value)
}

fn bind_value(query: PgQuery<'_>, value: Value) -> PgQuery<'_> {
    match value {
        // 타입 없는 null은 없으므로 text로 보내고 캐스트에 맡김
        Value::Null => query.bind(None::<String>),
        Value::Bool(flag) => query.bind(flag),
        Value::Number(number) => bind_number(query, number),
        Value::String(text) => query.bind(text),
        nested @ (Value::Array(_) | Value::Object(_)) => query.bind(sqlx::types::Json(nested)),
    }
}

/// 정수는 INT8, 그 외는 FLOAT8
fn bind_number(query: PgQuery<'_>, number: Number) -> PgQuery<'_> {
    if let Some(int) = number.as_i64() {
        query.bind(int)
    } else if let Some(float) = number.as_f64() {
        query.bind(float)
    } else {
        query.bind(number.to_string())
    }
}
