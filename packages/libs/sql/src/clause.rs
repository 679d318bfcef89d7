//! 컴파일 결과
//!
//! SQL 조각 목록과 바인딩 값 목록. `$n`은 항상 `values[n - 1]`에 대응합니다.

use serde_json::Value;

/// 컴파일된 절
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledClause {
    fragments: Vec<String>,
    values: Vec<Value>,
}

impl CompiledClause {
    /// 빈 절
    pub fn new() -> Self {
        Self::default()
    }

    /// 값을 하나 소비하는 조각 추가
    ///
    /// `render`는 이 값에 배정된 placeholder 번호를 받습니다.
    pub(crate) fn push_bound(&mut self, value: Value, render: impl FnOnce(usize) -> String) {
        let idx = self.next_placeholder();
        self.fragments.push(render(idx));
        self.values.push(value);
    }

    /// 값 없는 고정 조각 추가
    pub(crate) fn push_literal(&mut self, fragment: impl Into<String>) {
        self.fragments.push(fragment.into());
    }

    /// SQL 조각 목록
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// 바인딩할 값 목록
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// 다음 placeholder 번호
    ///
    /// 호출자가 컴파일된 값 뒤에 값을 덧붙일 때 사용합니다 (예: `WHERE id = $n`).
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }

    /// SET 절: `"a"=$1, "b"=$2`
    pub fn set_clause(&self) -> String {
        self.fragments.join(", ")
    }

    /// AND로 결합된 조건
    pub fn predicate(&self) -> String {
        self.fragments.join(" AND ")
    }

    /// `WHERE ...` (조건이 없으면 빈 문자열)
    pub fn where_clause(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.predicate())
        }
    }
}
