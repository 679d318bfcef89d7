//! 컴파일러 입력 파라미터
//!
//! 호출자가 넘기는 속성 맵과, 엔티티별 정적 설정(컬럼 이름 사전, 필터 어휘)을 정의합니다.

use jobly_core::{Error, Result};
use serde_json::Value;

/// 논리 필드 이름 → 값
///
/// `serde_json`의 `preserve_order`로 삽입 순서를 유지합니다.
/// 이 순서가 곧 placeholder 번호 순서입니다.
pub type AttributeMap = serde_json::Map<String, Value>;

/// 컬럼 이름 사전
///
/// 논리 필드 이름을 물리 컬럼 이름으로 변환합니다. 사전에 없는 이름은
/// 그대로 컬럼 이름으로 쓰이되, SQL 식별자 형태여야 합니다.
/// `allow_only`로 허용 목록을 지정하면 목록 밖의 키는 거부됩니다.
/// `with_types`로 컬럼 타입을 지정하면 SET 절의 placeholder에 캐스트가 붙습니다
/// (`"num_employees"=$1::INTEGER`). 바인딩 타입과 컬럼 타입이 달라도 되고,
/// `null`도 해당 컬럼 타입으로 들어갑니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnNames<'a> {
    mapping: &'a [(&'a str, &'a str)],
    allowed: Option<&'a [&'a str]>,
    types: &'a [(&'a str, &'a str)],
}

impl<'a> ColumnNames<'a> {
    /// 변환 테이블로 생성
    pub const fn new(mapping: &'a [(&'a str, &'a str)]) -> Self {
        Self {
            mapping,
            allowed: None,
            types: &[],
        }
    }

    /// 빈 사전 (모든 키가 그대로 컬럼 이름)
    pub const fn empty() -> Self {
        Self::new(&[])
    }

    /// 허용 목록 지정
    pub const fn allow_only(self, keys: &'a [&'a str]) -> Self {
        Self {
            allowed: Some(keys),
            ..self
        }
    }

    /// 논리 필드 이름 → SQL 타입 (예: `("numEmployees", "INTEGER")`)
    pub const fn with_types(self, types: &'a [(&'a str, &'a str)]) -> Self {
        Self { types, ..self }
    }

    /// 필드의 SQL 타입 (지정되지 않았으면 `None`)
    pub fn sql_type(&self, key: &str) -> Option<&'a str> {
        self.types
            .iter()
            .find(|(logical, _)| *logical == key)
            .map(|&(_, ty)| ty)
    }

    /// 논리 필드 이름을 물리 컬럼 이름으로 변환
    pub fn resolve<'k>(&'k self, key: &'k str) -> Result<&'k str> {
        if let Some(allowed) = self.allowed {
            if !allowed.contains(&key) {
                return Err(Error::UnknownColumn {
                    key: key.to_string(),
                });
            }
        }

        if let Some(&(_, column)) = self.mapping.iter().find(|(logical, _)| *logical == key) {
            return Ok(column);
        }

        if is_plain_identifier(key) {
            Ok(key)
        } else {
            Err(Error::UnknownColumn {
                key: key.to_string(),
            })
        }
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// 필터 연산자 템플릿
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp<'a> {
    /// 부분 문자열 (대소문자 무시): `col ILIKE '%' || $n || '%'`
    Contains,

    /// 하한: `col >= $n`
    AtLeast,

    /// 상한: `col <= $n`
    AtMost,

    /// 값 없는 고정 조건. `true`일 때만 적용되고 placeholder를 쓰지 않습니다.
    Flag(&'a str),
}

impl FilterOp<'_> {
    /// 이 템플릿이 기대하는 값 타입 (에러 메시지용)
    pub fn expected(&self) -> &'static str {
        match self {
            FilterOp::Contains => "a string",
            FilterOp::AtLeast | FilterOp::AtMost => "a number",
            FilterOp::Flag(_) => "a boolean",
        }
    }

    /// 값 타입 확인
    ///
    /// `Flag`는 `null`도 받습니다 (`false`와 같이 조건 없음).
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FilterOp::Contains => value.is_string(),
            FilterOp::AtLeast | FilterOp::AtMost => value.is_number(),
            FilterOp::Flag(_) => value.is_boolean() || value.is_null(),
        }
    }
}

/// 필터 어휘의 한 항목
#[derive(Debug, Clone, Copy)]
pub struct FilterField<'a> {
    /// 논리 필터 키 (예: `minEmployees`)
    pub key: &'a str,

    /// 대상 컬럼
    pub column: &'a str,

    /// 연산자
    pub op: FilterOp<'a>,
}

impl<'a> FilterField<'a> {
    pub const fn new(key: &'a str, column: &'a str, op: FilterOp<'a>) -> Self {
        Self { key, column, op }
    }
}

/// 엔티티별 필터 어휘
///
/// 여기에 없는 키는 `InvalidFilterKey`로 거부됩니다.
#[derive(Debug, Clone, Copy)]
pub struct FilterVocabulary<'a> {
    fields: &'a [FilterField<'a>],
}

impl<'a> FilterVocabulary<'a> {
    pub const fn new(fields: &'a [FilterField<'a>]) -> Self {
        Self { fields }
    }

    /// 키로 항목 조회
    pub fn get(&self, key: &str) -> Option<&FilterField<'a>> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// 같은 컬럼을 공유하는 (하한, 상한) 쌍
    pub fn range_pairs(&self) -> impl Iterator<Item = (&'a FilterField<'a>, &'a FilterField<'a>)> {
        let fields = self.fields;
        fields
            .iter()
            .filter(|f| f.op == FilterOp::AtLeast)
            .flat_map(move |min| {
                fields
                    .iter()
                    .filter(move |max| max.op == FilterOp::AtMost && max.column == min.column)
                    .map(move |max| (min, max))
            })
    }

    /// 인식되는 키 목록
    pub fn keys(&self) -> impl Iterator<Item = &'a str> {
        let fields = self.fields;
        fields.iter().map(|f| f.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEOPLE: FilterVocabulary<'static> = FilterVocabulary::new(&[
        FilterField::new("name", "name", FilterOp::Contains),
        FilterField::new("minAge", "age", FilterOp::AtLeast),
        FilterField::new("maxAge", "age", FilterOp::AtMost),
        FilterField::new("minHeight", "height", FilterOp::AtLeast),
    ]);

    #[test]
    fn test_resolve_translates_and_falls_back() {
        let names = ColumnNames::new(&[("firstName", "first_name")]);
        assert_eq!(names.resolve("firstName").unwrap(), "first_name");
        assert_eq!(names.resolve("age").unwrap(), "age");
    }

    #[test]
    fn test_resolve_rejects_non_identifiers() {
        let names = ColumnNames::empty();
        assert!(names.resolve("age\"; DROP TABLE users; --").is_err());
        assert!(names.resolve("1st").is_err());
        assert!(names.resolve("").is_err());
        assert!(names.resolve("_private").is_ok());
    }

    #[test]
    fn test_resolve_with_allow_list() {
        let names = ColumnNames::new(&[("logoUrl", "logo_url")]).allow_only(&["name", "logoUrl"]);
        assert_eq!(names.resolve("logoUrl").unwrap(), "logo_url");
        assert_eq!(names.resolve("name").unwrap(), "name");

        let err = names.resolve("handle").unwrap_err();
        assert!(matches!(err, Error::UnknownColumn { key } if key == "handle"));
    }

    #[test]
    fn test_sql_type_lookup() {
        let names = ColumnNames::new(&[("numEmployees", "num_employees")])
            .allow_only(&["name", "numEmployees"])
            .with_types(&[("numEmployees", "INTEGER")]);

        assert_eq!(names.sql_type("numEmployees"), Some("INTEGER"));
        assert_eq!(names.sql_type("name"), None);
        // 타입 지정이 allow-list와 매핑을 덮어쓰지 않음
        assert_eq!(names.resolve("numEmployees").unwrap(), "num_employees");
        assert!(names.resolve("handle").is_err());
    }

    #[test]
    fn test_range_pairs() {
        let pairs: Vec<_> = PEOPLE.range_pairs().map(|(min, max)| (min.key, max.key)).collect();
        assert_eq!(pairs, vec![("minAge", "maxAge")]);
    }

    #[test]
    fn test_op_accepts() {
        assert!(FilterOp::Contains.accepts(&Value::String("a".to_string())));
        assert!(!FilterOp::AtLeast.accepts(&Value::String("10".to_string())));
        assert!(FilterOp::Flag("x > 0").accepts(&Value::Bool(false)));
        assert!(FilterOp::Flag("x > 0").accepts(&Value::Null));
        assert!(!FilterOp::Flag("x > 0").accepts(&Value::from(1)));
        assert!(!FilterOp::AtLeast.accepts(&Value::Null));
        assert!(PEOPLE.get("nickname").is_none());
        assert_eq!(PEOPLE.keys().count(), 4);
    }
}
