//! 동적 SQL 절 컴파일러
//!
//! 호출자가 넘긴 속성 맵을 위치 기반 파라미터(`$1..$n`) SQL 조각과 값 목록으로 변환합니다.
//! 값은 항상 파라미터로 전달되고, SQL 텍스트에 들어가는 것은 사전/어휘가 허용한 컬럼 이름뿐입니다.
//!
//! 두 컴파일러 모두 순수 함수입니다.

use std::cmp::Ordering;

use serde_json::{Number, Value};

use jobly_core::{Error, Result};

use crate::clause::CompiledClause;
use crate::params::{AttributeMap, ColumnNames, FilterOp, FilterVocabulary};

/// partial update용 SET 절 컴파일
///
/// `{ lastName: "XYZ", age: 99 }` + `{ lastName: "last_name" }`
/// → `"last_name"=$1, "age"=$2`, `["XYZ", 99]`
///
/// 타입이 지정된 컬럼은 캐스트가 붙습니다: `"age"=$2::INTEGER`
///
/// # Errors
/// * `EmptyInput` - 변경할 필드가 없음
/// * `UnknownColumn` - 허용되지 않은 필드
pub fn compile_update_clause(attrs: &AttributeMap, columns: &ColumnNames<'_>) -> Result<CompiledClause> {
    if attrs.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut clause = CompiledClause::new();
    for (key, value) in attrs {
        let column = columns.resolve(key)?;
        let sql_type = columns.sql_type(key);
        clause.push_bound(value.clone(), |idx| match sql_type {
            Some(ty) => format!("\"{}\"=${}::{}", column, idx, ty),
            None => format!("\"{}\"=${}", column, idx),
        });
    }

    Ok(clause)
}

/// 검색 필터용 WHERE 조건 컴파일
///
/// 빈 필터는 빈 절(조건 없음)입니다. 조각은 호출자가 `predicate()`로 AND 결합합니다.
///
/// # Errors
/// * `InvalidFilterKey` - 어휘에 없는 키
/// * `InvalidFilterValue` - 템플릿이 기대하는 타입이 아님
/// * `InvalidRange` - 상한 < 하한
pub fn compile_filter_predicate(
    filters: &AttributeMap,
    vocabulary: &FilterVocabulary<'_>,
) -> Result<CompiledClause> {
    validate_filters(filters, vocabulary)?;

    let mut clause = CompiledClause::new();
    for (key, value) in filters {
        let field = vocabulary.get(key).ok_or_else(|| Error::InvalidFilterKey {
            key: key.clone(),
        })?;
        let column = field.column;

        match field.op {
            FilterOp::Contains => {
                clause.push_bound(value.clone(), |idx| {
                    format!("{} ILIKE '%' || ${} || '%'", column, idx)
                });
            }
            FilterOp::AtLeast => {
                clause.push_bound(value.clone(), |idx| format!("{} >= ${}", column, idx));
            }
            FilterOp::AtMost => {
                clause.push_bound(value.clone(), |idx| format!("{} <= ${}", column, idx));
            }
            FilterOp::Flag(predicate) => {
                // false, null은 필터 없음과 같음
                if value.as_bool() == Some(true) {
                    clause.push_literal(predicate);
                }
            }
        }
    }

    Ok(clause)
}

/// 조각 생성 전 한 번에 하는 검증: 키, 값 타입, 범위
fn validate_filters(filters: &AttributeMap, vocabulary: &FilterVocabulary<'_>) -> Result<()> {
    for (key, value) in filters {
        let field = vocabulary.get(key).ok_or_else(|| Error::InvalidFilterKey {
            key: key.clone(),
        })?;

        if !field.op.accepts(value) {
            return Err(Error::InvalidFilterValue {
                key: key.clone(),
                expected: field.op.expected(),
            });
        }
    }

    for (min, max) in vocabulary.range_pairs() {
        let (Some(Value::Number(lo)), Some(Value::Number(hi))) =
            (filters.get(min.key), filters.get(max.key))
        else {
            continue;
        };

        if compare_numbers(hi, lo) == Some(Ordering::Less) {
            return Err(Error::InvalidRange {
                min_key: min.key.to_string(),
                max_key: max.key.to_string(),
            });
        }
    }

    Ok(())
}

/// JSON 숫자 비교
///
/// 둘 다 정수면 정수로 비교하고 (2^53 초과 값도 정확), 하나라도 실수면 f64로 비교합니다.
fn compare_numbers(a: &Number, b: &Number) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        return Some(a.cmp(&b));
    }
    if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
        return Some(a.cmp(&b));
    }
    // 한쪽만 i64 범위 밖의 u64
    match (a.as_i64(), b.as_i64(), a.as_u64(), b.as_u64()) {
        (Some(_), None, _, Some(_)) => return Some(Ordering::Less),
        (None, Some(_), Some(_), _) => return Some(Ordering::Greater),
        _ => {}
    }
    a.as_f64()?.partial_cmp(&b.as_f64()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::FilterField;
    use serde_json::json;

    const USER_COLUMNS: ColumnNames<'static> = ColumnNames::new(&[
        ("firstName", "first_name"),
        ("lastName", "last_name"),
        ("isAdmin", "is_admin"),
    ]);

    const JOB_FILTERS: FilterVocabulary<'static> = FilterVocabulary::new(&[
        FilterField::new("title", "title", FilterOp::Contains),
        FilterField::new("minSalary", "salary", FilterOp::AtLeast),
        FilterField::new("maxSalary", "salary", FilterOp::AtMost),
        FilterField::new("hasEquity", "equity", FilterOp::Flag("equity > 0")),
    ]);

    fn attrs(value: Value) -> AttributeMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    /// `$` 뒤에 숫자가 오는 placeholder 개수
    fn count_placeholders(sql: &str) -> usize {
        sql.as_bytes()
            .windows(2)
            .filter(|w| w[0] == b'$' && w[1].is_ascii_digit())
            .count()
    }

    #[test]
    fn test_update_translates_names() {
        let clause =
            compile_update_clause(&attrs(json!({ "lastName": "XYZ", "age": 99 })), &USER_COLUMNS)
                .unwrap();

        assert_eq!(clause.set_clause(), r#""last_name"=$1, "age"=$2"#);
        assert_eq!(clause.values(), [json!("XYZ"), json!(99)]);
    }

    #[test]
    fn test_update_casts_typed_columns() {
        let columns = ColumnNames::new(&[("numEmployees", "num_employees")])
            .with_types(&[("numEmployees", "INTEGER"), ("equity", "NUMERIC")]);

        let clause = compile_update_clause(
            &attrs(json!({ "name": "New", "numEmployees": null, "equity": "0.25" })),
            &columns,
        )
        .unwrap();

        assert_eq!(
            clause.set_clause(),
            r#""name"=$1, "num_employees"=$2::INTEGER, "equity"=$3::NUMERIC"#
        );
        assert_eq!(clause.values(), [json!("New"), Value::Null, json!("0.25")]);
    }

    #[test]
    fn test_update_falls_back_to_key() {
        let clause = compile_update_clause(&attrs(json!({ "age": 30 })), &ColumnNames::empty()).unwrap();

        assert_eq!(clause.set_clause(), r#""age"=$1"#);
        assert_eq!(clause.values(), [json!(30)]);
    }

    #[test]
    fn test_update_rejects_empty() {
        let err = compile_update_clause(&AttributeMap::new(), &USER_COLUMNS).unwrap_err();
        assert!(matches!(err, Error::EmptyInput));

        let err = compile_update_clause(&AttributeMap::new(), &ColumnNames::empty()).unwrap_err();
        assert!(matches!(err, Error::EmptyInput));
    }

    #[test]
    fn test_update_placeholders_align_with_values() {
        let data = attrs(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "isAdmin": false,
            "email": null,
            "age": 36,
        }));
        let clause = compile_update_clause(&data, &USER_COLUMNS).unwrap();
        let sql = clause.set_clause();

        assert_eq!(count_placeholders(&sql), clause.values().len());
        for (i, (key, value)) in data.iter().enumerate() {
            assert!(clause.fragments()[i].ends_with(&format!("=${}", i + 1)), "{}", key);
            assert_eq!(&clause.values()[i], value);
        }
        assert_eq!(clause.next_placeholder(), 6);
    }

    #[test]
    fn test_update_rejects_unsafe_fallback() {
        let err = compile_update_clause(
            &attrs(json!({ "name\" = 'x'; --": "boom" })),
            &ColumnNames::empty(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnknownColumn { .. }));
    }

    #[test]
    fn test_update_respects_allow_list() {
        let columns = ColumnNames::new(&[("companyHandle", "company_handle")])
            .allow_only(&["title", "salary", "equity"]);

        let err = compile_update_clause(&attrs(json!({ "title": "t", "companyHandle": "c2" })), &columns)
            .unwrap_err();
        assert!(matches!(err, Error::UnknownColumn { key } if key == "companyHandle"));
    }

    #[test]
    fn test_filter_empty_is_no_predicate() {
        let clause = compile_filter_predicate(&AttributeMap::new(), &JOB_FILTERS).unwrap();
        assert!(clause.is_empty());
        assert!(clause.values().is_empty());
        assert_eq!(clause.where_clause(), "");
    }

    #[test]
    fn test_filter_all_templates() {
        let clause = compile_filter_predicate(
            &attrs(json!({ "title": "eng", "minSalary": 1000, "maxSalary": 5000 })),
            &JOB_FILTERS,
        )
        .unwrap();

        assert_eq!(
            clause.predicate(),
            "title ILIKE '%' || $1 || '%' AND salary >= $2 AND salary <= $3"
        );
        assert_eq!(clause.values(), [json!("eng"), json!(1000), json!(5000)]);
    }

    #[test]
    fn test_filter_flag_does_not_consume_index() {
        let clause = compile_filter_predicate(
            &attrs(json!({ "hasEquity": true, "title": "j" })),
            &JOB_FILTERS,
        )
        .unwrap();

        assert_eq!(clause.fragments(), ["equity > 0", "title ILIKE '%' || $1 || '%'"]);
        assert_eq!(clause.values(), [json!("j")]);

        let clause = compile_filter_predicate(
            &attrs(json!({ "title": "j", "hasEquity": true, "minSalary": 10 })),
            &JOB_FILTERS,
        )
        .unwrap();
        assert_eq!(
            clause.predicate(),
            "title ILIKE '%' || $1 || '%' AND equity > 0 AND salary >= $2"
        );
    }

    #[test]
    fn test_filter_false_flag_is_noop() {
        let clause = compile_filter_predicate(
            &attrs(json!({ "hasEquity": false, "minSalary": 10 })),
            &JOB_FILTERS,
        )
        .unwrap();

        assert_eq!(clause.predicate(), "salary >= $1");
        assert_eq!(clause.values(), [json!(10)]);

        let clause = compile_filter_predicate(&attrs(json!({ "hasEquity": false })), &JOB_FILTERS).unwrap();
        assert!(clause.is_empty());
    }

    #[test]
    fn test_filter_rejects_unknown_key() {
        let err = compile_filter_predicate(
            &attrs(json!({ "title": "j", "minSalary": 10, "color": "red" })),
            &JOB_FILTERS,
        )
        .unwrap_err();

        assert!(matches!(err, Error::InvalidFilterKey { key } if key == "color"));
    }

    #[test]
    fn test_filter_rejects_inverted_range() {
        let err = compile_filter_predicate(
            &attrs(json!({ "minSalary": 500, "maxSalary": 100 })),
            &JOB_FILTERS,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidRange { .. }));

        // 같은 값은 허용
        let clause = compile_filter_predicate(
            &attrs(json!({ "maxSalary": 100, "minSalary": 100 })),
            &JOB_FILTERS,
        )
        .unwrap();
        assert_eq!(clause.predicate(), "salary <= $1 AND salary >= $2");
    }

    #[test]
    fn test_filter_range_exact_for_large_integers() {
        // 2^53 + 1 과 2^53 은 f64로는 같은 값
        let err = compile_filter_predicate(
            &attrs(json!({ "minSalary": 9007199254740993u64, "maxSalary": 9007199254740992u64 })),
            &JOB_FILTERS,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidRange { .. }));

        let err = compile_filter_predicate(
            &attrs(json!({ "minSalary": u64::MAX, "maxSalary": -1 })),
            &JOB_FILTERS,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidRange { .. }));

        let clause = compile_filter_predicate(
            &attrs(json!({ "minSalary": -5, "maxSalary": u64::MAX })),
            &JOB_FILTERS,
        )
        .unwrap();
        assert_eq!(clause.values().len(), 2);

        // 정수와 실수 혼합
        let err = compile_filter_predicate(
            &attrs(json!({ "minSalary": 10.5, "maxSalary": 10 })),
            &JOB_FILTERS,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidRange { .. }));
    }

    #[test]
    fn test_filter_null_flag_is_noop() {
        let clause = compile_filter_predicate(
            &attrs(json!({ "hasEquity": null, "title": "j" })),
            &JOB_FILTERS,
        )
        .unwrap();
        assert_eq!(clause.predicate(), "title ILIKE '%' || $1 || '%'");
        assert_eq!(clause.values(), [json!("j")]);
    }

    #[test]
    fn test_filter_rejects_wrong_value_type() {
        let err = compile_filter_predicate(&attrs(json!({ "minSalary": "lots" })), &JOB_FILTERS)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFilterValue { key, expected: "a number" } if key == "minSalary"
        ));

        let err = compile_filter_predicate(&attrs(json!({ "hasEquity": "yes" })), &JOB_FILTERS)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidFilterValue { .. }));
    }

    #[test]
    fn test_compile_is_deterministic() {
        let filters = attrs(json!({ "minSalary": 1, "hasEquity": true, "title": "x" }));
        let first = compile_filter_predicate(&filters, &JOB_FILTERS).unwrap();
        let second = compile_filter_predicate(&filters, &JOB_FILTERS).unwrap();
        assert_eq!(first, second);

        let data = attrs(json!({ "lastName": "a", "firstName": "b" }));
        assert_eq!(
            compile_update_clause(&data, &USER_COLUMNS).unwrap(),
            compile_update_clause(&data, &USER_COLUMNS).unwrap()
        );
    }
}
