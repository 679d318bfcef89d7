//! jobly-sql: 동적 SQL 절 컴파일러
//!
//! 호출자가 넘긴 희소 속성 맵을 위치 기반 파라미터 SQL 조각과 값 목록으로 변환합니다.
//! 지원하는 형태는 두 가지뿐입니다: partial update의 SET 절, AND 결합 필터 조건.
//!
//! # 모듈 구조
//!
//! - `builder`: SET 절 / WHERE 조건 컴파일러
//! - `clause`: 컴파일 결과 (조각 + 값)
//! - `params`: 속성 맵, 컬럼 이름 사전, 필터 어휘

pub mod builder;
pub mod clause;
pub mod params;

pub use builder::{compile_filter_predicate, compile_update_clause};
pub use clause::CompiledClause;
pub use params::{AttributeMap, ColumnNames, FilterField, FilterOp, FilterVocabulary};
