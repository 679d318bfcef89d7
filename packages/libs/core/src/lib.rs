//! jobly-core: jobly 공통 핵심 라이브러리
//!
//! 이 크레이트는 SQL 컴파일러, 데이터 접근 계층, CLI가 공유하는 핵심 타입을 제공합니다.
//!
//! # 모듈 구조
//!
//! - `auth`: 변경 작업 전 인가 결정 (admin / owner)
//! - `error`: 공통 에러 타입

pub mod auth;
pub mod error;

pub use error::{Error, Result};
