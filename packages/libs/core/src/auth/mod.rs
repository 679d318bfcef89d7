//! 인가 결정
//!
//! # 개요
//!
//! 변경 작업(create/update/remove)은 컴파일러 호출 전에 인가 결정을 거칩니다.
//! 토큰 검증은 이 크레이트 밖에서 이루어지며, 여기서는 검증된 호출자 정보만 다룹니다.
//!
//! # 모듈 구조
//!
//! - `context`: 호출자 정보 (username, admin 여부)
//! - `decision`: 요구사항별 허용/거부 결정

mod context;
mod decision;

pub use context::AuthContext;
pub use decision::{authorize, ensure_admin, ensure_admin_or_owner, ensure_logged_in, Decision, Requirement};
