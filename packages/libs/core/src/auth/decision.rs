//! 인가 결정기
//!
//! 호출자 컨텍스트와 요구사항을 받아 허용/거부를 결정합니다.
//! 결정은 항상 컴파일러 호출과 DB 접근보다 먼저 평가됩니다.

use super::context::AuthContext;
use crate::error::{Error, Result};

/// 인가 요구사항
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement<'a> {
    /// 로그인한 사용자
    LoggedIn,

    /// 관리자만
    Admin,

    /// 관리자 또는 대상 리소스의 소유자
    AdminOrOwner(&'a str),
}

/// 인가 결정 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// 허용
    Allow,

    /// 호출자 정보 없음
    Unauthenticated,

    /// 호출자는 있으나 권한 부족
    Deny { reason: String },
}

impl Decision {
    /// 거부 결과 생성
    pub fn deny(reason: impl Into<String>) -> Self {
        Decision::Deny {
            reason: reason.into(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// 거부를 에러로 변환
    pub fn into_result(self) -> Result<()> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Unauthenticated => Err(Error::Unauthenticated),
            Decision::Deny { reason } => Err(Error::AccessDenied { reason }),
        }
    }
}

/// 요구사항 평가
///
/// 호출자 정보가 없으면 요구사항과 관계없이 `Unauthenticated`.
pub fn authorize(ctx: &AuthContext, requirement: Requirement<'_>) -> Decision {
    if !ctx.is_authenticated() {
        return Decision::Unauthenticated;
    }

    match requirement {
        Requirement::LoggedIn => Decision::Allow,
        Requirement::Admin => {
            if ctx.is_admin {
                Decision::Allow
            } else {
                Decision::deny("admins only")
            }
        }
        Requirement::AdminOrOwner(owner) => {
            if ctx.is_admin || ctx.is_owner(owner) {
                Decision::Allow
            } else {
                Decision::deny("admin or owner only")
            }
        }
    }
}

/// 로그인 필요
pub fn ensure_logged_in(ctx: &AuthContext) -> Result<()> {
    authorize(ctx, Requirement::LoggedIn).into_result()
}

/// 관리자 필요
pub fn ensure_admin(ctx: &AuthContext) -> Result<()> {
    authorize(ctx, Requirement::Admin).into_result()
}

/// 관리자 또는 소유자 필요
pub fn ensure_admin_or_owner(ctx: &AuthContext, owner: &str) -> Result<()> {
    authorize(ctx, Requirement::AdminOrOwner(owner)).into_result()
}
