//! 호출자 컨텍스트

use serde::{Deserialize, Serialize};

/// 인증 컨텍스트
///
/// 토큰 검증을 통과한 호출자의 정보입니다. 토큰이 없으면 `anonymous()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthContext {
    /// 사용자 이름
    pub username: Option<String>,

    /// 관리자 여부
    #[serde(default)]
    pub is_admin: bool,
}

impl AuthContext {
    /// 일반 사용자 컨텍스트 생성
    pub fn user(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            is_admin: false,
        }
    }

    /// 관리자 컨텍스트 생성
    pub fn admin(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            is_admin: true,
        }
    }

    /// 익명 컨텍스트
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// 인증되었는지 확인
    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }

    /// 주어진 사용자 본인인지 확인
    pub fn is_owner(&self, owner: &str) -> bool {
        self.username.as_deref() == Some(owner)
    }
}
