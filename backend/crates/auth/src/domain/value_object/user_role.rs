use serde::{Deserialize, Serialize};
use std::fmt;

/// ユーザーロール
///
/// `code()` の文字列はトークンの `role` クレームとストアの `user_role` 列に
/// そのまま書かれるため、変更してはいけません。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    #[default]
    Supplier,
}

impl UserRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::Supplier => "Supplier",
        }
    }

    /// Unknown codes yield `None`; callers decide whether that is a store
    /// corruption or a rejected token.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Admin" => Some(UserRole::Admin),
            "Supplier" => Some(UserRole::Supplier),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
