// 認証関連のデータモデル

use serde::{Deserialize, Serialize};

/// ユーザーロール
///
/// ロール比較は完全一致のみ。継承関係はない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// 一般顧客（予約の作成のみ）
    Customer,
    /// 管理者
    Admin,
    /// 編集者（ブログ管理）
    Editor,
}

impl UserRole {
    /// ロールを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
            Self::Editor => "editor",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            "editor" => Ok(Self::Editor),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// JWTクレーム
///
/// ログイン時に外部で発行され、リクエストごとに検証される。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// ユーザーID（JWT sub claim）
    pub sub: String,
    /// 表示名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// メールアドレス
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// ユーザーロール
    pub role: UserRole,
    /// 発行日時（Unix timestamp、JWT iat claim）
    #[serde(default)]
    pub iat: usize,
    /// 有効期限（Unix timestamp、JWT exp claim）
    pub exp: usize,
}
