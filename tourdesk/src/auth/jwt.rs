// JWT生成と検証（jsonwebtoken実装）

use crate::common::auth::{Claims, UserRole};
use crate::common::error::JwtError;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

/// デフォルトのJWT有効期限（24時間）
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// トークン発行対象
#[derive(Debug, Clone)]
pub struct TokenSubject {
    /// ユーザーID
    pub sub: String,
    /// 表示名
    pub name: Option<String>,
    /// メールアドレス
    pub email: Option<String>,
    /// ユーザーロール
    pub role: UserRole,
}

/// JWTトークンを生成
///
/// # Arguments
/// * `subject` - 発行対象のユーザー情報
/// * `secret` - JWTシークレットキー
/// * `ttl_hours` - 有効期限（時間）
///
/// # Returns
/// * `Ok(String)` - JWTトークン（3つのドット区切り部分）
/// * `Err(JwtError)` - 生成失敗
pub fn create_jwt(subject: &TokenSubject, secret: &str, ttl_hours: i64) -> Result<String, JwtError> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(chrono::Duration::hours(ttl_hours))
        .ok_or_else(|| JwtError::Encode("Failed to calculate expiration time".to_string()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: subject.sub.clone(),
        name: subject.name.clone(),
        email: subject.email.clone(),
        role: subject.role,
        iat: now.timestamp() as usize,
        exp: expiration,
    };

    encode_claims(&claims, secret)
}

/// クレームをそのまま署名する
pub fn encode_claims(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::Encode(e.to_string()))
}

/// JWTトークンを検証
///
/// 署名検証の後に有効期限を確認する。署名が一致しないトークンは期限に関わらず
/// `InvalidSignature` になる。
///
/// # Returns
/// * `Ok(Claims)` - 検証済みクレーム
/// * `Err(JwtError)` - 検証失敗の種別
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => JwtError::InvalidSignature,
        ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::Malformed(e.to_string()),
    })
}
