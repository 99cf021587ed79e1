// 認証ゲート実装（JWT検証とロール判定）

use crate::common::auth::{Claims, UserRole};
use crate::common::error::{AuthError, JwtError};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// クライアントが未設定の資格情報を文字列化して送ってくる値
const PLACEHOLDER_TOKENS: [&str; 2] = ["null", "undefined"];

/// 認証ゲート
///
/// サーバー側のJWTシークレットを保持し、リクエストごとにBearerトークンを検証する。
/// シークレットは起動時に注入され、以後変更されない。
#[derive(Clone)]
pub struct AuthGate {
    secret: Arc<str>,
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate").finish_non_exhaustive()
    }
}

impl AuthGate {
    /// 新しい認証ゲートを作成
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Arc::from(secret.into()),
        }
    }

    /// Bearerトークンを検証して認証コンテキストを返す
    ///
    /// # Returns
    /// * `Ok(Claims)` - 検証済みクレーム
    /// * `Err(AuthError)` - `Missing` / `Malformed` / `Invalid` / `Expired`
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let token = extract_bearer_token(headers)?;
        crate::auth::jwt::verify_jwt(token, &self.secret).map_err(|e| {
            let err = match e {
                JwtError::Expired => AuthError::Expired,
                _ => AuthError::Invalid,
            };
            tracing::warn!(kind = err.kind(), reason = %e, "JWT verification failed");
            err
        })
    }

    /// 管理者専用ゲート
    ///
    /// 判定は `authenticate` + `authorize_role(Admin)` と同じ。
    /// デコード失敗の種別ごとに管理者向けのメッセージを返す。
    pub fn authenticate_admin(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let token = extract_bearer_token(headers)?;
        let claims = crate::auth::jwt::verify_jwt(token, &self.secret).map_err(|e| {
            let err = match e {
                JwtError::InvalidSignature => AuthError::AdminInvalidSignature,
                JwtError::Expired => AuthError::AdminExpired,
                JwtError::Malformed(_) | JwtError::Encode(_) => AuthError::AdminInvalid,
            };
            tracing::warn!(kind = err.kind(), reason = %e, "Admin JWT verification failed");
            err
        })?;

        if claims.role != UserRole::Admin {
            tracing::warn!(
                sub = %claims.sub,
                role = %claims.role,
                "Admin access denied"
            );
            return Err(AuthError::AdminForbidden);
        }
        Ok(claims)
    }
}

/// Authorizationヘッダーからトークンを取り出す
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AuthError::Missing)?
        .trim();

    if token.is_empty() || PLACEHOLDER_TOKENS.contains(&token) {
        return Err(AuthError::Malformed);
    }
    Ok(token)
}

/// ロール判定
///
/// 完全一致のみ。`Admin` は `Editor` の要求を満たさない。
pub fn authorize_role(context: Option<&Claims>, required: UserRole) -> Result<(), AuthError> {
    let claims = context.ok_or(AuthError::Required)?;
    if claims.role != required {
        tracing::warn!(
            sub = %claims.sub,
            role = %claims.role,
            required = %required,
            "Role check failed"
        );
        return Err(AuthError::Forbidden(required));
    }
    Ok(())
}

/// JWT認証ミドルウェア
///
/// 検証済みのClaimsをリクエストの拡張データに格納して次へ進む。
pub async fn require_auth(
    State(gate): State<AuthGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let claims = gate.authenticate(request.headers())?;
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// ロール要求ミドルウェア
///
/// `require_auth` の内側に配置する。Claimsがなければ `AuthError::Required`。
pub async fn require_role(
    State(required): State<UserRole>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    authorize_role(request.extensions().get::<Claims>(), required)?;
    Ok(next.run(request).await)
}

/// 管理者ゲートミドルウェア（認証とロール判定を1回で行う）
pub async fn require_admin(
    State(gate): State<AuthGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let claims = gate.authenticate_admin(request.headers())?;
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
