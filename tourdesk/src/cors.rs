//! CORS設定
//!
//! 許可オリジンの判定と `tower_http::cors::CorsLayer` の構築

use crate::common::error::{DeskError, DeskResult};
use axum::http::{header, HeaderValue, Method};
use regex::Regex;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// ローカル開発用として常に許可するホスト
const LOCAL_HOSTS: [&str; 2] = ["http://localhost", "http://127.0.0.1"];

/// CORS許可設定
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    /// 完全一致で許可するオリジン（末尾スラッシュは無視）
    pub allowed_origins: Vec<String>,
    /// 全体一致で許可するオリジンの正規表現
    pub origin_pattern: Option<Regex>,
}

impl CorsConfig {
    /// カンマ区切りのオリジン一覧と正規表現から設定を作成
    pub fn new(origins: &str, pattern: Option<&str>) -> DeskResult<Self> {
        let allowed_origins = origins
            .split(',')
            .map(|o| o.trim().trim_end_matches('/'))
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        let origin_pattern = pattern
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| {
                Regex::new(&format!("^(?:{})$", p)).map_err(|e| {
                    DeskError::Config(format!("Invalid CORS origin pattern '{}': {}", p, e))
                })
            })
            .transpose()?;

        Ok(Self {
            allowed_origins,
            origin_pattern,
        })
    }

    /// オリジンが許可されているか判定
    pub fn origin_allowed(&self, origin: &str) -> bool {
        let origin = origin.trim_end_matches('/');
        if self.allowed_origins.iter().any(|o| o == origin) {
            return true;
        }
        if self
            .origin_pattern
            .as_ref()
            .is_some_and(|re| re.is_match(origin))
        {
            return true;
        }
        is_local_origin(origin)
    }

    /// CorsLayerを構築
    pub fn layer(&self) -> CorsLayer {
        let config = Arc::new(self.clone());
        CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
                origin
                    .to_str()
                    .map(|o| config.origin_allowed(o))
                    .unwrap_or(false)
            }))
            .allow_credentials(true)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
    }
}

/// `http://localhost[:port]` / `http://127.0.0.1[:port]`
fn is_local_origin(origin: &str) -> bool {
    LOCAL_HOSTS.iter().any(|host| match origin.strip_prefix(host) {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix(':')
            .is_some_and(|port| !port.is_empty() && port.chars().all(|c| c.is_ascii_digit())),
        None => false,
    })
}
