//! REST APIルーティング
//!
//! ゲートと監査の順序: 認証（require_auth / require_admin）→ ロール判定 →
//! 監査ミドルウェア → ハンドラー。

pub mod activity_logs;
pub mod blogs;
pub mod bookings;
pub mod envelope;
pub mod error;
pub mod health;
pub mod tours;

use crate::audit::{audit_mutation, types::AuditAction, AuditLayer};
use crate::auth::middleware::{require_admin, require_auth, require_role};
use crate::common::auth::UserRole;
use crate::AppState;
use axum::{
    handler::Handler,
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

/// リソース種別: ツアー
pub const RESOURCE_TOUR: &str = "tour";
/// リソース種別: ブログ記事
pub const RESOURCE_BLOG: &str = "blog";
/// リソース種別: 予約
pub const RESOURCE_BOOKING: &str = "booking";

fn audit_layer(state: &AppState, action: AuditAction, resource_type: &str) -> AuditLayer {
    AuditLayer::new(state.audit_recorder.clone(), action, resource_type)
        .with_capture_limit(state.audit_capture_limit)
}

/// アプリケーションのルーターを構築する
pub fn create_app(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health))
        .route("/api/tours", get(tours::list_tours))
        .route("/api/tours/:id", get(tours::get_tour))
        .route("/api/blogs", get(blogs::list_blogs));

    let admin = Router::new()
        .route(
            "/api/admin/tours",
            post(tours::create_tour.layer(from_fn_with_state(
                audit_layer(&state, AuditAction::Create, RESOURCE_TOUR),
                audit_mutation,
            ))),
        )
        .route(
            "/api/admin/tours/:id",
            put(tours::update_tour.layer(from_fn_with_state(
                audit_layer(&state, AuditAction::Update, RESOURCE_TOUR),
                audit_mutation,
            )))
            .delete(tours::delete_tour.layer(from_fn_with_state(
                audit_layer(&state, AuditAction::Delete, RESOURCE_TOUR),
                audit_mutation,
            ))),
        )
        .route("/api/admin/bookings", get(bookings::list_bookings))
        .route(
            "/api/admin/bookings/:id/status",
            patch(bookings::update_booking_status.layer(from_fn_with_state(
                audit_layer(&state, AuditAction::Update, RESOURCE_BOOKING),
                audit_mutation,
            ))),
        )
        .route(
            "/api/admin/bookings/:id",
            delete(bookings::delete_booking.layer(from_fn_with_state(
                audit_layer(&state, AuditAction::Delete, RESOURCE_BOOKING),
                audit_mutation,
            ))),
        )
        .route(
            "/api/admin/activity-logs",
            get(activity_logs::list_activity_logs),
        )
        .route_layer(from_fn_with_state(state.auth_gate.clone(), require_admin));

    let editor = Router::new()
        .route(
            "/api/editor/blogs",
            post(blogs::create_blog.layer(from_fn_with_state(
                audit_layer(&state, AuditAction::Create, RESOURCE_BLOG),
                audit_mutation,
            ))),
        )
        .route(
            "/api/editor/blogs/:id",
            put(blogs::update_blog.layer(from_fn_with_state(
                audit_layer(&state, AuditAction::Update, RESOURCE_BLOG),
                audit_mutation,
            )))
            .delete(blogs::delete_blog.layer(from_fn_with_state(
                audit_layer(&state, AuditAction::Delete, RESOURCE_BLOG),
                audit_mutation,
            ))),
        )
        .route_layer(from_fn_with_state(UserRole::Editor, require_role))
        .route_layer(from_fn_with_state(state.auth_gate.clone(), require_auth));

    let customer = Router::new()
        .route("/api/bookings", post(bookings::create_booking))
        .route_layer(from_fn_with_state(UserRole::Customer, require_role))
        .route_layer(from_fn_with_state(state.auth_gate.clone(), require_auth));

    let cors = state.cors.layer();

    Router::new()
        .merge(public)
        .merge(admin)
        .merge(editor)
        .merge(customer)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
