#![allow(missing_docs)]

pub mod config;

mod error;
mod payload;
mod routes;

use axum::{Router, routing};
use bon::Builder;
use dissolve_derive::Dissolve;
use user_registry_engine::AccountService;

pub fn create_router(app: App) -> Router {
    Router::new()
        .route("/api/health", routing::get(routes::health))
        .route("/api/users", routing::get(routes::list_accounts))
        .route("/api/users/signup", routing::post(routes::signup))
        .route("/api/users/login", routing::post(routes::login))
        .with_state(app)
}

#[derive(Clone, Builder, Dissolve)]
pub struct App {
    service: AccountService,
}
