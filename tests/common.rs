#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;
use estate_admin::config::{ApiConfig, ConfigV1};
use estate_admin::models::UserProfile;
use estate_admin::startup::build_context_with_storage;
use estate_admin::state::SessionContext;
use estate_admin::store::MemoryStore;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

pub const TEST_SECRET: &[u8] = b"test-secret";

/// A real HS256 token with the given claims, as the backend would issue it.
pub fn mint_token(claims: Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .expect("token should encode")
}

pub fn live_token() -> String {
    mint_token(json!({"sub": "u1", "role": "admin", "exp": 9999999999u64}))
}

pub fn token_expiring_in(seconds: i64) -> String {
    mint_token(json!({"sub": "u1", "exp": Utc::now().timestamp() + seconds}))
}

pub fn admin_profile() -> UserProfile {
    UserProfile::new(Some("Asha Rao".to_string()), Some("admin".to_string()))
}

/// Session context on an in-memory store, talking to `base_url`.
pub fn build_test_context(base_url: &str) -> (Arc<MemoryStore>, SessionContext) {
    let storage = Arc::new(MemoryStore::new());
    let config = ConfigV1 {
        api: ApiConfig {
            base_url: base_url.to_string(),
            timeout_in_ms: Some(5000),
        },
        ..ConfigV1::default()
    };
    let ctx = build_context_with_storage(config, storage.clone()).expect("context should build");
    (storage, ctx)
}

/// Same, with a live admin session already stored.
pub fn signed_in_context(base_url: &str) -> (Arc<MemoryStore>, SessionContext, String) {
    let (storage, ctx) = build_test_context(base_url);
    let token = live_token();
    ctx.guard
        .start_session(&token, &admin_profile())
        .expect("session should store");
    (storage, ctx, token)
}
