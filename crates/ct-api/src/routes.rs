//! API routes

use axum::{
    routing::{get, post},
    Router,
};

use crate::extractors::AppState;
use crate::handlers::{auth, contracts, export};

/// Create the complete API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/auth", auth_router())
        .nest("/contracts", contracts_router())
        .with_state(state)
}

fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin))
        .route("/signout", post(auth::signout))
}

fn contracts_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(contracts::list_contracts).post(contracts::create_contract),
        )
        .route("/export", get(export::export_contracts))
        .route(
            "/:id",
            get(contracts::get_contract)
                .patch(contracts::update_contract)
                .delete(contracts::delete_contract),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use ct_auth::MemorySessionStore;
    use ct_core::config::AppConfig;
    use ct_db::{MemoryContractStore, MemoryUserStore, NewUserRecord, UserStore};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let mut config = AppConfig::default();
        config.auth.secure_cookies = false;

        AppState::new(
            Arc::new(MemoryContractStore::new()),
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemorySessionStore::new()),
            config,
        )
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    fn authed_request(method: &str, uri: &str, cookie: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, cookie);
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Sign a user up and in, returning the session cookie
    async fn sign_in(app: &Router, login: &str) -> String {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/auth/signup",
                json!({
                    "login": login,
                    "mail": format!("{}@example.com", login),
                    "password": "a strong password",
                    "password_confirmation": "a strong password",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        sign_in_existing(app, login, "a strong password").await
    }

    async fn sign_in_existing(app: &Router, login: &str, password: &str) -> String {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/auth/signin",
                json!({ "login": login, "password": password }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    fn contract_payload(client: &str) -> Value {
        json!({
            "client_name": client,
            "date": "2024-06-15",
            "contact_number": "+1 555 0100",
            "vendor_name": "Jane Vendor",
            "vendor_company": "Vendor Co",
            "rate": 85.0,
            "currency": "USD",
            "contract_type": "Fixed",
            "status": "Active",
        })
    }

    async fn create_contract(app: &Router, cookie: &str, client: &str) -> i64 {
        let response = app
            .clone()
            .oneshot(authed_request(
                "POST",
                "/contracts",
                cookie,
                Some(contract_payload(client)),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_contracts_require_authentication() {
        let app = router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/contracts")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_signup_rejects_duplicate_login() {
        let app = router(test_state());
        sign_in(&app, "alice").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/auth/signup",
                json!({
                    "login": "alice",
                    "mail": "alice2@example.com",
                    "password": "a strong password",
                    "password_confirmation": "a strong password",
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert!(body["fields"]["login"].is_array());
    }

    #[tokio::test]
    async fn test_signup_rejects_short_password() {
        let app = router(test_state());

        let response = app
            .oneshot(json_request(
                "POST",
                "/auth/signup",
                json!({
                    "login": "bob",
                    "mail": "bob@example.com",
                    "password": "short",
                    "password_confirmation": "short",
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_signin_with_wrong_password() {
        let app = router(test_state());
        sign_in(&app, "alice").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/auth/signin",
                json!({ "login": "alice", "password": "wrong" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_signout_invalidates_session() {
        let app = router(test_state());
        let cookie = sign_in(&app, "alice").await;

        let response = app
            .clone()
            .oneshot(authed_request("POST", "/auth/signout", &cookie, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(authed_request("GET", "/contracts", &cookie, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_sets_owner_from_session_not_payload() {
        let state = test_state();
        let app = router(state);
        let cookie = sign_in(&app, "alice").await;

        // A user_id smuggled into the payload is ignored
        let mut payload = contract_payload("Acme");
        payload["user_id"] = json!(999);

        let response = app
            .clone()
            .oneshot(authed_request("POST", "/contracts", &cookie, Some(payload)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["user_id"], json!(1));
    }

    #[tokio::test]
    async fn test_ownership_scenario() {
        // User A creates R1; standard user B cannot see, edit, or delete it;
        // an administrator can do all three.
        let state = test_state();
        let app = router(state.clone());

        let cookie_a = sign_in(&app, "user_a").await;
        let record_id = create_contract(&app, &cookie_a, "Acme").await;

        let cookie_b = sign_in(&app, "user_b").await;

        // B's list does not contain R1
        let response = app
            .clone()
            .oneshot(authed_request("GET", "/contracts", &cookie_b, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["count"], json!(0));

        // B cannot read, edit, or delete R1
        let uri = format!("/contracts/{}", record_id);
        for request in [
            authed_request("GET", &uri, &cookie_b, None),
            authed_request("PATCH", &uri, &cookie_b, Some(json!({"status": "Expired"}))),
            authed_request("DELETE", &uri, &cookie_b, None),
        ] {
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::FORBIDDEN);
        }

        // An administrator can
        let hashed_password = ct_auth::hash_password("admin password!").unwrap();
        state
            .users
            .create(NewUserRecord {
                login: "root".into(),
                mail: "root@example.com".into(),
                admin: true,
                hashed_password,
            })
            .await
            .unwrap();
        let cookie_admin = sign_in_existing(&app, "root", "admin password!").await;

        let response = app
            .clone()
            .oneshot(authed_request("GET", "/contracts", &cookie_admin, None))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["count"], json!(1));

        let response = app
            .clone()
            .oneshot(authed_request(
                "PATCH",
                &uri,
                &cookie_admin,
                Some(json!({"status": "Expired"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], json!("Expired"));
        // Owner unchanged by the admin edit
        assert_eq!(body["user_id"], json!(1));

        let response = app
            .clone()
            .oneshot(authed_request("DELETE", &uri, &cookie_admin, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_get_missing_contract_is_404() {
        let app = router(test_state());
        let cookie = sign_in(&app, "alice").await;

        let response = app
            .oneshot(authed_request("GET", "/contracts/999", &cookie, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_applies_filters() {
        let app = router(test_state());
        let cookie = sign_in(&app, "alice").await;
        create_contract(&app, &cookie, "Acme Industrial").await;
        create_contract(&app, &cookie, "Globex").await;

        let response = app
            .clone()
            .oneshot(authed_request(
                "GET",
                "/contracts?client_name=acme",
                &cookie,
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["count"], json!(1));
        assert_eq!(body["records"][0]["client_name"], json!("Acme Industrial"));
    }

    #[tokio::test]
    async fn test_invalid_contract_payload_is_422() {
        let app = router(test_state());
        let cookie = sign_in(&app, "alice").await;

        let mut payload = contract_payload("");
        payload["rate"] = json!(-5.0);

        let response = app
            .oneshot(authed_request("POST", "/contracts", &cookie, Some(payload)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_export_headers_and_auth() {
        let app = router(test_state());

        // Unauthenticated export is rejected
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/contracts/export")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let cookie = sign_in(&app, "alice").await;
        create_contract(&app, &cookie, "Acme").await;

        let response = app
            .oneshot(authed_request("GET", "/contracts/export", &cookie, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.contains("spreadsheetml"));

        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"Contracts_"));
        assert!(disposition.ends_with(".xlsx\""));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[0..2], b"PK");
    }

    /// Read the exported workbook back and return the rows of the Data sheet
    async fn export_rows(app: &Router, cookie: &str) -> Vec<Vec<String>> {
        use calamine::{Reader, Xlsx};

        let response = app
            .clone()
            .oneshot(authed_request("GET", "/contracts/export", cookie, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let mut workbook = Xlsx::new(std::io::Cursor::new(bytes.to_vec())).unwrap();
        let range = workbook.worksheet_range("Data").unwrap();
        range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[tokio::test]
    async fn test_admin_export_includes_owner_column() {
        let state = test_state();
        let app = router(state.clone());

        let cookie_alice = sign_in(&app, "alice").await;
        create_contract(&app, &cookie_alice, "Acme").await;

        let hashed_password = ct_auth::hash_password("admin password!").unwrap();
        state
            .users
            .create(NewUserRecord {
                login: "root".into(),
                mail: "root@example.com".into(),
                admin: true,
                hashed_password,
            })
            .await
            .unwrap();
        let cookie_admin = sign_in_existing(&app, "root", "admin password!").await;

        let rows = export_rows(&app, &cookie_admin).await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 12);
        assert_eq!(rows[0].last().map(String::as_str), Some("User"));
        assert_eq!(rows[1][0], "Acme");
        assert_eq!(rows[1].last().map(String::as_str), Some("alice"));

        // The owner's own export has no owner column
        let rows = export_rows(&app, &cookie_alice).await;
        assert_eq!(rows[0].len(), 11);
        assert!(!rows[0].contains(&"User".to_string()));
    }

    #[tokio::test]
    async fn test_update_with_null_clears_comments() {
        let app = router(test_state());
        let cookie = sign_in(&app, "alice").await;

        let mut payload = contract_payload("Acme");
        payload["comments"] = json!("call back in March");
        let response = app
            .clone()
            .oneshot(authed_request("POST", "/contracts", &cookie, Some(payload)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let id = body_json(response).await["id"].as_i64().unwrap();
        let uri = format!("/contracts/{}", id);

        // A patch that leaves comments out keeps the current value
        let response = app
            .clone()
            .oneshot(authed_request(
                "PATCH",
                &uri,
                &cookie,
                Some(json!({"status": "Expired"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["comments"], json!("call back in March"));

        // An explicit null clears it
        let response = app
            .clone()
            .oneshot(authed_request(
                "PATCH",
                &uri,
                &cookie,
                Some(json!({"comments": null})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["comments"], Value::Null);
    }
}
