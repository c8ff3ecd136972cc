use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use barbershop::config::Config;

pub const PASSWORD: &str = "password123";

/// A running test server backed by its own in-memory database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: SqlitePool,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Sign up with the JSON API, return the response body + status.
    pub async fn signup(&self, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/v1/auth/signup"))
            .json(body)
            .send()
            .await
            .expect("signup request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Login and return the auth response body + status.
    pub async fn login(&self, username: &str, password: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/v1/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("login request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Sign up an account with a complete form, return its access token.
    pub async fn create_account(&self, name: &str, username: &str, is_barber: bool) -> String {
        let (body, status) = self.signup(&signup_body(name, username, is_barber)).await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");
        body["access_token"].as_str().unwrap().to_string()
    }

    /// Walk the wizard from a fresh draft to a stored appointment.
    pub async fn book(
        &self,
        token: &str,
        services: &[&str],
        specifications: &str,
        date: &str,
        time: &str,
    ) -> Value {
        let (_, status) = self.post_auth("/api/v1/wizard", token, &json!({})).await;
        assert_eq!(status, StatusCode::CREATED);

        let (body, status) = self
            .put_auth(
                "/api/v1/wizard/services",
                token,
                &json!({ "services": services, "specifications": specifications }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "select services failed: {body}");
        let (_, status) = self.post_auth("/api/v1/wizard/next", token, &json!({})).await;
        assert_eq!(status, StatusCode::OK);

        let (body, status) = self
            .put_auth(
                "/api/v1/wizard/datetime",
                token,
                &json!({ "date": date, "time": time }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "choose date failed: {body}");
        let (_, status) = self.post_auth("/api/v1/wizard/next", token, &json!({})).await;
        assert_eq!(status, StatusCode::OK);

        let (body, status) = self.post_auth("/api/v1/wizard/confirm", token, &json!({})).await;
        assert_eq!(status, StatusCode::CREATED, "confirm failed: {body}");
        body
    }

    /// Make an authenticated GET request.
    pub async fn get_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated POST request with JSON body.
    pub async fn post_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated PUT request with JSON body.
    pub async fn put_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated DELETE request.
    pub async fn delete_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn count_users(&self) -> i64 {
        barbershop::db::users::count_all(&self.pool)
            .await
            .expect("count users failed")
    }
}

pub fn signup_body(name: &str, username: &str, is_barber: bool) -> Value {
    json!({
        "name": name,
        "last_name": "Tester",
        "telephone": "555-0100",
        "username": username,
        "password": PASSWORD,
        "confirm_password": PASSWORD,
        "accept_terms": true,
        "is_barber": is_barber,
    })
}

/// Spawn a test app with a fresh in-memory database.
pub async fn spawn_app() -> TestApp {
    // A single connection that never recycles keeps the in-memory database alive
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-jwt-secret-that-is-long-enough".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        session_ttl_minutes: 60,
        secure_cookies: false,
        max_body_size: 65_536,
        log_level: "warn".to_string(),
    };

    let app = barbershop::build_app(pool.clone(), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp { addr, pool, client }
}
