use std::sync::Arc;

use auth::AuthService;
use auth::PasswordHasher;
use weight_service::domain::user::models::EmailAddress;
use weight_service::domain::user::models::User;
use weight_service::domain::user::service::UserService;
use weight_service::inbound::http::router::create_router;
use weight_service::outbound::repositories::InMemoryUserRepository;

pub const SIGNING_KEY: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const EMAIL: &str = "existing_email@email.com";
pub const PASSWORD: &str = "correct_password1234";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub repository: Arc<InMemoryUserRepository>,
    pub auth_service: Arc<AuthService<InMemoryUserRepository>>,
    pub password_hasher: PasswordHasher,
}

impl TestApp {
    /// Spawn the application with one seeded user in a background task
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let password_hasher =
            PasswordHasher::with_minimum_cost().expect("Failed to build password hasher");

        let repository = Arc::new(InMemoryUserRepository::new());
        repository
            .create(User::new(
                "existing".to_string(),
                EmailAddress::new(EMAIL).unwrap(),
                password_hasher.hash(PASSWORD).expect("Failed to hash password"),
            ))
            .await
            .expect("Failed to seed user");

        let auth_service = Arc::new(
            AuthService::new(
                Arc::clone(&repository),
                SIGNING_KEY,
                chrono::Duration::minutes(15),
            )
            .with_password_hasher(password_hasher.clone()),
        );

        let user_service = Arc::new(UserService::new(
            Arc::clone(&repository),
            Arc::clone(&auth_service),
        ));

        let router = create_router(Arc::clone(&auth_service), user_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            repository,
            auth_service,
            password_hasher,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Register an account and return the response
    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/register")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in as the seeded user and return (access_token, refresh_token)
    pub async fn login_tokens(&self) -> (String, String) {
        let body: serde_json::Value = self
            .login(EMAIL, PASSWORD)
            .await
            .json()
            .await
            .expect("Failed to parse response");

        (
            body["data"]["access_token"].as_str().unwrap().to_string(),
            body["data"]["refresh_token"].as_str().unwrap().to_string(),
        )
    }
}
