use std::sync::Arc;

use auth::AuthService;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use weight_service::config::Config;
use weight_service::domain::user::models::EmailAddress;
use weight_service::domain::user::models::Password;
use weight_service::domain::user::models::RegisterUserCommand;
use weight_service::domain::user::service::UserService;
use weight_service::inbound::http::router::create_router;
use weight_service::outbound::repositories::InMemoryUserRepository;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weight_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "weight-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_token_ttl_minutes = config.jwt.access_token_ttl_minutes,
        seed_users = config.users.len(),
        "Configuration loaded"
    );

    let user_repository = Arc::new(InMemoryUserRepository::new());
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repository),
        config.jwt.secret.as_bytes(),
        config.jwt.access_token_ttl()?,
    ));
    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repository),
        Arc::clone(&auth_service),
    ));

    for seed in &config.users {
        let command = RegisterUserCommand::new(
            seed.name.clone(),
            EmailAddress::new(&seed.email)?,
            Password::new(seed.password.clone())?,
        );
        let user = user_service.register(command).await?;
        tracing::info!(user_id = %user.id, email = %user.email, "Seeded user");
    }

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(auth_service, user_service)).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
