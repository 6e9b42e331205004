// ============================================================================
// MINIMAL MULTI-USER BLOG
// ============================================================================

// - User registration/login with password hashing
// - Cookie session authentication
// - Ownership-checked post CRUD
// - SQLite persistence
// - Input validation
// - Proper error handling
// - Structured logging

use blog::{app, states::AppState, store};
use tracing::info;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    dotenvy::dotenv().ok();

    // Session secret
    let session_secret = std::env::var("SESSION_SECRET").expect("SESSION_SECRET must be set!");

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:blog.db".to_string());
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    // Open the database, creating the schema on first run
    let pool = store::connect(&database_url)
        .await
        .expect("Failed to open database");

    let state = AppState {
        pool,
        session_secret,
    };

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();

    info!("Server running on http://{}", bind_addr);
    info!("Routes:");
    info!("  GET       /             - List posts");
    info!("  GET       /:id          - View post");
    info!("  GET/POST  /register     - Create account");
    info!("  GET/POST  /login        - Log in");
    info!("  GET       /logout       - Log out");
    info!("  GET/POST  /create       - New post (auth)");
    info!("  GET/POST  /:id/update   - Edit post (auth, owner only)");
    info!("  POST      /:id/delete   - Delete post (auth, owner only)");

    axum::serve(listener, app(state)).await.unwrap();
}
