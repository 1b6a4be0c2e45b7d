//! Recrypt Gateway
//!
//! A stateless HTTP gateway for the Umbral proxy re-encryption workflow:
//!
//! 1. **Key generation**: fresh secret keys for delegators and delegatees.
//!
//! 2. **Encryption / direct decryption**: a delegator encrypts under her own
//!    public key and can always decrypt with her secret key.
//!
//! 3. **Delegation**: the delegator issues re-encryption key fragments; the
//!    proxy transforms capsules with verified fragments; the delegatee
//!    combines a threshold of capsule fragments to decrypt.
//!
//! **Privacy**: the gateway holds nothing between requests. Every operation
//! receives all of its inputs and returns all derived outputs; the proxy
//! path never sees plaintext or secret keys other than those the wire
//! contract explicitly carries.

mod error;
mod handlers;
mod protocol;

use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

// ── CLI Arguments ─────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "recrypt-gateway", version, about = "Umbral proxy re-encryption gateway")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 9091, env = "GATEWAY_PORT")]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0", env = "GATEWAY_BIND")]
    bind: String,
}

// ── Router ────────────────────────────────────────────────────────────────────

fn app() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/generate_secret_key", get(handlers::generate_secret_key))
        .route("/encrypt_message", post(handlers::encrypt_message))
        .route("/decrypt_message", post(handlers::decrypt_message))
        .route(
            "/generate_reencryption_key",
            post(handlers::generate_reencryption_key),
        )
        .route("/reencrypt_capsule", post(handlers::reencrypt_capsule))
        .route(
            "/decrypt_reencrypted_capsule",
            post(handlers::decrypt_reencrypted_capsule),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Entry Point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recrypt_gateway=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();
    let addr = format!("{}:{}", args.bind, args.port);
    tracing::info!("Recrypt gateway starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app()).await.expect("Server error");
}

// ── Tests ─────────────────────────────────────────────────────────────────────
