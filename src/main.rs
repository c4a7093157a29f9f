// --- Class batch booking service - entry point ---

use classbook::run_server;
use classbook::storage::db;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv::dotenv();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    println!("=== Class Batch Booking (API) ===");
    let bind = std::env::var("CLASSBOOK_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    println!("Starting server on http://{}", bind);
    run_server(&bind, db::db_path()).await
}
