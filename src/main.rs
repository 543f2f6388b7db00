use std::net::TcpListener;
use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;

use football_results_backend::config::settings::get_config;
use football_results_backend::db::seeder;
use football_results_backend::run;
use football_results_backend::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "football-results-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    let connect_options = config
        .database
        .connect_options()
        .expect("Invalid database configuration");
    let connection_pool = SqlitePoolOptions::new()
        .max_connections(8)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy_with(connect_options);

    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to run database migrations");

    if config.application.seed_on_startup {
        match seeder::seed_if_empty(&connection_pool, config.aggregation.zeroed_policy()).await {
            Ok(0) => {}
            Ok(count) => tracing::info!("Seeded database with {} matches", count),
            Err(e) => {
                tracing::error!("Database seeding failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Listening on {}", address);

    run(listener, connection_pool, config.aggregation)?.await
}
