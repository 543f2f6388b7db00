use std::net::TcpListener;
use std::str::FromStr;

use once_cell::sync::Lazy;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use football_results_backend::config::settings::AggregationSettings;
use football_results_backend::run;
use football_results_backend::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub db_pool: SqlitePool,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_settings(AggregationSettings {
        drop_zeroed_teams: false,
    })
    .await
}

pub async fn spawn_app_with_settings(aggregation: AggregationSettings) -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let connection_pool = configure_db().await;

    let server = run(listener, connection_pool.clone(), aggregation).expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp {
        address,
        db_pool: connection_pool,
    }
}

/// Fresh in-memory database per test. A single never-reaped connection
/// keeps the in-memory database alive for the test's lifetime.
pub async fn configure_db() -> SqlitePool {
    Lazy::force(&TRACING);

    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Failed to parse in-memory SQLite options");
    let connection_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory SQLite database");

    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}
