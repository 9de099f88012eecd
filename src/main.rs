use clap::Parser;
use lingoruta::catalog::Catalog;
use lingoruta::db::Db;
use lingoruta::AppState;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the sqlite database file, created on first run.
    #[arg(long, env, default_value = "lingoruta.db")]
    db_path: String,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:1414")]
    address: String,

    /// Mark session cookies Secure; enable when serving over https.
    #[arg(long, env, default_value_t = false)]
    secure_cookies: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tracing=info,axum=debug,lingoruta=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let catalog = Catalog::load()?;
    tracing::info!(
        "curriculum loaded: {} phases, {} units",
        catalog.phases.len(),
        catalog.units_count()
    );

    let db = Db::new(&args.db_path).await?;
    db.seed_demo_data().await?;

    let state = AppState::new(db, catalog, args.secure_cookies);
    let router = lingoruta::router(state);

    let listener = tokio::net::TcpListener::bind(&args.address).await?;
    tracing::info!("listening on {}", args.address);
    axum::serve(listener, router).await?;

    Ok(())
}
