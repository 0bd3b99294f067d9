use alias_shortener::{config, server, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;

    telemetry::init(config.app_env);
    tracing::info!(env = config.app_env.as_str(), "starting alias-shortener");
    config.print_summary();

    server::run(config).await
}
