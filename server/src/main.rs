use inventory_server::{Config, Server, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();

    std::fs::create_dir_all(config.log_dir()).ok();
    let log_dir = config.is_production().then(|| config.log_dir());
    init_logger_with_file(Some(&config.log_level), log_dir.as_deref());

    tracing::info!(
        port = config.http_port,
        work_dir = %config.work_dir,
        environment = %config.environment,
        "Inventory server starting"
    );

    Server::new(config).run().await?;
    Ok(())
}
