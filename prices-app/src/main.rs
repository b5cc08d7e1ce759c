use prices_app::catalog_source;
use prices_app::commands::{Command, Session};
use prices_store::app_config::Config;
use prices_store::CartRepository;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prices_app=debug,prices_store=debug,prices_catalog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;
    tracing::debug!("Running {:?}", command);

    let source = catalog_source(&config);
    let carts = CartRepository::new(&config.cart.snapshot_file);
    let session = Session::new(source.as_ref(), &carts, &config.display.currency_symbol);

    let output = session.run(command).await?;
    print!("{}", output);
    Ok(())
}
