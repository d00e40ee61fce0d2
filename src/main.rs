use courier::client::Session;
use courier::config::Config;
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let mut session = Session::new(&cfg)?;

    for url in &cfg.targets {
        session.submit(
            url.clone(),
            Box::new(|response| {
                info!(
                    url = %response.url(),
                    bytes = response.len(),
                    body = %response.body_lossy(),
                    "response received"
                );
            }),
        );
    }

    session.run()?;
    info!("all requests resolved");

    Ok(())
}
