use std::net::TcpListener;

use actix_web::web::Data;
use anyhow::Context;
use env_logger::Env;
use spoiler_tally::{
    configuration::get_configuration,
    services::{LineClient, Summarizer},
    startup::run,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration")?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address).with_context(|| format!("Failed to bind {}", address))?;

    let summarizer = Data::new(Summarizer::new(&configuration.forum)?);
    let line_client = Data::new(LineClient::new(&configuration.line)?);

    log::info!("Listening on {}", address);
    run(listener, summarizer, line_client)?.await?;

    Ok(())
}
