use anyhow::{Context, Result};
use log::info;
use smartfarm_connectors::MqttConnector;
use smartfarm_node::hal::{self, NmcliLink};
use smartfarm_node::{bootstrap, NodeConfig, TelemetryLoop};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = NodeConfig::from_env().context("invalid configuration")?;
    info!(
        "SmartFarm node {} starting, broker {}:{}",
        env!("CARGO_PKG_VERSION"),
        config.mqtt.host,
        config.mqtt.port
    );

    let sensors = hal::sensors_from_config(&config).context("sensor channels unavailable")?;
    let link = NmcliLink::new(config.wifi_interface.clone());

    let context = bootstrap(
        link,
        &config.wifi,
        config.network_poll_interval,
        MqttConnector::connect(config.mqtt.clone()),
    )
    .await?;

    TelemetryLoop::new(
        sensors,
        context.session,
        config.topic,
        config.location,
        config.sample_period,
    )
    .run()
    .await;

    Ok(())
}
