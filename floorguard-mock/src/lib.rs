use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use rumqttc::{AsyncClient, MqttOptions, QoS};
use time::OffsetDateTime;
use tokio::time::{interval, sleep};

use crate::settings::Settings;
use crate::simulate::Simulator;

pub mod settings;
pub mod simulate;

/// Fraction of the UTC day elapsed at `timestamp`.
pub fn day_fraction(timestamp: OffsetDateTime) -> f64 {
    let seconds = u32::from(timestamp.hour()) * 3600 + u32::from(timestamp.minute()) * 60 + u32::from(timestamp.second());

    f64::from(seconds) / 86400.0
}

pub async fn run(settings: &Arc<Settings>) -> Result<(), Box<dyn Error>> {
    let gateway = &settings.gateway;
    let mut options = MqttOptions::new(format!("{}-mock", gateway.client_id), &gateway.host, gateway.port);
    options.set_keep_alive(Duration::from_secs(5));

    let (client, mut event_loop) = AsyncClient::new(options, 10);

    tokio::spawn(async move {
        loop {
            if let Err(e) = event_loop.poll().await {
                tracing::error!("MQTT error: {}", e);
                sleep(Duration::from_secs(1)).await;
            }
        }
    });

    let mut simulator = Simulator::new(settings.mock.incident_every, settings.mock.incident_length);
    let mut interval = interval(Duration::from_secs(settings.mock.interval_secs.max(1)));

    loop {
        interval.tick().await;

        let now = OffsetDateTime::now_utc();
        let payload = {
            let mut rng = rand::rng();
            simulator.next(&mut rng, now, day_fraction(now))
        };

        if let Some(incident) = simulator.incident() {
            tracing::info!("incident in progress: {:?}", incident);
        }

        let message = serde_json::to_vec(&payload)?;
        tracing::debug!("Send: {}", String::from_utf8_lossy(&message));

        client
            .publish(&gateway.topic.sensor, QoS::AtLeastOnce, false, message)
            .await?;
    }
}
