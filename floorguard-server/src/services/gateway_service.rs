use std::sync::Arc;
use std::time::Duration;

use floorguard_core::models::VentilationCommand;
use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use tokio::sync::mpsc;

use crate::configs::{Gateway, GatewayTopic};
use crate::errors::IngestError;
use crate::services::{IngestOutcome, IngestService};

/// A message ready to be handed to the broker.
#[derive(Debug, Clone, PartialEq)]
pub struct Outgoing {
    pub topic: String,
    pub payload: Vec<u8>,
}

/// Actuator command (without reasons) followed by the dashboard colours.
pub fn outgoing_messages(outcome: &IngestOutcome, topic: &GatewayTopic) -> Result<Vec<Outgoing>, IngestError> {
    let command = VentilationCommand::from(&outcome.action);
    let colors = outcome.evaluation.status_packet.colors();

    Ok(vec![
        Outgoing {
            topic: topic.ventilation.clone(),
            payload: serde_json::to_vec(&command)?,
        },
        Outgoing {
            topic: topic.dashboard.clone(),
            payload: serde_json::to_vec(&colors)?,
        },
    ])
}

pub struct GatewayService {
    client: AsyncClient,
    event_loop: EventLoop,
    topic: GatewayTopic,
    ingest: Arc<IngestService>,
}

impl GatewayService {
    pub fn new(gateway: &Gateway, ingest: Arc<IngestService>) -> Self {
        let mut options = MqttOptions::new(&gateway.client_id, &gateway.host, gateway.port);
        options.set_keep_alive(Duration::from_secs(gateway.keep_alive));

        let (client, event_loop) = AsyncClient::new(options, 10);

        Self {
            client,
            event_loop,
            topic: gateway.topic.clone(),
            ingest,
        }
    }

    /// Polls the broker forever. Payloads go through a single worker so they
    /// are handled strictly in arrival order.
    pub async fn run(self) {
        let Self {
            client,
            mut event_loop,
            topic,
            ingest,
        } = self;

        let (sender, receiver) = mpsc::channel::<Vec<u8>>(100);
        tokio::spawn(Self::process_messages(client.clone(), topic.clone(), ingest, receiver));

        loop {
            match event_loop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    // Subscriptions do not survive a reconnect with a clean session
                    match client.subscribe(&topic.sensor, QoS::AtLeastOnce).await {
                        Ok(()) => tracing::info!("subscribe topic {}", topic.sensor),
                        Err(e) => tracing::error!("Failed to subscribe {}: {}", topic.sensor, e),
                    }
                }
                Ok(Event::Incoming(Packet::Publish(publish))) if publish.topic == topic.sensor => {
                    if let Err(e) = sender.send(publish.payload.to_vec()).await {
                        tracing::error!("Ingest worker stopped: {}", e);
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!("MQTT error: {}", e);
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        }
    }

    async fn process_messages(
        client: AsyncClient,
        topic: GatewayTopic,
        ingest: Arc<IngestService>,
        mut receiver: mpsc::Receiver<Vec<u8>>,
    ) {
        while let Some(payload) = receiver.recv().await {
            if let Err(e) = Self::handle_message(&client, &topic, &ingest, &payload).await {
                match e {
                    IngestError::Validation(e) => tracing::warn!("Dropping payload: {}", e),
                    e => tracing::error!("Error handling message: {}", e),
                }
            }
        }
    }

    async fn handle_message(
        client: &AsyncClient,
        topic: &GatewayTopic,
        ingest: &IngestService,
        payload: &[u8],
    ) -> Result<(), IngestError> {
        let outcome = ingest.ingest(payload).await?;

        for message in outgoing_messages(&outcome, topic)? {
            tracing::debug!("Send {}: {}", message.topic, String::from_utf8_lossy(&message.payload));
            client
                .publish(message.topic, QoS::AtLeastOnce, false, message.payload)
                .await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use floorguard_core::controller::VentilationController;
    use floorguard_core::exposure::ExposureConfig;
    use floorguard_core::models::Reading;
    use floorguard_core::thresholds::Thresholds;
    use serde_json::{json, Value};
    use time::macros::datetime;

    use super::*;
    use crate::configs::{Database, SchemaManager, Storage};

    #[tokio::test]
    async fn test_outgoing_messages() {
        let storage = Arc::new(
            Storage::new(
                Database {
                    migration_path: None,
                    clean_start: true,
                    url: String::from("sqlite::memory:"),
                },
                SchemaManager::default(),
            )
            .await
            .unwrap(),
        );
        let ingest = IngestService::with_config(
            storage,
            Thresholds::default(),
            VentilationController::default(),
            ExposureConfig::default(),
        );

        let outcome = ingest
            .process(Reading {
                timestamp: datetime!(2025-03-04 10:00:00 UTC),
                temp: 21.0,
                pressure: 940.0,
                co_mean: 2.0,
                co_max: 4.0,
                co_valid: true,
                pm2_5: 6.0,
                pm10: 12.0,
            })
            .await
            .unwrap();

        let topic = GatewayTopic {
            sensor: String::from("in"),
            ventilation: String::from("vent"),
            dashboard: String::from("dash"),
        };
        let messages = outgoing_messages(&outcome, &topic).unwrap();
        assert_eq!(messages.len(), 2);

        assert_eq!(messages[0].topic, "vent");
        let command: Value = serde_json::from_slice(&messages[0].payload).unwrap();
        assert_eq!(command["ventilation_mode"], json!("NORMAL"));
        assert_eq!(command["fan_supply_speed"], json!(50));
        assert!(command.get("reasons").is_none());

        assert_eq!(messages[1].topic, "dash");
        let colors: Value = serde_json::from_slice(&messages[1].payload).unwrap();
        assert_eq!(colors["pressure"], json!("orange"));
        assert_eq!(colors["co"], json!("green"));
        assert_eq!(colors["timestamp"], json!("2025-03-04T10:00:00Z"));
    }
}
