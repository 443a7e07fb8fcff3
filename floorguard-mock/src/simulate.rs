use std::f64::consts::PI;

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Payload in the shape the service validates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorPayload {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub temp: f64,
    pub pressure: f64,
    pub co_mean: f64,
    pub co_max: f64,
    pub co_valid: bool,
    pub pm2_5: f64,
    pub pm10: f64,
}

/// Shop floor temperature over a day: coolest before dawn, hottest mid afternoon.
pub fn simulated_temperature(day_fraction: f64) -> f64 {
    let radians = (day_fraction - 0.375) * 2.0 * PI;

    ((22.0 + radians.sin() * 6.0) * 10.0).round() / 10.0
}

/// Barometric drift around standard pressure.
pub fn simulated_pressure(day_fraction: f64) -> f64 {
    1013.25 + (day_fraction * 4.0 * PI).cos() * 4.0
}

/// Kind of disturbance injected during an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Incident {
    CoLeak,
    DustBurst,
    HeatWave,
}

impl Incident {
    const ALL: [Incident; 3] = [Incident::CoLeak, Incident::DustBurst, Incident::HeatWave];
}

pub struct Simulator {
    co: f64,
    pm2_5: f64,
    pm10: f64,
    index: u32,
    incident_every: u32,
    incident_length: u32,
    warmup: u32,
    noise: Normal<f64>,
}

impl Simulator {
    pub fn new(incident_every: u32, incident_length: u32) -> Self {
        Self {
            co: 3.0,
            pm2_5: 8.0,
            pm10: 15.0,
            index: 0,
            incident_every,
            incident_length,
            // CO sensor heater needs a few cycles
            warmup: 3,
            noise: Normal::new(0.0, 1.0).unwrap_or_else(|_| unreachable!("unit normal is valid")),
        }
    }

    /// The incident active at the current index, if any.
    pub fn incident(&self) -> Option<Incident> {
        if self.incident_every == 0 || self.incident_length == 0 || self.index < self.incident_every {
            return None;
        }

        let cycle = self.index / self.incident_every;
        let offset = self.index % self.incident_every;
        (offset < self.incident_length).then(|| Incident::ALL[(cycle as usize - 1) % Incident::ALL.len()])
    }

    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R, timestamp: OffsetDateTime, day_fraction: f64) -> SensorPayload {
        let incident = self.incident();

        // Mean reverting random walks
        self.co = (self.co + (3.0 - self.co) * 0.2 + self.noise.sample(rng) * 0.8).max(0.0);
        self.pm2_5 = (self.pm2_5 + (8.0 - self.pm2_5) * 0.15 + self.noise.sample(rng) * 1.5).max(0.0);
        self.pm10 = (self.pm10 + (15.0 - self.pm10) * 0.15 + self.noise.sample(rng) * 2.5).max(self.pm2_5);

        let mut temp = simulated_temperature(day_fraction) + self.noise.sample(rng) * 0.3;
        let mut co_mean = self.co;
        let mut co_max = self.co + rng.random_range(0.0..2.0);
        let mut pm2_5 = self.pm2_5;
        let mut pm10 = self.pm10;

        match incident {
            Some(Incident::CoLeak) => {
                co_mean += rng.random_range(150.0..250.0);
                co_max = co_mean + rng.random_range(50.0..120.0);
            }
            Some(Incident::DustBurst) => {
                pm2_5 += rng.random_range(40.0..120.0);
                pm10 = pm2_5 + rng.random_range(60.0..150.0);
            }
            Some(Incident::HeatWave) => {
                temp += rng.random_range(8.0..12.0);
            }
            None => {}
        }

        let payload = SensorPayload {
            timestamp,
            temp: round2(temp),
            pressure: round2(simulated_pressure(day_fraction) + self.noise.sample(rng) * 0.5),
            co_mean: round2(co_mean),
            co_max: round2(co_max.max(co_mean)),
            co_valid: self.index >= self.warmup,
            pm2_5: round2(pm2_5),
            pm10: round2(pm10.max(pm2_5)),
        };

        self.index += 1;

        payload
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
