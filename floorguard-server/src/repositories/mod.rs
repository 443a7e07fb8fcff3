mod alert;
mod metric;
mod sensor_reading;
mod ventilation;

pub use alert::AlertRepository;
pub use metric::MetricRepository;
pub use sensor_reading::SensorReadingRepository;
pub use ventilation::VentilationRepository;
