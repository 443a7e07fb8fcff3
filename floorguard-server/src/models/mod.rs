mod alert;
mod metric;
mod sensor_reading;
mod ventilation_record;

pub use alert::{Alert, AlertTable};
pub use metric::{Metric, MetricTable};
pub use sensor_reading::{SensorReading, SensorReadingTable};
pub use ventilation_record::{VentilationHistoryTable, VentilationRecord};

pub trait Table {
    /// The name of the table
    fn name(&self) -> &'static str;

    /// The SQL statement to create the table
    fn create(&self) -> String;

    /// The SQL statement to dispose the table
    fn dispose(&self) -> String;

    /// The dependencies of the table
    fn dependencies(&self) -> Vec<&'static str>;
}
