mod level;
mod parameter;
mod reading;
mod record;
mod status;
mod ventilation;

pub use level::*;
pub use parameter::*;
pub use reading::*;
pub use record::*;
pub use status::*;
pub use ventilation::*;
