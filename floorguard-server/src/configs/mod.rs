mod schema;
mod settings;
mod storage;

pub use schema::SchemaManager;
pub use settings::{Database, Gateway, GatewayTopic, Logger, Server, Settings};
pub use storage::Storage;
