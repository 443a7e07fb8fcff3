mod gateway_service;
mod ingest_service;

pub use gateway_service::*;
pub use ingest_service::*;
