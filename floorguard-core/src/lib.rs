pub mod alert;
pub mod classify;
pub mod controller;
pub mod errors;
pub mod evaluator;
pub mod exposure;
pub mod heat;
pub mod models;
pub mod severity;
pub mod thresholds;
pub mod validation;
