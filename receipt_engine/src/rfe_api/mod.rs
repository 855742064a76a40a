pub mod errors;
pub mod flow_objects;
pub mod receipt_flow_api;
