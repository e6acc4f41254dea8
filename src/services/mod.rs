pub mod loader_service;
pub mod projection_service;
pub mod chart_service;
