// Upstream module - Veo API client

pub mod client;
