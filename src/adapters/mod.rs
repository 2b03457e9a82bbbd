// Adapters layer: concrete implementations for external systems (http clients, token providers).

pub mod auth;
pub mod http;
