pub mod acquirer;
pub mod configuration;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod resolver;
pub mod routes;
pub mod startup;
pub mod state;
pub mod telemetry;
