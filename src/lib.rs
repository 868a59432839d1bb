pub mod annotations;
pub mod colors;
pub mod renderer;
pub mod routes;
pub mod server;
pub mod telemetry;

pub mod app;
pub mod config;

pub use app::start_app;
