//! Restaurant table booking functions and their companion Lambda handlers.

pub mod api;
pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod identity;
pub mod models;
pub mod objects;
pub mod open_meteo;
pub mod router;
pub mod slots;
pub mod store;
pub mod triggers;

#[cfg(test)]
mod testing;
