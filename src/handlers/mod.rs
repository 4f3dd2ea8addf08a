//! Handler modules for the Lambda functions

pub mod accounts;
pub mod audit;
pub mod events;
pub mod greeting;
pub mod messages;
pub mod reservations;
pub mod tables;
pub mod uuid_batch;
pub mod weather;

// Re-export handler functions for convenience
pub use accounts::{handle_sign_in, handle_sign_up};
pub use audit::handle_audit_stream;
pub use events::handle_create_event;
pub use greeting::handle_greeting;
pub use messages::{handle_sns_messages, handle_sqs_messages};
pub use reservations::{handle_create_reservation, handle_list_reservations};
pub use tables::{handle_create_table, handle_get_table, handle_list_tables};
pub use uuid_batch::handle_uuid_batch;
pub use weather::{handle_current_weather, handle_store_weather};
