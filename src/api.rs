//! Booking API entry point: route, run the operation, format the envelope.

use lambda_http::{Body, Request, Response};
use serde_json::Value;
use tracing::{error, info};

use crate::config::Collections;
use crate::error::{ApiError, Result};
use crate::handlers::{
    handle_create_reservation, handle_create_table, handle_get_table, handle_list_reservations,
    handle_list_tables, handle_sign_in, handle_sign_up,
};
use crate::http::{api_error_response, json_response, normalize_path, parse_json_body};
use crate::identity::IdentityProvider;
use crate::router::{Operation, RouteMatch, resolve};
use crate::store::DocumentStore;

/// Long-lived state of the booking function: clients and configuration.
pub struct BookingApi<S, I> {
    store: S,
    identity: I,
    collections: Collections,
    api_stage: Option<String>,
}

impl<S: DocumentStore, I: IdentityProvider> BookingApi<S, I> {
    pub fn new(store: S, identity: I, collections: Collections) -> Self {
        Self { store, identity, collections, api_stage: None }
    }

    /// Strip `/{stage}` from incoming paths before routing.
    pub fn with_api_stage(mut self, stage: Option<String>) -> Self {
        self.api_stage = stage;
        self
    }

    /// Handle one request. Every outcome, including failures, is returned as
    /// a formatted response.
    pub async fn handle(&self, event: &Request) -> Response<Body> {
        let method = event.method().as_str();
        let path = normalize_path(event.uri().path(), self.api_stage.as_deref());

        let Some(route) = resolve(method, path) else {
            info!(method, path, "Unsupported route");
            return api_error_response(&ApiError::UnsupportedRoute);
        };

        let operation = route.operation;
        match self.dispatch(route, event.body()).await {
            Ok(payload) => json_response(200, &payload),
            Err(e) => {
                error!(?operation, error = %e, "Operation failed");
                api_error_response(&e)
            }
        }
    }

    async fn dispatch(&self, route: RouteMatch, body: &Body) -> Result<Value> {
        let collections = &self.collections;
        match route.operation {
            Operation::SignUp => handle_sign_up(parse_json_body(body)?, &self.identity).await,
            Operation::SignIn => handle_sign_in(parse_json_body(body)?, &self.identity).await,
            Operation::CreateTable => handle_create_table(parse_json_body(body)?, &self.store, &collections.tables).await,
            Operation::ListTables => handle_list_tables(&self.store, &collections.tables).await,
            Operation::GetTable => {
                let table_id = route
                    .param("tableId")
                    .ok_or_else(|| ApiError::validation("Missing table id"))?;
                handle_get_table(table_id, &self.store, &collections.tables).await
            }
            Operation::CreateReservation => {
                handle_create_reservation(parse_json_body(body)?, &self.store, collections).await
            }
            Operation::ListReservations => handle_list_reservations(&self.store, &collections.reservations).await,
        }
    }
}
