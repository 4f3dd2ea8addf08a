//! Static route table for the booking API.
//!
//! Routes are plain data: adding an endpoint means adding a row to [`ROUTES`]
//! and an arm to the dispatcher in [`crate::api`].

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SignUp,
    SignIn,
    CreateTable,
    ListTables,
    GetTable,
    CreateReservation,
    ListReservations,
}

#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub method: &'static str,
    /// Resource path; `{name}` segments capture a path parameter
    pub pattern: &'static str,
    pub operation: Operation,
}

pub const ROUTES: &[Route] = &[
    Route { method: "POST", pattern: "/signup", operation: Operation::SignUp },
    Route { method: "POST", pattern: "/signin", operation: Operation::SignIn },
    Route { method: "POST", pattern: "/tables", operation: Operation::CreateTable },
    Route { method: "GET", pattern: "/tables", operation: Operation::ListTables },
    Route { method: "GET", pattern: "/tables/{tableId}", operation: Operation::GetTable },
    Route { method: "POST", pattern: "/reservations", operation: Operation::CreateReservation },
    Route { method: "GET", pattern: "/reservations", operation: Operation::ListReservations },
];

/// A resolved route with its captured path parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub operation: Operation,
    pub params: HashMap<String, String>,
}

impl RouteMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Find the operation for `method` and an already-normalized `path`.
pub fn resolve(method: &str, path: &str) -> Option<RouteMatch> {
    ROUTES
        .iter()
        .filter(|route| route.method.eq_ignore_ascii_case(method))
        .find_map(|route| {
            match_pattern(route.pattern, path).map(|params| RouteMatch { operation: route.operation, params })
        })
}

fn match_pattern(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let mut pattern_segments = pattern.split('/').filter(|s| !s.is_empty());
    let mut path_segments = path.split('/').filter(|s| !s.is_empty());
    let mut params = HashMap::new();

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return Some(params),
            (Some(expected), Some(actual)) => {
                if let Some(name) = expected.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    params.insert(name.to_string(), actual.to_string());
                } else if expected != actual {
                    return None;
                }
            }
            _ => return None,
        }
    }
}
