//! Client-side route table.
//!
//! # Design
//! The table is built once at startup and never mutated. Locations use
//! path-based history rooted at a base path fixed at build time through the
//! `BASE_URL` environment variable. A location that matches no route resolves
//! to `None` and is logged, leaving the fallback to the rendering layer.

use std::collections::HashSet;

use thiserror::Error;

use crate::views::View;

/// Base path baked in at compile time.
pub const BUILD_BASE: &str = match option_env!("BASE_URL") {
    Some(base) => base,
    None => "/",
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub name: String,
    pub view: View,
}

impl Route {
    pub fn new(path: &str, name: &str, view: View) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            view,
        }
    }
}

/// How locations map onto the address bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryMode {
    /// Plain paths under `base`, which always starts and ends with `/`.
    Web { base: String },
}

impl HistoryMode {
    pub fn web(base: &str) -> Self {
        HistoryMode::Web {
            base: normalize_base(base),
        }
    }

    pub fn base(&self) -> &str {
        match self {
            HistoryMode::Web { base } => base,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("duplicate route path: {0}")]
    DuplicatePath(String),
    #[error("duplicate route name: {0}")]
    DuplicateName(String),
    #[error("no route named {0}")]
    UnknownName(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterTable {
    history: HistoryMode,
    routes: Vec<Route>,
}

/// `/` → dashboard, `/inventory` → inventory, `/shipments` → shipments.
pub fn default_routes() -> Vec<Route> {
    vec![
        Route::new("/", "dashboard", View::Dashboard),
        Route::new("/inventory", "inventory", View::Inventory),
        Route::new("/shipments", "shipments", View::Shipments),
    ]
}

impl RouterTable {
    /// Build a table from `routes` in order. Paths and names must be unique.
    pub fn new(history: HistoryMode, routes: Vec<Route>) -> Result<Self, RouteError> {
        let mut paths = HashSet::new();
        let mut names = HashSet::new();
        for route in &routes {
            if !paths.insert(route.path.as_str()) {
                return Err(RouteError::DuplicatePath(route.path.clone()));
            }
            if !names.insert(route.name.as_str()) {
                return Err(RouteError::DuplicateName(route.name.clone()));
            }
        }
        Ok(Self { history, routes })
    }

    /// The application's table under `base`.
    pub fn with_base(base: &str) -> Self {
        Self {
            history: HistoryMode::web(base),
            routes: default_routes(),
        }
    }

    /// The application's table under the build-time base path.
    pub fn app() -> Self {
        Self::with_base(BUILD_BASE)
    }

    pub fn history(&self) -> &HistoryMode {
        &self.history
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Match a location (as found in the address bar, base included).
    pub fn resolve(&self, location: &str) -> Option<&Route> {
        let resolved = self
            .route_path(location)
            .and_then(|path| self.routes.iter().find(|route| route.path == path));
        if resolved.is_none() {
            tracing::warn!(location, base = self.history.base(), "no route matches location");
        }
        resolved
    }

    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name == name)
    }

    /// Full location for the named route, base included.
    pub fn href(&self, name: &str) -> Result<String, RouteError> {
        let route = self
            .by_name(name)
            .ok_or_else(|| RouteError::UnknownName(name.to_string()))?;
        Ok(format!(
            "{}{}",
            self.history.base(),
            route.path.trim_start_matches('/')
        ))
    }

    /// Strip query, fragment and base; `None` when outside the base.
    fn route_path(&self, location: &str) -> Option<String> {
        let end = location.find(['?', '#']).unwrap_or(location.len());
        let location = &location[..end];

        let base = self.history.base();
        let rest = match location.strip_prefix(base) {
            Some(rest) => rest,
            None if location == base.trim_end_matches('/') => "",
            None => return None,
        };

        let trimmed = rest.trim_end_matches('/');
        Some(format!("/{trimmed}"))
    }
}

fn normalize_base(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}
