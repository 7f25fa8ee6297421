//! Front-end shell for the food supply chain inventory app.
//!
//! Holds the client-side route table and the context that hands views the
//! shared `inventory_core::ApiClient`. The two are independent: routing never
//! touches the network and the client knows nothing about routes.

pub mod app;
pub mod router;
pub mod views;

pub use app::AppContext;
pub use router::{default_routes, HistoryMode, Route, RouteError, RouterTable, BUILD_BASE};
pub use views::View;
