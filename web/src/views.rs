//! The views routes point at. Their rendering lives outside this crate; a
//! route only needs to name which one to mount.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Dashboard,
    Inventory,
    Shipments,
}

impl View {
    /// Component name the rendering layer registers the view under.
    pub fn component(self) -> &'static str {
        match self {
            View::Dashboard => "DashboardView",
            View::Inventory => "InventoryView",
            View::Shipments => "ShipmentsView",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component())
    }
}
