//! Plotly charts and HTML pages for the BI dashboard.

mod charts;
mod page;

pub use charts::*;
pub use page::*;

/// Corporate palette, darkest first.
pub mod palette {
    pub const NAVY: &str = "#194056";
    pub const CYAN: &str = "#00B5E2";
    pub const SLATE: &str = "#7D8E95";
    pub const MIST: &str = "#C0CACE";
    pub const ALERT: &str = "#FF2E63";
    pub const NAVY_FILL: &str = "rgba(25, 64, 86, 0.3)";
}
