mod client;
mod defect;
mod effort;
mod employee;
mod ids;
mod process;
mod project;
mod time_row;

pub use client::*;
pub use defect::*;
pub use effort::*;
pub use employee::*;
pub use ids::*;
pub use process::*;
pub use project::*;
pub use time_row::*;
