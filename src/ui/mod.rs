//! Presentation widgets shared by the CLI views and the web dashboard.

pub mod confirm;
pub mod nav;
pub mod select;
pub mod table;
pub mod toast;
