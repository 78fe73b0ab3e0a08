//! Page-level state shared by every front-end.

pub mod state;
