pub mod catalog;
pub mod control;
pub mod router;
pub mod session;
pub mod state;
pub mod state_store;
pub mod tracker;
