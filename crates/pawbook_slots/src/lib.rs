// --- File: crates/pawbook_slots/src/lib.rs ---
// Declare modules within this crate
pub mod auth;
pub mod doc;
pub mod handlers;
pub mod logic;
pub mod routes;

pub use handlers::SlotsState;
pub use routes::routes;
