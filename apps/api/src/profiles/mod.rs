// Profile Store: per-user contact details, merge-upserted on every auth event.

pub mod handlers;
pub mod store;
