pub mod changesets;
pub mod client;
pub mod models;
