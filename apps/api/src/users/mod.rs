// User accounts over the remote table: CRUD relays, signup and login.
// All remote calls go through table_client; nothing here speaks HTTP outbound.

pub mod accounts;
pub mod dto;
pub mod handlers;
pub mod validation;
