/*
 * Responsibility
 * - Public surface of the HTTP layer (routes() and the extractors handlers use)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod rules;
mod routes;

pub use routes::routes;
