/*
 * Responsibility
 * - Public entry points of the middleware layers
 * - auth: bearer flow (access) and route guards (guard)
 * - validate: per-route request validation
 * - cors / http / errors: router-wide plumbing
 */
pub mod auth;
pub mod cors;
pub mod errors;
pub mod http;
pub mod validate;
