/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Hand the per-request AuthCtx to guards and handlers
 * - axum glue lives in core, the type itself in types
 */

mod core;
mod types;

pub use types::AuthCtx;
