//! Validation rule sets, one per validated route.
use crate::services::validation::{JsonKind, Shape, ValidationRule};

/// `PATCH /users/{username}/active`: the body may only target the user in the path.
pub fn users_patch_active() -> ValidationRule {
    ValidationRule::new(
        "users/patchActive",
        Shape::new()
            .required("params.username", JsonKind::String)
            .required("body.id", JsonKind::String)
            .required("body.active", JsonKind::Boolean),
    )
    .must_match("params.username", "body.id")
}
