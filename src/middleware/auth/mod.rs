pub mod access;
pub mod guard;

pub use guard::Guard;
