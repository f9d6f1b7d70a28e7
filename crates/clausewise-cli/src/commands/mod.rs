//! Command implementations.

pub mod analyze;
pub mod detect;
pub mod extract;

pub use self::analyze::execute_analyze;
pub use self::detect::execute_detect_type;
pub use self::extract::execute_extract;
