// Public modules
pub mod error;
pub mod inputs;
pub mod scaffold;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use inputs::{FieldInputs, FixedInputs, InputField, InputSource};
