// Hint parsers: chart descriptions and processing instructions

pub mod ast;
pub mod description;
pub mod mode;

// Public API re-exports
pub use ast::{ChartFamily, ChartRequest, ProcessingMode};
pub use description::parse_description;
pub use mode::parse_mode;
