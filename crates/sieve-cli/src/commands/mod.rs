//! Command implementations.

pub mod annotators;
pub mod close;
pub mod rules;
pub mod run;

pub use self::annotators::execute_annotators;
pub use self::close::execute_close;
pub use self::rules::execute_rules;
pub use self::run::execute_run;
