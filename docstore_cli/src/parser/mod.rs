pub mod command;
pub mod parser;

pub use command::Command;
pub use parser::parse;
