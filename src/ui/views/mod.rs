pub mod parse;
pub mod watch;
