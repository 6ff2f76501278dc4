pub mod dispatcher;
pub mod prompt;
pub mod resolver;
