pub mod dispatcher;
pub mod writer;
