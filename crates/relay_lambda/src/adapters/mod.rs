pub mod invoke;
pub mod object_store;
