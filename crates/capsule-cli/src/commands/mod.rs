pub mod context;
pub mod mutate;
pub mod read;
