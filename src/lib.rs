pub mod audio;
pub mod config;
pub mod console_interface;
pub mod core;
pub mod driver;
pub mod input;
pub mod models;
pub mod session;
pub mod snapshot;
pub mod store;

#[cfg(test)]
mod test;
