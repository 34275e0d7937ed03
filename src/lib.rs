pub mod config;
pub mod handlers;
pub mod models;
pub mod page;
pub mod routes;
pub mod services;
pub mod types;
pub mod utils;

#[cfg(test)]
mod tests;
