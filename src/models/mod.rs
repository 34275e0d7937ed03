pub mod country;
pub mod weather;
