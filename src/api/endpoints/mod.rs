pub mod health;
pub mod patients;
pub mod specialists;
pub mod upload;
