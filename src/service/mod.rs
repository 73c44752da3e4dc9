pub mod appointment;
pub mod auth;
pub mod crypto;
pub mod doctor;
pub mod log;
pub mod session;
pub mod upload;
pub mod user;
