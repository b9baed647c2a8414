pub mod account;
pub mod device;
pub mod social;
pub mod user;
