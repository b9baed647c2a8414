pub mod devices;
pub mod rito_accounts;
pub mod social_accounts;
pub mod users;
