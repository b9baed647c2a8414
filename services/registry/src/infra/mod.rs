pub mod db;
pub mod geoip;
