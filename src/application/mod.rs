pub mod builder;
pub mod dto;
pub mod ports;
pub mod reclaim;
pub mod use_cases;
