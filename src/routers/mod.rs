pub mod error;
pub mod realtime;
