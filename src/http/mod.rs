pub mod env;
pub mod error;
pub mod macros;
pub mod params;
pub mod protocol;
pub mod req;
pub mod res;
pub mod router;
pub mod sink;
pub mod types;
