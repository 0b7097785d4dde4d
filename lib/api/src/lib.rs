pub mod page;
pub mod rest;

pub use rest::RestApi;
