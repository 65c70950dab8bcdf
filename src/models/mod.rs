pub mod catalog;
pub mod formats;
pub mod responses;
