pub mod errors;
pub mod form;
pub mod menu;
pub mod order;
pub mod ports;
pub mod summary;
pub mod validation;
