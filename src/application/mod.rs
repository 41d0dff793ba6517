pub mod form_registry;
pub mod menu_provider;
pub mod order_form_service;
pub mod submission;
