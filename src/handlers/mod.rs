pub mod forms;
pub mod menu;
