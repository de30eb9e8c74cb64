pub mod convert_controller;
pub mod static_controller;
pub mod system_controller;
