pub mod automated;
pub mod current;
pub mod file_formats;
pub mod general;
pub mod results;
pub mod scenario;
pub mod system;
