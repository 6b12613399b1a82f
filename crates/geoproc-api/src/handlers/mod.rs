mod health;
mod operations;
mod process;

pub use health::health_check;
pub use operations::list_operations;
pub use process::handle_process;
