pub mod readme_oss;
pub mod scheduler;
