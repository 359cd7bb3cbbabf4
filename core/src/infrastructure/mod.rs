pub mod detector;
pub mod forecast;
pub mod nutrition;
