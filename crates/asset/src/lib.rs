pub mod register;
pub mod steps;

pub use register::register_steps;
pub use steps::CacheImagesStep;
