pub mod appium;
pub mod devices;
pub mod scaffold;

pub use appium::AppiumClient;
