mod gradle;
mod manifest_xml;
mod platform;

pub use platform::AndroidPlatform;
