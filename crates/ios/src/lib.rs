mod platform;
mod plist;

pub use platform::IosPlatform;
