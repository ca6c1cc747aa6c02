mod manifest;

pub use manifest::PackageManifest;
