pub mod encoding;
pub mod fastlane;
pub mod files;
pub mod http;
pub mod onesky;
pub mod pipeline;
pub mod twosky;
