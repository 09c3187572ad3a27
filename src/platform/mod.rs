mod error;
pub mod instagram;

pub use error::PlatformError;
pub use instagram::PlatformInstagram;
