//! Configuration module

mod site;

pub use site::ClockConfig;
pub use site::HighlightConfig;
pub use site::Layout;
pub use site::SearchConfig;
pub use site::SiteConfig;
