//! Configuration module

mod site;

pub use site::ApiConfig;
pub use site::ListingConfig;
pub use site::NavItem;
pub use site::ServerConfig;
pub use site::SiteConfig;
pub use site::ACCESS_TOKEN_ENV;
