//! Database entities.

pub mod category;
pub mod department;
pub mod faculty;
pub mod image;
pub mod location;
pub mod location_request;
pub mod site_profile;

pub use category::Entity as Category;
pub use department::Entity as Department;
pub use faculty::Entity as Faculty;
pub use image::Entity as Image;
pub use location::Entity as Location;
pub use location_request::Entity as LocationRequest;
pub use site_profile::Entity as SiteProfile;
