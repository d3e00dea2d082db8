//! Service layer.

pub mod category;
pub mod department;
pub mod faculty;
pub mod location;
pub mod media;
pub mod moderation;
pub mod profile;
pub mod submission;

pub use category::CategoryService;
pub use department::{DepartmentInput, DepartmentService};
pub use faculty::FacultyService;
pub use location::{LocationDetail, LocationService, LocationSummary};
pub use media::{UploadedImage, validate_logo, validate_photo};
pub use moderation::ModerationService;
pub use profile::{ProfileService, UpdateProfileInput};
pub use submission::{SubmissionService, SubmissionStatus, SubmitLocationInput};
