pub mod catalog;
pub mod deletion;
pub mod engagement;
pub mod session;
pub mod upload;

pub use catalog::CatalogService;
pub use deletion::DeletionService;
pub use engagement::EngagementService;
pub use session::{Session, SessionManager};
pub use upload::UploadService;
