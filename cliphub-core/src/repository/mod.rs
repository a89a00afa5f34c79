pub mod comment;
pub mod user;
pub mod video;

pub use comment::{CommentRepository, PgCommentRepository};
pub use user::{PgUserRepository, UserRepository};
pub use video::{PgVideoRepository, VideoRepository};
