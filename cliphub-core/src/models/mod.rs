pub mod comment;
pub mod id;
pub mod user;
pub mod video;

pub use comment::Comment;
pub use id::{generate_id, CommentId, UserId, VideoId};
pub use user::User;
pub use video::{UploadRequest, Video};
