pub mod create_comment;
pub mod create_post;
pub mod get_post;
pub mod list_comments;
pub mod list_posts;
