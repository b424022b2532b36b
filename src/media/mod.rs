//! Media module for post representation, media kinds and metadata parsing.

pub mod kind;
pub mod parser;
pub mod post;

pub use kind::MediaKind;
pub use parser::{collect_posts, parse_post_metadata, CollectedPosts};
pub use post::Post;
