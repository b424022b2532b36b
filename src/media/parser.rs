//! Parsing of instaloader metadata documents.

use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::media::post::Post;

/// Top-level metadata document written by instaloader.
#[derive(Debug, Deserialize)]
pub struct MetadataDocument {
    pub node: MetadataNode,
    #[serde(default)]
    pub instaloader: Option<InstaloaderStamp>,
}

/// The structure node of a metadata document.
#[derive(Debug, Deserialize)]
pub struct MetadataNode {
    pub shortcode: Option<String>,
    #[serde(default)]
    pub is_video: bool,
    pub taken_at_timestamp: Option<i64>,
}

/// Version stamp instaloader adds to every document.
#[derive(Debug, Deserialize)]
pub struct InstaloaderStamp {
    pub node_type: Option<String>,
}

/// Parse one metadata document into a post.
///
/// Returns `Ok(None)` for documents that describe something other than a post
/// (the profile document sits next to the post documents).
pub fn parse_post_metadata(content: &str) -> Result<Option<Post>> {
    let doc: MetadataDocument = serde_json::from_str(content)?;

    let is_post = doc
        .instaloader
        .as_ref()
        .and_then(|stamp| stamp.node_type.as_deref())
        .map(|t| t == "Post")
        .unwrap_or(true);

    let shortcode = match doc.node.shortcode {
        Some(code) if is_post && !code.is_empty() => code,
        _ => return Ok(None),
    };

    Ok(Some(Post {
        shortcode,
        is_video: doc.node.is_video,
        taken_at: doc
            .node
            .taken_at_timestamp
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single()),
    }))
}

/// Posts read from a metadata directory, plus the error that stopped the
/// read early, if any.
#[derive(Debug, Default)]
pub struct CollectedPosts {
    /// Newest first.
    pub posts: Vec<Post>,
    pub error: Option<Error>,
}

/// Read the `.json` metadata documents in `dir`, in file name order, and
/// collect the posts newest first.
///
/// An unreadable document stops the read; the posts parsed before it are
/// kept.
pub fn collect_posts(dir: &Path) -> CollectedPosts {
    let mut collected = CollectedPosts::default();

    let mut paths = match json_files(dir) {
        Ok(paths) => paths,
        Err(e) => {
            collected.error = Some(Error::Enumeration(format!(
                "cannot list metadata in {}: {}",
                dir.display(),
                e
            )));
            return collected;
        }
    };
    paths.sort();

    for path in paths {
        let parsed = std::fs::read_to_string(&path)
            .map_err(Error::from)
            .and_then(|content| parse_post_metadata(&content));
        match parsed {
            Ok(Some(post)) => collected.posts.push(post),
            Ok(None) => {}
            Err(e) => {
                collected.error = Some(Error::Enumeration(format!(
                    "unreadable metadata {}: {}",
                    path.display(),
                    e
                )));
                break;
            }
        }
    }

    collected.posts.sort_by(|a, b| b.taken_at.cmp(&a.taken_at));
    collected
}

fn json_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    Ok(paths)
}
