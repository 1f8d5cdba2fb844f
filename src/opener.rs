//! Filesystem URL opener
//!
//! Opens a filesystem from a `<protocol>://<resource>` URL. The only
//! installed protocol is `git`, whose resource is a repository path:
//! `git:///home/me/project` or `git://relative/path`.

use tracing::debug;

use crate::error::{GitFsError, Result};
use crate::fs::GitFs;

type OpenFn = fn(&ParseResult) -> Result<GitFs>;

static REGISTRY: &[(&str, OpenFn)] = &[("git", open_git)];

/// Components of a filesystem URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    pub protocol: String,
    pub resource: String,
}

/// Splits a URL into protocol and resource.
pub fn parse(fs_url: &str) -> Result<ParseResult> {
    let (protocol, resource) = fs_url
        .split_once("://")
        .ok_or_else(|| GitFsError::InvalidUrl(fs_url.to_string()))?;

    if protocol.is_empty() || !protocol.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(GitFsError::InvalidUrl(fs_url.to_string()));
    }

    Ok(ParseResult {
        protocol: protocol.to_ascii_lowercase(),
        resource: resource.to_string(),
    })
}

/// Protocols with an installed opener.
pub fn protocols() -> Vec<&'static str> {
    REGISTRY.iter().map(|(protocol, _)| *protocol).collect()
}

/// Opens the filesystem a URL refers to.
///
/// # Errors
/// * `InvalidUrl` - If the URL has no `protocol://` prefix
/// * `UnsupportedProtocol` - If no opener is installed for the protocol
pub fn open_fs(fs_url: &str) -> Result<GitFs> {
    let parsed = parse(fs_url)?;
    let (_, open) = REGISTRY
        .iter()
        .find(|(protocol, _)| *protocol == parsed.protocol)
        .ok_or_else(|| GitFsError::UnsupportedProtocol(parsed.protocol.clone()))?;
    debug!("opening {} with the {} opener", parsed.resource, parsed.protocol);
    open(&parsed)
}

fn open_git(parsed: &ParseResult) -> Result<GitFs> {
    GitFs::open(&parsed.resource)
}
