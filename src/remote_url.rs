//! URL helpers: local directory names, SSH remote URLs and user name
//! embedding.
//!
//! The string rules here are deliberately literal. `ssh_remote_url` in
//! particular does not parse the URL, it strips one known scheme prefix and
//! rewrites the first `/`.

use url::Url;

use crate::config::Credentials;
use crate::error::{Error, Result};

/// Scheme prefixes removed by [`ssh_remote_url`], checked in this order.
const SCHEME_PREFIXES: [&str; 3] = ["ftp://", "http://", "https://"];

/// Schemes that can carry a `user:password@` userinfo part.
const CREDENTIAL_SCHEMES: [&str; 3] = ["http", "https", "ftp"];

/// Derive the local directory name for a repository URL.
///
/// The name is the last `/`-delimited segment with its `.git` suffix removed:
/// `https://github.com/vnnv/go-epay.git` gives `go-epay`.
pub fn repo_dir_name(url: &str) -> Result<&str> {
    let malformed = |message: &str| Error::MalformedUrl {
        url: url.to_string(),
        message: message.to_string(),
    };

    if url.is_empty() {
        return Err(malformed("empty URL"));
    }

    let segment = url.rsplit('/').next().unwrap_or(url);
    let name = segment
        .strip_suffix(".git")
        .ok_or_else(|| malformed("no .git suffix after the last '/'"))?;

    match name {
        "" => Err(malformed("empty repository name")),
        "." | ".." => Err(malformed("repository name would leave the output directory")),
        _ => Ok(name),
    }
}

/// Rewrite an HTTP(S)/FTP URL into the `user@host:path` SSH form.
///
/// ```
/// use clone_repos::remote_url::ssh_remote_url;
///
/// assert_eq!(
///     ssh_remote_url("https://github.com/vnnv/go-epay.git", "git"),
///     "git@github.com:vnnv/go-epay.git"
/// );
/// ```
pub fn ssh_remote_url(http_url: &str, ssh_user: &str) -> String {
    let rest = SCHEME_PREFIXES
        .iter()
        .find_map(|prefix| http_url.strip_prefix(prefix))
        .unwrap_or(http_url);
    format!("{}@{}", ssh_user, rest.replacen('/', ":", 1))
}

/// Embed the user name of `credentials` into an HTTP(S)/FTP URL.
///
/// The password is never written into the URL. It reaches git through a
/// credential helper instead, see [`crate::git::clone`].
pub fn with_username(url: &str, credentials: &Credentials) -> Result<String> {
    let mut parsed = Url::parse(url)?;
    let rejected = |message: &str| Error::Credentials {
        url: url.to_string(),
        message: message.to_string(),
    };

    if !CREDENTIAL_SCHEMES.contains(&parsed.scheme()) {
        return Err(rejected("only http, https and ftp URLs accept a user and password"));
    }

    parsed
        .set_username(&credentials.user)
        .map_err(|_| rejected("URL cannot carry a user name"))?;
    // A password already present in the list entry would end up in argv
    parsed
        .set_password(None)
        .map_err(|_| rejected("URL cannot carry a password"))?;

    Ok(parsed.into())
}
