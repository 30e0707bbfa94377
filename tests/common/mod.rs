//! Shared test utilities for E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     if git_missing() {
//!         return;
//!     }
//!     let fixture = TestFixture::new();
//!     let url = fixture.source_repo("alpha");
//!     fixture.write_list(&[&url]);
//!     fixture.command().arg("clone").args(fixture.clone_args()).assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use clone_repos::exit_codes;

    #[allow(unused_imports)]
    pub use super::git_output;
    pub use super::TestFixture;
    #[allow(unused_imports)]
    pub use super::git_missing;
    #[allow(unused_imports)]
    pub use super::serve_dumb_http;
}

/// `true` (with a note on stderr) when no `git` executable is available.
pub fn git_missing() -> bool {
    let missing = !clone_repos::git::is_available();
    if missing {
        eprintln!("git not available, skipping");
    }
    missing
}

/// Run `git -C <dir> <args>` and return trimmed stdout, panicking on failure.
pub fn git_output(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Serve the files under `root` over HTTP on 127.0.0.1 and return the base
/// URL. Enough for git's dumb HTTP transport.
///
/// With `basic_auth` (base64 `user:password`) every request without that
/// `Authorization` header gets a 401 challenge.
pub fn serve_dumb_http(root: &Path, basic_auth: Option<&str>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test server");
    let address = listener.local_addr().expect("Failed to read server address");
    let root = root.to_path_buf();
    let expected = basic_auth.map(|token| format!("Basic {}", token));

    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let _ = respond(stream, &root, expected.as_deref());
        }
    });

    format!("http://{}", address)
}

fn respond(mut stream: TcpStream, root: &Path, expected: Option<&str>) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    let mut authorized = expected.is_none();
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 || header.trim().is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.eq_ignore_ascii_case("authorization") && Some(value.trim()) == expected {
                authorized = true;
            }
        }
    }

    if !authorized {
        return stream.write_all(
            b"HTTP/1.1 401 Unauthorized\r\n\
              WWW-Authenticate: Basic realm=\"git\"\r\n\
              Content-Length: 0\r\n\
              Connection: close\r\n\r\n",
        );
    }

    let target = request_line.split_whitespace().nth(1).unwrap_or("/");
    let target = target.split('?').next().unwrap_or(target);
    match fs::read(root.join(target.trim_start_matches('/'))) {
        Ok(body) => {
            write!(
                stream,
                "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            )?;
            stream.write_all(&body)
        }
        Err(_) => stream.write_all(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        ),
    }
}

/// A temporary workspace with a repo list, local source repositories and an
/// output directory.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Path of the repo list file.
    pub fn list_path(&self) -> PathBuf {
        self.path().join("repos.txt")
    }

    /// Path of the clone output directory.
    pub fn out_dir(&self) -> PathBuf {
        self.path().join("out")
    }

    /// Write the repo list file verbatim.
    pub fn write_list_raw(&self, contents: &str) {
        self.temp_dir
            .child("repos.txt")
            .write_str(contents)
            .expect("Failed to write repo list");
    }

    /// Write the repo list file, one URL per line.
    pub fn write_list(&self, urls: &[&str]) {
        let mut contents = String::from("# repositories to clone\n");
        for url in urls {
            contents.push_str(url);
            contents.push('\n');
        }
        self.write_list_raw(&contents);
    }

    /// Create a source repository with one commit at `sources/<name>.git`
    /// and return its `file://` URL.
    pub fn source_repo(&self, name: &str) -> String {
        let dir = self.path().join("sources").join(format!("{}.git", name));
        std::fs::create_dir_all(&dir).expect("Failed to create source dir");
        git_output(&dir, &["init", "--quiet"]);
        git_output(
            &dir,
            &[
                "-c",
                "user.name=Test",
                "-c",
                "user.email=test@example.com",
                "commit",
                "--quiet",
                "--allow-empty",
                "-m",
                "initial",
            ],
        );
        format!("file://{}", dir.display())
    }

    /// Create a bare copy of a fresh source repository at `http/<name>.git`,
    /// ready for dumb HTTP, and return the `http` directory.
    pub fn http_root(&self, name: &str) -> PathBuf {
        let source = self.source_repo(name);
        let root = self.path().join("http");
        let bare = root.join(format!("{}.git", name));
        std::fs::create_dir_all(&root).expect("Failed to create http root");
        git_output(
            &root,
            &["clone", "--bare", "--quiet", &source, &bare.display().to_string()],
        );
        git_output(&bare, &["update-server-info"]);
        root
    }

    /// `--in <list> --out <out>` arguments for the clone command.
    pub fn clone_args(&self) -> Vec<String> {
        vec![
            "--in".to_string(),
            self.list_path().display().to_string(),
            "--out".to_string(),
            self.out_dir().display().to_string(),
        ]
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("clone-repos");
        cmd.current_dir(self.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("CLONE_REPOS_LOG")
            .env_remove("CLONE_REPOS_USER")
            .env_remove("CLONE_REPOS_PASS")
            .env("NO_PROXY", "127.0.0.1")
            .env("no_proxy", "127.0.0.1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
