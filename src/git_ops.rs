use anyhow::{Context, Result};
use git2::{Commit, ErrorCode, Repository, Signature};
use std::path::{Path, PathBuf};
use tracing::debug;

const REMOTE_NAME: &str = "origin";
const FALLBACK_NAME: &str = "task-tracker";
const FALLBACK_EMAIL: &str = "task-tracker@localhost";

/// Git versioning for a collection file
///
/// When the collection file lives inside a git work tree, each write is
/// committed and the branch is pushed to `origin` when the store is closed.
/// Outside a repository every operation is a no-op.
pub struct GitOps {
    repo: Option<Repository>,
}

impl GitOps {
    /// Create a new GitOps instance by detecting if the path is in a git repository
    pub fn new(file_path: &Path) -> Self {
        let file_dir = if file_path.is_file() {
            file_path.parent().unwrap_or(file_path).to_path_buf()
        } else if file_path.is_dir() {
            file_path.to_path_buf()
        } else {
            // The collection file may not exist yet; look from its directory
            file_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        };

        let repo = Repository::discover(&file_dir).ok();
        if let Some(ref r) = repo {
            debug!(workdir = ?r.workdir(), "collection is under git version control");
        }
        Self { repo }
    }

    /// Check if the file is under git version control
    pub fn is_git_managed(&self) -> bool {
        self.repo.is_some()
    }

    /// Stage the file and commit it with the given message
    pub fn commit(&self, file_path: &Path, message: &str) -> Result<()> {
        let Some(repo) = &self.repo else {
            return Ok(());
        };

        let relative_path = Self::path_in_workdir(repo, file_path)?;
        let mut index = repo.index()?;
        index.add_path(&relative_path)?;
        index.write()?;
        let tree = repo.find_tree(index.write_tree()?)?;

        // The first write into a fresh repository has no parent
        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => None,
            Err(e) => return Err(e).context("Failed to read HEAD"),
        };
        let parents: Vec<&Commit> = parent.iter().collect();

        let signature = Self::signature(repo)?;
        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        debug!(commit_message = message, "committed collection");
        Ok(())
    }

    /// Push the checked-out branch to `origin`
    ///
    /// Returns `false` without contacting anything when there is no `origin`
    /// remote or the branch has no commits yet.
    pub fn push(&self) -> Result<bool> {
        let Some(repo) = &self.repo else {
            return Ok(false);
        };

        let has_origin = repo
            .remotes()?
            .iter()
            .flatten()
            .any(|name| name == REMOTE_NAME);
        if !has_origin {
            return Ok(false);
        }

        let head = match repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch => return Ok(false),
            Err(e) => return Err(e).context("Failed to read HEAD"),
        };
        let refspec = head
            .name()
            .context("HEAD is not a valid UTF-8 reference")?
            .to_string();

        let mut remote = repo.find_remote(REMOTE_NAME)?;
        remote
            .push(&[refspec.as_str()], None)
            .with_context(|| format!("Failed to push {} to {}", refspec, REMOTE_NAME))?;

        debug!(%refspec, "pushed collection history");
        Ok(true)
    }

    /// Path of `file_path` relative to the repository work tree
    fn path_in_workdir(repo: &Repository, file_path: &Path) -> Result<PathBuf> {
        let workdir = repo
            .workdir()
            .context("Repository has no working directory")?
            .canonicalize()
            .context("Failed to resolve repository working directory")?;
        let absolute = file_path
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", file_path.display()))?;
        absolute
            .strip_prefix(&workdir)
            .map(Path::to_path_buf)
            .with_context(|| format!("{} is outside the repository", file_path.display()))
    }

    /// Author from the repository's `user.name`/`user.email`, or a fixed fallback
    fn signature(repo: &Repository) -> Result<Signature<'static>> {
        repo.signature()
            .or_else(|_| Signature::now(FALLBACK_NAME, FALLBACK_EMAIL))
            .context("Failed to create commit signature")
    }
}
