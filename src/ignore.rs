use ::ignore::gitignore::{Gitignore, GitignoreBuilder};
use ::ignore::WalkBuilder;
use std::path::{Path, PathBuf};

pub struct IgnoreFilter {
    inner: Gitignore,
}

impl IgnoreFilter {
    pub fn new(root: &Path, extra_excludes: &[String]) -> Self {
        let mut builder = GitignoreBuilder::new(root);

        // 1. Project ignore files
        builder.add(root.join(".gitignore"));
        builder.add(root.join(".ignore"));

        // 2. Dependency, build and tooling directories
        let defaults = [
            "target/", "node_modules/", "venv/", ".venv/", "vendor/", "dist/", "build/", "out/",
            "coverage/", "__pycache__/", ".git/", ".vscode/", ".idea/", "*.min.js",
        ];
        for pattern in defaults {
            builder.add_line(None, pattern).ok();
        }

        // 3. Config excludes
        for pattern in extra_excludes {
            if let Err(e) = builder.add_line(None, pattern) {
                tracing::warn!(pattern = %pattern, error = %e, "invalid exclude pattern");
            }
        }

        Self {
            inner: builder.build().unwrap_or_else(|_| Gitignore::empty()),
        }
    }

    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        self.inner.matched(path, is_dir).is_ignore()
    }
}

/// All non-ignored files under `root`, in walk order
pub fn walk_files(root: &Path, extra_excludes: &[String]) -> Vec<PathBuf> {
    let filter = IgnoreFilter::new(root, extra_excludes);
    WalkBuilder::new(root)
        .require_git(false)
        .sort_by_file_path(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            !filter.is_ignored(entry.path(), is_dir)
        })
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .map(|entry| entry.into_path())
        .collect()
}
