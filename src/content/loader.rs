//! Content loader - collects posts and projects from their directories
//!
//! Every call re-reads the directory; nothing is cached between calls.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{CollectError, FrontMatterError, PostOrder, PostRecord, Project};
use crate::Folio;

/// Loads content from the site's content directories
pub struct ContentLoader<'a> {
    folio: &'a Folio,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(folio: &'a Folio) -> Self {
        Self { folio }
    }

    /// Load all posts, ordered by the configured post order
    pub fn load_posts(&self) -> Result<Vec<PostRecord>, CollectError> {
        collect_posts(&self.folio.posts_dir, self.folio.config.post_order)
    }

    /// Load all projects in file name order
    pub fn load_projects(&self) -> Result<Vec<Project>, CollectError> {
        collect_projects(&self.folio.projects_dir)
    }
}

/// Collect every markdown file in `dir` as a post, then sort with `order`
pub fn collect_posts(dir: &Path, order: PostOrder) -> Result<Vec<PostRecord>, CollectError> {
    let mut posts = collect(dir, PostRecord::from_source)?;
    order.sort(&mut posts);

    tracing::info!("Collected {} posts from {:?}", posts.len(), dir);
    Ok(posts)
}

/// Collect every markdown file in `dir` as a project
pub fn collect_projects(dir: &Path) -> Result<Vec<Project>, CollectError> {
    let projects = collect(dir, Project::from_source)?;

    tracing::info!("Collected {} projects from {:?}", projects.len(), dir);
    Ok(projects)
}

/// Markdown files directly inside `dir`, sorted by file name
pub fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>, CollectError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            CollectError::io(path, e.into())
        })?;

        if entry.file_type().is_file() && is_markdown_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn collect<T, F>(dir: &Path, parse: F) -> Result<Vec<T>, CollectError>
where
    F: Fn(String, &str) -> Result<T, FrontMatterError>,
{
    let files = markdown_files(dir)?;
    let mut items = Vec::with_capacity(files.len());

    for path in files {
        let bytes = fs::read(&path).map_err(|e| CollectError::io(&path, e))?;
        // Invalid UTF-8 becomes U+FFFD rather than failing the collection
        let source = String::from_utf8_lossy(&bytes);
        let file_path = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let item = parse(file_path, &*source).map_err(|e| CollectError::parse(&path, e))?;
        tracing::debug!("Loaded {:?}", path);
        items.push(item);
    }

    Ok(items)
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "mdx")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn post_source(date: &str) -> String {
        format!("---\ntitle: Post from {date}\ndate: {date}\n---\nBody of {date}.\n")
    }

    #[test]
    fn test_collects_one_record_per_file() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "first.md", &post_source("2023-01-01"));
        write(tmp.path(), "second.mdx", &post_source("2023-06-01"));
        write(tmp.path(), "third.md", &post_source("2022-01-01"));

        let posts = collect_posts(tmp.path(), PostOrder::Legacy).unwrap();

        assert_eq!(posts.len(), 3);
        let mut names: Vec<&str> = posts.iter().map(|p| p.file_path.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["first.md", "second.mdx", "third.md"]);

        let first = posts.iter().find(|p| p.file_path == "first.md").unwrap();
        assert_eq!(first.title(), Some("Post from 2023-01-01"));
        assert_eq!(first.content, "Body of 2023-01-01.\n");
    }

    #[test]
    fn test_legacy_order_on_disk() {
        let tmp = TempDir::new().unwrap();
        // Enumeration is by file name, so a/b/c fix the input order
        write(tmp.path(), "a.md", &post_source("2023-01-01"));
        write(tmp.path(), "b.md", &post_source("2023-06-01"));
        write(tmp.path(), "c.md", &post_source("2022-01-01"));

        let posts = collect_posts(tmp.path(), PostOrder::Legacy).unwrap();
        let dates: Vec<_> = posts.iter().map(|p| p.date().unwrap()).collect();
        assert_eq!(dates, vec!["2023-06-01", "2023-01-01", "2022-01-01"]);
    }

    #[test]
    fn test_empty_directory() {
        let tmp = TempDir::new().unwrap();
        let posts = collect_posts(tmp.path(), PostOrder::Legacy).unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_skips_non_markdown_and_subdirectories() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "post.md", &post_source("2023-01-01"));
        write(tmp.path(), "notes.txt", "not a post");
        write(tmp.path(), "README", "no extension");
        fs::create_dir(tmp.path().join("nested.md")).unwrap();
        write(&tmp.path().join("nested.md"), "deep.md", &post_source("2020-01-01"));

        let files = markdown_files(tmp.path()).unwrap();
        assert_eq!(files, vec![tmp.path().join("post.md")]);
    }

    #[test]
    fn test_malformed_front_matter_fails_whole_collection() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "good.md", &post_source("2023-01-01"));
        write(tmp.path(), "broken.md", "---\ntitle: Never closed\n\nBody\n");

        let err = collect_posts(tmp.path(), PostOrder::Legacy).unwrap_err();
        assert!(matches!(
            err,
            CollectError::Parse {
                source: FrontMatterError::Unclosed,
                ..
            }
        ));
        assert_eq!(err.path(), tmp.path().join("broken.md"));
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = collect_posts(&tmp.path().join("missing"), PostOrder::Legacy).unwrap_err();
        assert!(matches!(err, CollectError::Io { .. }));
    }

    #[test]
    fn test_non_utf8_file_is_decoded_lossily() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("latin1.md"),
            b"---\ntitle: Caf\xe9\ndate: 2023-01-01\n---\nCaf\xe9 au lait\n",
        )
        .unwrap();

        let posts = collect_posts(tmp.path(), PostOrder::Legacy).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title(), Some("Caf\u{FFFD}"));
        assert_eq!(posts[0].date(), Some("2023-01-01"));
        assert_eq!(posts[0].content, "Caf\u{FFFD} au lait\n");
    }

    #[test]
    fn test_unreadable_entry_is_io_error() {
        let tmp = TempDir::new().unwrap();
        // A dangling symlink is listed but cannot be read
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(tmp.path().join("gone.md"), tmp.path().join("link.md"))
                .unwrap();
            let err = collect_posts(tmp.path(), PostOrder::Legacy).unwrap_err();
            assert!(matches!(err, CollectError::Io { .. }));
        }
    }

    #[test]
    fn test_rereads_directory_each_call() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::with_config(tmp.path(), SiteConfig::default());
        fs::create_dir(&folio.posts_dir).unwrap();

        let loader = ContentLoader::new(&folio);
        assert!(loader.load_posts().unwrap().is_empty());

        write(&folio.posts_dir, "new.md", &post_source("2024-02-02"));
        assert_eq!(loader.load_posts().unwrap().len(), 1);

        fs::remove_file(folio.posts_dir.join("new.md")).unwrap();
        assert!(loader.load_posts().unwrap().is_empty());
    }

    #[test]
    fn test_load_projects() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::with_config(tmp.path(), SiteConfig::default());
        fs::create_dir(&folio.projects_dir).unwrap();
        write(
            &folio.projects_dir,
            "b-shop.md",
            "---\ntitle: Shop\nrole: Developer\ntags: Shopify\n---\n",
        );
        write(
            &folio.projects_dir,
            "a-ui.md",
            "---\ntitle: UI Kit\nrole: Creator\ntags: [Tailwind]\n---\n",
        );

        let projects = ContentLoader::new(&folio).load_projects().unwrap();
        let slugs: Vec<_> = projects.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a-ui", "b-shop"]);
        assert_eq!(projects[1].tags, vec!["Shopify"]);
    }
}
