//! List site content

use anyhow::Result;

use crate::content::{PostRecord, Project};
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str, json: bool) -> Result<()> {
    let output = render(folio, content_type, json)?;
    print!("{}", output);
    Ok(())
}

/// Collect `content_type` and format it for the terminal
pub fn render(folio: &Folio, content_type: &str, json: bool) -> Result<String> {
    match content_type {
        "post" | "posts" => {
            let posts = folio.posts()?;
            if json {
                Ok(serde_json::to_string_pretty(&posts)? + "\n")
            } else {
                Ok(format_posts(&posts))
            }
        }
        "project" | "projects" => {
            let projects = folio.projects()?;
            if json {
                Ok(serde_json::to_string_pretty(&projects)? + "\n")
            } else {
                Ok(format_projects(&projects))
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: posts, projects",
                content_type
            );
        }
    }
}

fn format_posts(posts: &[PostRecord]) -> String {
    let mut out = format!("Posts ({}):\n", posts.len());
    for post in posts {
        out.push_str(&format!(
            "  {:<10}  {} [{}]\n",
            post.date().unwrap_or("-"),
            post.title().unwrap_or("Untitled"),
            post.file_path
        ));
    }
    out
}

fn format_projects(projects: &[Project]) -> String {
    let mut out = format!("Projects ({}):\n", projects.len());
    for project in projects {
        out.push_str(&format!("  {}", project.title));
        if !project.role.is_empty() {
            out.push_str(&format!(" - {}", project.role));
        }
        if !project.tags.is_empty() {
            out.push_str(&format!(" ({})", project.tags.join(", ")));
        }
        out.push_str(&format!(" [{}]\n", project.slug));
    }
    out
}
