//! Portfolio project entries

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::frontmatter::string_or_vec;
use super::{FrontMatter, FrontMatterError};

/// Typed view of a project's front-matter
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProjectMeta {
    title: Option<String>,
    description: String,
    role: String,
    #[serde(deserialize_with = "string_or_vec")]
    tags: Vec<String>,
}

/// A portfolio project
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// File name without its markdown extension
    pub slug: String,
    /// File name relative to the projects directory
    pub file_path: String,
    pub title: String,
    pub description: String,
    pub role: String,
    pub tags: Vec<String>,
    /// Raw markdown body
    pub content: String,
}

impl Project {
    /// Build a project from the raw text of `file_path`
    pub fn from_source(file_path: impl Into<String>, source: &str) -> Result<Self, FrontMatterError> {
        let file_path = file_path.into();
        let (fm, body) = FrontMatter::parse(source)?;
        let meta: ProjectMeta = serde_yaml::from_value(serde_yaml::to_value(&fm.data)?)?;

        let slug = slug_for(&file_path);
        Ok(Self {
            title: meta.title.unwrap_or_else(|| slug.clone()),
            slug,
            file_path,
            description: meta.description,
            role: meta.role,
            tags: meta.tags,
            content: body.to_string(),
        })
    }
}

fn slug_for(file_path: &str) -> String {
    let path = Path::new(file_path);
    match path.extension().and_then(|e| e.to_str()) {
        Some("md" | "mdx") => path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
        _ => file_path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_fields() {
        let source = r#"---
title: HyperUI
description: Free Tailwind CSS components
role: Creator
tags:
  - Tailwind CSS
  - Open Source
---
Details.
"#;

        let project = Project::from_source("hyperui.md", source).unwrap();
        assert_eq!(project.slug, "hyperui");
        assert_eq!(project.title, "HyperUI");
        assert_eq!(project.role, "Creator");
        assert_eq!(project.tags, vec!["Tailwind CSS", "Open Source"]);
        assert_eq!(project.content, "Details.\n");
    }

    #[test]
    fn test_single_string_tag_and_defaults() {
        let project = Project::from_source("shop.mdx", "---\ntags: Shopify\n---\n").unwrap();
        assert_eq!(project.slug, "shop");
        assert_eq!(project.title, "shop");
        assert_eq!(project.tags, vec!["Shopify"]);
        assert!(project.description.is_empty());
        assert!(project.role.is_empty());
    }

    #[test]
    fn test_wrong_field_type_fails() {
        let err = Project::from_source("bad.md", "---\ntags:\n  nested: map\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::InvalidYaml(_)));
    }

    #[test]
    fn test_camel_case_json() {
        let project = Project::from_source("a.md", "---\ntitle: A\n---\n").unwrap();
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["filePath"], "a.md");
        assert_eq!(json["slug"], "a");
    }
}
