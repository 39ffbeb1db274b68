// src/config/site.rs
// Site content - everything the pages and the assistant prompt know about the owner

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One page section; ids double as anchor targets for navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub recipient: String,
    pub subject: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLinks {
    pub github: String,
    pub linkedin: String,
}

/// A titled group of related skills, e.g. "Front-end".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGroup {
    pub title: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub tech: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub period: String,
}

/// Site content loaded from a TOML file. Feeds both the rendered pages
/// and the assistant's system prompt, so the chat answers from the same
/// facts the visitor sees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub name: String,
    /// The person the portfolio belongs to.
    pub owner: String,
    pub description: String,
    /// Short facts about the owner, one bullet each.
    #[serde(default)]
    pub about: Vec<String>,
    pub email: EmailConfig,
    pub links: SocialLinks,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default = "default_sections")]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub experience: Vec<Experience>,
}

impl SiteConfig {
    /// Load site content from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read site config {}", path.display()))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse site config {}", path.display()))?;
        debug!(path = %path.display(), "Loaded site config from file");
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Section ids in document order, for the scroll tracker.
    pub fn section_ids(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.id.clone()).collect()
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Your Portfolio".to_string(),
            owner: "Your Name".to_string(),
            description: "Personal portfolio and blog".to_string(),
            about: Vec::new(),
            email: EmailConfig {
                recipient: "your-email@example.com".to_string(),
                subject: "New Contact Form Submission".to_string(),
            },
            links: SocialLinks {
                github: "https://github.com/yourusername".to_string(),
                linkedin: "https://linkedin.com/in/yourusername".to_string(),
            },
            website: None,
            sections: default_sections(),
            skills: Vec::new(),
            projects: Vec::new(),
            experience: Vec::new(),
        }
    }
}

fn default_sections() -> Vec<Section> {
    [
        ("home", "Home"),
        ("about", "About"),
        ("skills", "Skills"),
        ("projects", "Projects"),
        ("contact", "Contact"),
    ]
    .into_iter()
    .map(|(id, label)| Section {
        id: id.to_string(),
        label: label.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
name = "Ada's Portfolio"
owner = "Ada"
description = "Systems and web"
about = ["Full-stack developer", "Keyboard collector"]
website = "https://ada.example.com"

[email]
recipient = "ada@example.com"
subject = "Hello from the site"

[links]
github = "https://github.com/ada"
linkedin = "https://linkedin.com/in/ada"

[[skills]]
title = "Back-end"
skills = ["Rust", "Node.js"]

[[projects]]
title = "Echo"
description = "A voice assistant"
tech = "Rust, WebRTC"

[[experience]]
role = "Web Manager"
company = "Isotech"
period = "2021-2024"
"#;

    #[test]
    fn test_parse_full_config() {
        let config = SiteConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.owner, "Ada");
        assert_eq!(config.email.recipient, "ada@example.com");
        assert_eq!(config.skills.len(), 1);
        assert_eq!(config.projects[0].tech, "Rust, WebRTC");
        // Sections were not specified, so the default page layout applies
        assert_eq!(
            config.section_ids(),
            vec!["home", "about", "skills", "projects", "contact"]
        );
    }

    #[test]
    fn test_explicit_sections_override_defaults() {
        let toml = r#"
name = "N"
owner = "O"
description = "D"

[email]
recipient = "r@example.com"
subject = "S"

[links]
github = "g"
linkedin = "l"

[[sections]]
id = "home"
label = "Home"

[[sections]]
id = "writing"
label = "Writing"
"#;
        let config = SiteConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.section_ids(), vec!["home", "writing"]);
    }

    #[test]
    fn test_rejects_incomplete_config() {
        assert!(SiteConfig::from_toml_str("name = \"only a name\"").is_err());
    }

    #[test]
    fn test_default_placeholders() {
        let config = SiteConfig::default();
        assert_eq!(config.name, "Your Portfolio");
        assert_eq!(config.sections.len(), 5);
        assert!(config.projects.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = SiteConfig::load(file.path()).unwrap();
        assert_eq!(config.name, "Ada's Portfolio");
    }

    #[test]
    fn test_load_missing_file_fails_with_path() {
        let err = SiteConfig::load(Path::new("/nonexistent/site.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/site.toml"));
    }
}
