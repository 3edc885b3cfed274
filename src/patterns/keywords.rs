//! Path keyword table for pattern recognition
//!
//! Roles are assigned by case-insensitive substring match against a file's
//! path. The keyword lists live in config so projects with other naming
//! conventions ("dao", "handler") can extend them.

use serde::{Deserialize, Serialize};

/// Architectural role a file can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Controller,
    Model,
    View,
    Service,
    Repository,
}

/// `[patterns]` config section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternKeywords {
    #[serde(default = "default_controller")]
    pub controller: Vec<String>,

    #[serde(default = "default_model")]
    pub model: Vec<String>,

    #[serde(default = "default_view")]
    pub view: Vec<String>,

    #[serde(default = "default_service")]
    pub service: Vec<String>,

    #[serde(default = "default_repository")]
    pub repository: Vec<String>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn default_controller() -> Vec<String> {
    words(&["controller"])
}
fn default_model() -> Vec<String> {
    words(&["model"])
}
fn default_view() -> Vec<String> {
    words(&["view"])
}
fn default_service() -> Vec<String> {
    words(&["service"])
}
fn default_repository() -> Vec<String> {
    words(&["repository", "repo"])
}

impl Default for PatternKeywords {
    fn default() -> Self {
        Self {
            controller: default_controller(),
            model: default_model(),
            view: default_view(),
            service: default_service(),
            repository: default_repository(),
        }
    }
}

impl PatternKeywords {
    pub fn keywords(&self, role: Role) -> &[String] {
        match role {
            Role::Controller => &self.controller,
            Role::Model => &self.model,
            Role::View => &self.view,
            Role::Service => &self.service,
            Role::Repository => &self.repository,
        }
    }

    /// Whether `path` contains any keyword of `role`, ignoring case
    pub fn matches(&self, role: Role, path: &str) -> bool {
        let path = path.to_lowercase();
        self.keywords(role)
            .iter()
            .filter(|k| !k.is_empty())
            .any(|k| path.contains(&k.to_lowercase()))
    }

    /// Paths among `paths` playing `role`, in input order
    pub fn files_with_role<'a>(
        &self,
        role: Role,
        paths: impl IntoIterator<Item = &'a str>,
    ) -> Vec<&'a str> {
        paths
            .into_iter()
            .filter(|p| self.matches(role, p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_match() {
        let kw = PatternKeywords::default();
        assert!(kw.matches(Role::Controller, "src/UserController.ts"));
        assert!(kw.matches(Role::Repository, "src/data/UserRepo.ts"));
        assert!(!kw.matches(Role::Service, "src/UserController.ts"));
    }

    #[test]
    fn test_empty_keyword_never_matches() {
        let kw = PatternKeywords {
            view: vec![String::new()],
            ..Default::default()
        };
        assert!(!kw.matches(Role::View, "anything.ts"));
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let kw: PatternKeywords = toml::from_str(r#"repository = ["dao"]"#).unwrap();
        assert!(kw.matches(Role::Repository, "UserDao.java"));
        assert!(!kw.matches(Role::Repository, "UserRepo.java"));
        assert!(kw.matches(Role::Model, "UserModel.java"));
    }
}
