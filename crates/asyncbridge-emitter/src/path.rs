//! Output path templating.
//!
//! Templates may use `{cmd}`, `{project-root}`, `{emitter-name}` and
//! `{output-dir}`. Any other variable is rejected before substitution.

use asyncbridge_core::{FileType, PATH_VARIABLES, template_variables};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Errors resolving an output path template.
#[derive(Debug, Error)]
pub enum PathTemplateError {
    #[error("invalid path template: {0}")]
    Syntax(String),

    #[error("unsupported variable '{{{variable}}}' in path template '{template}'")]
    UnsupportedVariable { variable: String, template: String },

    #[error("cannot make '{path}' absolute: {source}")]
    Unresolvable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Values substituted into path templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathContext {
    /// Working directory of the invocation.
    pub cmd: PathBuf,
    pub project_root: PathBuf,
    pub emitter_name: String,
    pub output_dir: PathBuf,
}

impl PathContext {
    /// Context rooted at `project_root`, writing under `<project_root>/asyncbridge-output`.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self {
            cmd: project_root.clone(),
            output_dir: project_root.join("asyncbridge-output"),
            emitter_name: "asyncbridge".to_string(),
            project_root,
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    fn value(&self, variable: &str) -> Option<String> {
        let path = |p: &Path| p.to_string_lossy().into_owned();
        match variable {
            "cmd" => Some(path(&self.cmd)),
            "project-root" => Some(path(&self.project_root)),
            "emitter-name" => Some(self.emitter_name.clone()),
            "output-dir" => Some(path(&self.output_dir)),
            _ => None,
        }
    }
}

/// Resolve an output path template to an absolute file path.
///
/// The file type's extension is appended unless the path already ends with
/// it (`yml` counts for YAML).
pub fn resolve_output_path(
    template: &str,
    context: &PathContext,
    file_type: FileType,
) -> Result<PathBuf, PathTemplateError> {
    let variables = template_variables(template).map_err(PathTemplateError::Syntax)?;
    if let Some(unsupported) = variables.iter().find(|v| !PATH_VARIABLES.contains(*v)) {
        return Err(PathTemplateError::UnsupportedVariable {
            variable: unsupported.to_string(),
            template: template.to_string(),
        });
    }

    let mut resolved = template.to_string();
    for variable in variables {
        if let Some(value) = context.value(variable) {
            resolved = resolved.replace(&format!("{{{variable}}}"), &value);
        }
    }

    let normalized = normalize_separators(&resolved);
    let mut path = PathBuf::from(&normalized);
    if path.is_relative() {
        path = context.cmd.join(path);
    }
    let mut path = std::path::absolute(&path).map_err(|source| PathTemplateError::Unresolvable {
        path: normalized.clone(),
        source,
    })?;
    path = collapse_dots(&path);

    let has_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| file_type.matches_extension(e));
    if !has_extension {
        let mut name = path.into_os_string();
        name.push(".");
        name.push(file_type.extension());
        path = PathBuf::from(name);
    }
    Ok(path)
}

/// Resolve a template, falling back to `<template>.<ext>` on failure.
pub fn resolve_output_path_or_fallback(
    template: &str,
    context: &PathContext,
    file_type: FileType,
) -> PathBuf {
    match resolve_output_path(template, context, file_type) {
        Ok(path) => path,
        Err(err) => {
            let fallback = format!("{template}.{}", file_type.extension());
            warn!(%template, error = %err, %fallback, "path template resolution failed, using fallback");
            PathBuf::from(fallback)
        }
    }
}

/// Backslashes become `/` and repeated separators collapse.
fn normalize_separators(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len());
    for c in path.chars().map(|c| if c == '\\' { '/' } else { c }) {
        if c == '/' && normalized.ends_with('/') {
            continue;
        }
        normalized.push(c);
    }
    normalized
}

/// Lexically remove `.` and `..` components of an absolute path.
fn collapse_dots(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut collapsed = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                collapsed.pop();
            }
            other => collapsed.push(other.as_os_str()),
        }
    }
    collapsed
}
