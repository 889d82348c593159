//! Plan files: a TOML description of simulated work for the `proctree` binary.
//!
//! ```toml
//! verb = "building"
//!
//! [[task]]
//! key = "fetch"
//! label = "fetching sources"
//! note = "v1.2.0"
//! duration_ms = 800
//! logs = ["resolving mirrors", "downloading"]
//!
//! [[task]]
//! key = "build"
//! label = "building"
//! parallel = true
//!
//!   [[task.children]]
//!   key = "build-x86"
//!   label = "x86_64"
//!   duration_ms = 1500
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ProcTreeError, ProcTreeResult};
use crate::tree::TaskDescriptor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plan {
    #[serde(default)]
    pub verb: String,

    #[serde(default, rename = "task")]
    pub tasks: Vec<PlanTask>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanTask {
    pub key: String,
    pub label: String,

    /// Shown right-aligned next to the label
    #[serde(default)]
    pub note: Option<String>,

    /// How long the leaf pretends to work
    #[serde(default)]
    pub duration_ms: u64,

    /// End in failure instead of success
    #[serde(default)]
    pub fail: bool,

    /// Emitted evenly over the task's duration
    #[serde(default)]
    pub logs: Vec<String>,

    /// Run children concurrently instead of one after another
    #[serde(default)]
    pub parallel: bool,

    #[serde(default)]
    pub children: Vec<PlanTask>,
}

impl PlanTask {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            note: None,
            duration_ms: 0,
            fail: false,
            logs: Vec::new(),
            parallel: false,
            children: Vec::new(),
        }
    }

    fn descriptor(&self) -> TaskDescriptor {
        let mut descriptor = TaskDescriptor::new(self.key.as_str(), self.label.as_str());
        if let Some(note) = &self.note {
            descriptor = descriptor.with_right_text(note.as_str());
        }
        for child in &self.children {
            descriptor.add_child(child.descriptor());
        }
        descriptor
    }

    fn node_count(&self) -> usize {
        1 + self.children.iter().map(PlanTask::node_count).sum::<usize>()
    }
}

impl Plan {
    pub fn load(path: &Path) -> ProcTreeResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|message| ProcTreeError::PlanParse {
            file: path.to_path_buf(),
            message,
        })
    }

    /// Parse and validate plan text.
    pub fn parse(content: &str) -> Result<Self, String> {
        let plan: Plan = toml::from_str(content).map_err(|e| e.to_string())?;
        plan.validate()?;
        Ok(plan)
    }

    fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        let mut stack: Vec<&PlanTask> = self.tasks.iter().collect();
        while let Some(task) = stack.pop() {
            if task.key.trim().is_empty() {
                return Err(format!("task '{}' has an empty key", task.label));
            }
            if !seen.insert(task.key.as_str()) {
                return Err(format!("task key '{}' is used more than once", task.key));
            }
            stack.extend(task.children.iter());
        }
        Ok(())
    }

    pub fn descriptors(&self) -> Vec<TaskDescriptor> {
        self.tasks.iter().map(PlanTask::descriptor).collect()
    }

    pub fn node_count(&self) -> usize {
        self.tasks.iter().map(PlanTask::node_count).sum()
    }

    /// The plan `proctree demo` runs.
    pub fn sample() -> Self {
        let leaf = |key: &str, label: &str, duration_ms: u64, logs: &[&str]| PlanTask {
            duration_ms,
            logs: logs.iter().map(|l| l.to_string()).collect(),
            ..PlanTask::new(key, label)
        };

        let fetch = PlanTask {
            note: Some("3 sources".to_string()),
            children: vec![
                leaf("fetch-kernel", "kernel", 900, &["resolving mirror", "downloading 12.4 MiB"]),
                leaf("fetch-libc", "libc", 600, &["cache hit"]),
                leaf("fetch-app", "app", 700, &["cloning repository"]),
            ],
            parallel: true,
            ..PlanTask::new("fetch", "fetching sources")
        };

        let build = PlanTask {
            children: vec![
                leaf("configure", "configuring", 500, &["checking toolchain", "writing .config"]),
                PlanTask {
                    parallel: true,
                    children: vec![
                        leaf("compile-x86", "x86_64", 1600, &["CC lib/alloc.o", "CC lib/sched.o", "LD kernel"]),
                        leaf("compile-arm", "arm64", 1900, &["CC lib/alloc.o", "CC lib/sched.o", "LD kernel"]),
                    ],
                    ..PlanTask::new("compile", "compiling")
                },
                leaf("package", "packaging", 400, &["writing image"]),
            ],
            ..PlanTask::new("build", "building")
        };

        Self {
            verb: "building".to_string(),
            tasks: vec![fetch, build],
        }
    }
}
