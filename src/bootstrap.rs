//! Bootstrap orchestration
//!
//! Runs the configuration tool once, then the per-dependency pipeline for
//! each selected dependency in order. The first error aborts the run.

use crate::config::Dependency;
use crate::configure::{self, DEFAULT_TOOL};
use crate::error::Result;
use crate::layout::ProjectLayout;
use crate::output;
use crate::steps::{cleanup, distribute, extract, fetch, prepare};

/// What installing one dependency did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub name: String,
    /// Size of the downloaded archive
    pub bytes: u64,
    /// Zip entries extracted, directories included
    pub entries: usize,
    /// Library file names copied into both build output directories
    pub libraries: Vec<String>,
}

/// Prepares a project checkout for building.
pub struct Bootstrapper {
    layout: ProjectLayout,
    configure_tool: Option<String>,
}

impl Bootstrapper {
    /// Create a bootstrapper that configures with CMake.
    pub fn new(layout: ProjectLayout) -> Self {
        Self {
            layout,
            configure_tool: Some(DEFAULT_TOOL.to_string()),
        }
    }

    /// Use a different configuration tool.
    pub fn with_configure_tool(mut self, tool: &str) -> Self {
        self.configure_tool = Some(tool.to_string());
        self
    }

    /// Do not run any configuration tool.
    pub fn skip_configure(mut self) -> Self {
        self.configure_tool = None;
        self
    }

    /// Paths this bootstrapper installs into.
    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Run the configuration tool, if one is set.
    pub fn configure(&self) -> Result<()> {
        let Some(tool) = &self.configure_tool else {
            output::skip("build configuration skipped");
            return Ok(());
        };

        output::action("Configuring build...");
        output::detail(&format!("{} {}", tool, self.layout.root().display()));
        configure::configure(tool, &self.layout)
    }

    /// Fetch, extract, distribute and clean up a single dependency.
    pub fn install(&self, dep: &Dependency) -> Result<InstallReport> {
        let dest = dep.destination(&self.layout);
        let archive = dep.archive_path(&self.layout);
        let lib_dir = dep.lib_dir_path(&self.layout);
        let targets = self.layout.output_dirs();

        prepare::ensure_dirs(&[&dest, &targets[0], &targets[1]])?;

        output::sub_action(&format!("downloading {}", dep.name));
        output::detail(&dep.url);
        let bytes = fetch::fetch(&dep.url, &archive, dep.sha256.as_deref())?;
        output::detail(&format!("downloaded {} ({} bytes)", dep.archive, bytes));

        output::sub_action(&format!("unpacking {}", dep.name));
        let entries = extract::extract_zip(&archive, &dest)?;

        output::sub_action(&format!("moving {} libraries", dep.name));
        let libraries = distribute::distribute(&lib_dir, &dep.lib_ext, &targets)?;

        output::sub_action("cleaning up");
        cleanup::cleanup(&archive, &lib_dir)?;

        Ok(InstallReport {
            name: dep.name.clone(),
            bytes,
            entries,
            libraries,
        })
    }

    /// Configure once, then install every dependency in order.
    pub fn run<'a>(
        &self,
        deps: impl IntoIterator<Item = &'a Dependency>,
    ) -> Result<Vec<InstallReport>> {
        self.configure()?;

        let deps: Vec<_> = deps.into_iter().collect();
        let total = deps.len();
        let mut reports = Vec::with_capacity(total);

        for (i, dep) in deps.into_iter().enumerate() {
            output::action_numbered(i + 1, total, &format!("Installing {}", dep.name));
            reports.push(self.install(dep)?);
        }

        Ok(reports)
    }
}
