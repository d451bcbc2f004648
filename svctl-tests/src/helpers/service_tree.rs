//! Service directory trees backed by fake supervisors

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use svctl_core::{CaptureOutput, Config, Controller, Output};
use tempfile::TempDir;

use super::fake_supervisor::{Behavior, FakeSupervisor, Initial};

/// A temporary service root. Supervisors are dropped before the directory.
pub struct TestServiceTree {
    supervisors: HashMap<String, FakeSupervisor>,
    root: TempDir,
}

impl TestServiceTree {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            supervisors: HashMap::new(),
            root: TempDir::new()?,
        })
    }

    /// `r0` and `r1` stopped, `o` stopped, `w` without a supervisor.
    pub fn standard() -> std::io::Result<Self> {
        let mut tree = Self::new()?;
        tree.supervised("r0", Initial::Stopped)?;
        tree.supervised("r1", Initial::Stopped)?;
        tree.supervised("o", Initial::Stopped)?;
        tree.unsupervised("w")?;
        Ok(tree)
    }

    pub fn base(&self) -> &Path {
        self.root.path()
    }

    /// Add a service with an obedient supervisor. `name` may be nested,
    /// e.g. `r0/log`.
    pub fn supervised(&mut self, name: &str, initial: Initial) -> std::io::Result<&FakeSupervisor> {
        self.attach(name, initial, Behavior::Obey)
    }

    /// Add a service whose supervisor reads control bytes but never acts.
    pub fn ignoring(&mut self, name: &str, initial: Initial) -> std::io::Result<&FakeSupervisor> {
        self.attach(name, initial, Behavior::Ignore)
    }

    /// Add a service directory that runsv never attached to.
    pub fn unsupervised(&mut self, name: &str) -> std::io::Result<()> {
        fs::create_dir_all(self.base().join(name).join("supervise"))
    }

    pub fn supervisor(&self, name: &str) -> &FakeSupervisor {
        match self.supervisors.get(name) {
            Some(sup) => sup,
            None => panic!("no supervisor for {name}"),
        }
    }

    /// Stop the supervisor of `name`, leaving its files behind.
    pub fn detach(&mut self, name: &str) {
        self.supervisors.remove(name);
    }

    /// A controller over this tree writing into a capture buffer.
    pub fn controller(&self) -> (Controller, Arc<CaptureOutput>) {
        let capture = Arc::new(CaptureOutput::new());
        let output: Arc<dyn Output> = capture.clone();
        let config = Config::new(self.base());
        (Controller::new(&config, output), capture)
    }

    fn attach(
        &mut self,
        name: &str,
        initial: Initial,
        behavior: Behavior,
    ) -> std::io::Result<&FakeSupervisor> {
        let dir = self.base().join(name);
        fs::create_dir_all(&dir)?;
        let sup = FakeSupervisor::attach(&dir, initial, behavior)?;
        self.supervisors.insert(name.to_string(), sup);
        Ok(self.supervisor(name))
    }
}
