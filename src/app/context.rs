use crate::adapters::run_pointer_file::RunPointerStore;
use crate::app::config::ManagerConfig;
use crate::app::console::Console;
use crate::ports::{Git, GitHub};

/// Application context holding dependencies for command execution.
pub struct AppContext<G: GitHub, V: Git> {
    github: G,
    git: V,
    config: ManagerConfig,
    console: Console,
}

impl<G: GitHub, V: Git> AppContext<G, V> {
    /// Create a new application context.
    pub fn new(github: G, git: V, config: ManagerConfig) -> Self {
        let console = Console::new(config.github_actions);
        Self { github, git, config, console }
    }

    pub fn github(&self) -> &G {
        &self.github
    }

    pub fn git(&self) -> &V {
        &self.git
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    /// Pointer store rooted at the configured project directory.
    pub fn run_pointer(&self) -> RunPointerStore {
        RunPointerStore::new(self.config.run_pointer_path())
    }
}
