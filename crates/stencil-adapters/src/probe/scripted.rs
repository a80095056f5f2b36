//! Tool probe with scripted answers, for tests and dry runs.

use std::collections::HashMap;
use std::path::PathBuf;

use stencil_core::application::ports::ToolProbe;

#[derive(Debug, Clone)]
enum Answer {
    Version(String),
    Broken(String),
}

/// Reports exactly the tools it was given.
#[derive(Debug, Clone, Default)]
pub struct StaticToolProbe {
    tools: HashMap<String, Answer>,
}

impl StaticToolProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// A JDK 17, Maven 3.9.6 and GNU sed host.
    pub fn java_toolchain() -> Self {
        Self::new()
            .tool("java", "openjdk version \"17.0.10\" 2024-01-16")
            .tool("mvn", "Apache Maven 3.9.6 (bc0240f3c744dd6b6ec2920b3cd08dcc295161ae)")
            .tool("sed", "sed (GNU sed) 4.9")
            .tool("gsed", "gsed (GNU sed) 4.9")
    }

    /// Installed tool whose version probe prints `output`.
    pub fn tool(mut self, name: impl Into<String>, output: impl Into<String>) -> Self {
        self.tools.insert(name.into(), Answer::Version(output.into()));
        self
    }

    /// Installed tool whose version probe fails with `reason`.
    pub fn broken(mut self, name: impl Into<String>, reason: impl Into<String>) -> Self {
        self.tools.insert(name.into(), Answer::Broken(reason.into()));
        self
    }

    pub fn without(mut self, name: &str) -> Self {
        self.tools.remove(name);
        self
    }
}

impl ToolProbe for StaticToolProbe {
    fn locate(&self, tool: &str) -> Option<PathBuf> {
        self.tools
            .contains_key(tool)
            .then(|| PathBuf::from("/opt/stencil-static/bin").join(tool))
    }

    fn version(&self, tool: &str, _args: &[String]) -> Result<String, String> {
        match self.tools.get(tool) {
            Some(Answer::Version(output)) => Ok(output.clone()),
            Some(Answer::Broken(reason)) => Err(reason.clone()),
            None => Err(format!("{tool}: command not found")),
        }
    }
}
