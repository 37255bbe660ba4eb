use std::fmt;
use std::str::FromStr;

/// `program/project/node` triple identifying one export.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FetchKey {
    pub program_name: String,
    pub project_code: String,
    pub node_label: String,
}

impl FetchKey {
    pub fn new(
        program_name: impl Into<String>,
        project_code: impl Into<String>,
        node_label: impl Into<String>,
    ) -> Self {
        Self {
            program_name: program_name.into(),
            project_code: project_code.into(),
            node_label: node_label.into(),
        }
    }
}

impl fmt::Display for FetchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.program_name, self.project_code, self.node_label)
    }
}

impl FromStr for FetchKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [program, project, node] if parts.iter().all(|p| !p.is_empty()) => {
                Ok(FetchKey::new(*program, *project, *node))
            }
            _ => Err(format!("'{}' is not in program/project/node form", s)),
        }
    }
}
