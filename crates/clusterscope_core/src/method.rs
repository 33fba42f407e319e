use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClusteringMethod {
    Ontology,
    Neural,
}

impl ClusteringMethod {
    pub const ALL: [ClusteringMethod; 2] = [ClusteringMethod::Ontology, ClusteringMethod::Neural];

    /// Value sent in the `clustering_method` form field.
    pub fn as_str(self) -> &'static str {
        match self {
            ClusteringMethod::Ontology => "ontology",
            ClusteringMethod::Neural => "neural",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ClusteringMethod::Ontology => "Ontology-based",
            ClusteringMethod::Neural => "Neural embeddings",
        }
    }
}

impl fmt::Display for ClusteringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl fmt::Display for UnknownMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown clustering method `{}` (expected ontology or neural)", self.0)
    }
}

impl std::error::Error for UnknownMethod {}

impl FromStr for ClusteringMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownMethod(wanted.to_string()))
    }
}

/// Radio-like selection: starts empty, and once an option is chosen it can
/// only be replaced, never cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MethodSelection {
    selected: Option<ClusteringMethod>,
}

impl MethodSelection {
    pub fn selected(&self) -> Option<ClusteringMethod> {
        self.selected
    }

    pub fn is_selected(&self, method: ClusteringMethod) -> bool {
        self.selected == Some(method)
    }

    /// Returns true when the selection changed.
    pub fn click(&mut self, method: ClusteringMethod) -> bool {
        let changed = self.selected != Some(method);
        self.selected = Some(method);
        changed
    }
}
