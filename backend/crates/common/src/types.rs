use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a running service plus the external collaborators it was
/// started with (e.g. `generative_ai`, `speech`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub instance_id: Uuid,
    pub collaborators: Vec<String>,
}

impl ServiceInfo {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            instance_id: Uuid::new_v4(),
            collaborators: Vec::new(),
        }
    }

    pub fn with_collaborator(mut self, name: &str, enabled: bool) -> Self {
        if enabled {
            self.collaborators.push(name.to_owned());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_collaborators_are_not_listed() {
        let info = ServiceInfo::new("care-api")
            .with_collaborator("generative_ai", true)
            .with_collaborator("speech", false);
        assert_eq!(info.name, "care-api");
        assert_eq!(info.collaborators, vec!["generative_ai".to_string()]);
    }
}
