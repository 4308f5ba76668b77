use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr)]
pub enum SdlcPhase {
    Analysis,
    Design,
    Implementation,
    Testing,
    Deployment,
}

/// A step of the internal delivery process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InternalProcess {
    pub id: u32,
    pub name: String,
    pub phase: SdlcPhase,
    pub is_mandatory: bool,
    pub documentation_link: String,
}

impl InternalProcess {
    /// Number of entries in [`InternalProcess::catalog`].
    pub const CATALOG_LEN: usize = 7;

    /// The fixed, ordered process catalog. Ids are dense starting at 1.
    pub fn catalog(docs_base_url: &str) -> Vec<InternalProcess> {
        [
            ("Requirements Definition", SdlcPhase::Analysis),
            ("Architecture Design", SdlcPhase::Design),
            ("Backend Development", SdlcPhase::Implementation),
            ("Frontend Development", SdlcPhase::Implementation),
            ("Code Review", SdlcPhase::Testing),
            ("QA Testing", SdlcPhase::Testing),
            ("Production Deployment", SdlcPhase::Deployment),
        ]
        .into_iter()
        .enumerate()
        .map(|(idx, (name, phase))| InternalProcess {
            id: idx as u32 + 1,
            name: name.to_string(),
            phase,
            is_mandatory: true,
            documentation_link: format!(
                "{}/{}",
                docs_base_url.trim_end_matches('/'),
                name.replace(' ', "_")
            ),
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_ordered_and_dense() {
        let catalog = InternalProcess::catalog("http://docs.example.com");
        assert_eq!(catalog.len(), InternalProcess::CATALOG_LEN);
        for (idx, process) in catalog.iter().enumerate() {
            assert_eq!(process.id, idx as u32 + 1);
        }
        assert_eq!(catalog[5].name, "QA Testing");
        assert_eq!(catalog[0].phase, SdlcPhase::Analysis);
        assert_eq!(catalog[6].phase, SdlcPhase::Deployment);
    }

    #[test]
    fn documentation_link_uses_underscored_name() {
        let catalog = InternalProcess::catalog("http://docs.example.com/");
        assert_eq!(
            catalog[4].documentation_link,
            "http://docs.example.com/Code_Review"
        );
    }
}
