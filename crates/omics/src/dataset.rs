use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub type ProteinId = u32;

/// Highest confidence score an interaction can carry.
pub const MAX_SCORE: u8 = 100;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ProteinGroup {
    Signaling,
    Cytokine,
    Marker,
    Receptor,
    Adapter,
}

impl ProteinGroup {
    pub const ALL: [ProteinGroup; 5] = [
        ProteinGroup::Signaling,
        ProteinGroup::Cytokine,
        ProteinGroup::Marker,
        ProteinGroup::Receptor,
        ProteinGroup::Adapter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProteinGroup::Signaling => "signaling",
            ProteinGroup::Cytokine => "cytokine",
            ProteinGroup::Marker => "marker",
            ProteinGroup::Receptor => "receptor",
            ProteinGroup::Adapter => "adapter",
        }
    }
}

impl fmt::Display for ProteinGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Experimental condition selecting which interaction list is shown.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Baseline,
    #[default]
    Inflammation,
}

impl Condition {
    pub const ALL: [Condition; 2] =
        [Condition::Baseline, Condition::Inflammation];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Baseline => "baseline",
            Condition::Inflammation => "inflammation",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Condition::Baseline => "Baseline",
            Condition::Inflammation => "Inflammation",
        }
    }

    /// Read a selector value; anything other than "baseline" falls back to
    /// the inflammation set.
    pub fn from_value(value: &str) -> Self {
        if value.eq_ignore_ascii_case("baseline") {
            Condition::Baseline
        } else {
            Condition::Inflammation
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProteinNode {
    pub id: ProteinId,
    pub label: String,
    pub group: ProteinGroup,
    pub note: String,
}

impl ProteinNode {
    fn new(id: ProteinId, label: &str, group: ProteinGroup, note: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
            group,
            note: note.to_string(),
        }
    }
}

/// Undirected interaction with a confidence score in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionEdge {
    pub from: ProteinId,
    pub to: ProteinId,
    pub score: u8,
}

const fn edge(from: ProteinId, to: ProteinId, score: u8) -> InteractionEdge {
    InteractionEdge { from, to, score }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DatasetError {
    #[error("protein id {0} is defined more than once")]
    DuplicateProtein(ProteinId),
    #[error("{condition} edge {from} -> {to} references unknown protein {missing}")]
    DanglingEndpoint {
        condition: Condition,
        from: ProteinId,
        to: ProteinId,
        missing: ProteinId,
    },
    #[error("{condition} edge {from} -> {to} has score {score} above 100")]
    ScoreOutOfRange {
        condition: Condition,
        from: ProteinId,
        to: ProteinId,
        score: u8,
    },
}

/// Protein catalog plus one interaction list per condition.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionDataset {
    proteins: Vec<ProteinNode>,
    baseline: Vec<InteractionEdge>,
    inflammation: Vec<InteractionEdge>,
}

impl InteractionDataset {
    /// Build a dataset, checking that ids are unique, every edge endpoint
    /// exists and every score is within range.
    pub fn new(
        proteins: Vec<ProteinNode>,
        baseline: Vec<InteractionEdge>,
        inflammation: Vec<InteractionEdge>,
    ) -> Result<Self, DatasetError> {
        let mut ids = HashSet::with_capacity(proteins.len());
        for protein in &proteins {
            if !ids.insert(protein.id) {
                return Err(DatasetError::DuplicateProtein(protein.id));
            }
        }

        for (condition, edges) in [
            (Condition::Baseline, &baseline),
            (Condition::Inflammation, &inflammation),
        ] {
            for e in edges {
                if let Some(&missing) =
                    [e.from, e.to].iter().find(|id| !ids.contains(*id))
                {
                    return Err(DatasetError::DanglingEndpoint {
                        condition,
                        from: e.from,
                        to: e.to,
                        missing,
                    });
                }
                if e.score > MAX_SCORE {
                    return Err(DatasetError::ScoreOutOfRange {
                        condition,
                        from: e.from,
                        to: e.to,
                        score: e.score,
                    });
                }
            }
        }

        Ok(Self {
            proteins,
            baseline,
            inflammation,
        })
    }

    /// The built-in inflammation signaling catalog.
    pub fn builtin() -> Self {
        use ProteinGroup::*;

        let proteins = vec![
            ProteinNode::new(1, "STAT3", Signaling, "transcription factor"),
            ProteinNode::new(2, "IL6", Cytokine, "inflammation cytokine"),
            ProteinNode::new(3, "TNF", Cytokine, "pro-inflammatory signal"),
            ProteinNode::new(4, "NFKB1", Signaling, "inflammatory regulator"),
            ProteinNode::new(5, "JAK2", Signaling, "kinase"),
            ProteinNode::new(6, "CXCL8", Cytokine, "chemokine"),
            ProteinNode::new(7, "CRP", Marker, "inflammation marker"),
            ProteinNode::new(8, "MAPK1", Signaling, "MAP kinase"),
            ProteinNode::new(9, "AKT1", Signaling, "cell survival signaling"),
            ProteinNode::new(10, "IL1B", Cytokine, "pro-inflammatory cytokine"),
            ProteinNode::new(11, "TLR4", Receptor, "innate immune receptor"),
            ProteinNode::new(12, "MYD88", Adapter, "TLR signaling adapter"),
        ];

        // Scores roughly track confidence/strength of the interaction
        let baseline = vec![
            edge(2, 5, 55),
            edge(3, 4, 45),
            edge(10, 4, 40),
            edge(11, 12, 52),
            edge(12, 4, 42),
            edge(8, 4, 38),
            edge(9, 1, 33),
        ];

        let inflammation = vec![
            edge(2, 5, 72),
            edge(5, 1, 68),
            edge(3, 4, 76),
            edge(10, 4, 70),
            edge(11, 12, 66),
            edge(12, 4, 74),
            edge(6, 3, 58),
            edge(7, 2, 51),
            edge(8, 4, 62),
            edge(9, 1, 48),
            edge(11, 4, 44),
        ];

        Self {
            proteins,
            baseline,
            inflammation,
        }
    }

    pub fn proteins(&self) -> &[ProteinNode] {
        &self.proteins
    }

    pub fn edges(&self, condition: Condition) -> &[InteractionEdge] {
        match condition {
            Condition::Baseline => &self.baseline,
            Condition::Inflammation => &self.inflammation,
        }
    }
}

impl Default for InteractionDataset {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_passes_validation() {
        let builtin = InteractionDataset::builtin();
        let validated = InteractionDataset::new(
            builtin.proteins.clone(),
            builtin.baseline.clone(),
            builtin.inflammation.clone(),
        )
        .expect("builtin dataset must be valid");

        assert_eq!(validated, builtin);
        assert_eq!(builtin.proteins().len(), 12);
        assert_eq!(builtin.edges(Condition::Baseline).len(), 7);
        assert_eq!(builtin.edges(Condition::Inflammation).len(), 11);
    }

    #[test]
    fn dangling_endpoint_is_rejected() {
        let proteins = vec![ProteinNode::new(
            1,
            "STAT3",
            ProteinGroup::Signaling,
            "",
        )];
        let err = InteractionDataset::new(
            proteins,
            vec![edge(1, 99, 10)],
            Vec::new(),
        )
        .unwrap_err();

        assert_eq!(
            err,
            DatasetError::DanglingEndpoint {
                condition: Condition::Baseline,
                from: 1,
                to: 99,
                missing: 99,
            }
        );
    }

    #[test]
    fn duplicate_ids_and_scores_out_of_range_are_rejected() {
        let a = ProteinNode::new(1, "A", ProteinGroup::Marker, "");
        let b = ProteinNode::new(2, "B", ProteinGroup::Marker, "");

        let dup = InteractionDataset::new(
            vec![a.clone(), a.clone()],
            Vec::new(),
            Vec::new(),
        );
        assert_eq!(dup.unwrap_err(), DatasetError::DuplicateProtein(1));

        let too_high = InteractionDataset::new(
            vec![a, b],
            Vec::new(),
            vec![edge(1, 2, 101)],
        );
        assert!(matches!(
            too_high.unwrap_err(),
            DatasetError::ScoreOutOfRange { score: 101, .. }
        ));
    }

    #[test]
    fn condition_selector_values_default_to_inflammation() {
        assert_eq!(Condition::from_value("baseline"), Condition::Baseline);
        assert_eq!(
            Condition::from_value("inflammation"),
            Condition::Inflammation
        );
        assert_eq!(Condition::from_value(""), Condition::Inflammation);
        assert_eq!(Condition::default(), Condition::Inflammation);
    }
}
