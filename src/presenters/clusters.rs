//! Topic cluster cards.

use crate::models::TopicCluster;

/// A palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    pub name: &'static str,
    pub hex: &'static str,
    pub rgb: (u8, u8, u8),
}

/// Cluster palette. Clusters cycle through it by position.
pub const CLUSTER_PALETTE: [PaletteColor; 6] = [
    PaletteColor {
        name: "indigo",
        hex: "#6366f1",
        rgb: (0x63, 0x66, 0xf1),
    },
    PaletteColor {
        name: "cyan",
        hex: "#22d3ee",
        rgb: (0x22, 0xd3, 0xee),
    },
    PaletteColor {
        name: "green",
        hex: "#4ade80",
        rgb: (0x4a, 0xde, 0x80),
    },
    PaletteColor {
        name: "amber",
        hex: "#fbbf24",
        rgb: (0xfb, 0xbf, 0x24),
    },
    PaletteColor {
        name: "pink",
        hex: "#f472b6",
        rgb: (0xf4, 0x72, 0xb6),
    },
    PaletteColor {
        name: "violet",
        hex: "#a78bfa",
        rgb: (0xa7, 0x8b, 0xfa),
    },
];

/// Render model for one cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterCard {
    /// Index into `CLUSTER_PALETTE`.
    pub color_index: usize,
    pub label: String,
    pub doc_count: u64,
    pub keywords: Vec<String>,
}

impl ClusterCard {
    pub fn color(&self) -> PaletteColor {
        CLUSTER_PALETTE[self.color_index]
    }

    /// Badge text, e.g. `12 docs`.
    pub fn doc_badge(&self) -> String {
        format!("{} docs", self.doc_count)
    }
}

/// Build cluster cards in input order.
pub fn present_clusters(clusters: &[TopicCluster]) -> Vec<ClusterCard> {
    clusters
        .iter()
        .enumerate()
        .map(|(i, c)| ClusterCard {
            color_index: i % CLUSTER_PALETTE.len(),
            label: c
                .label
                .as_deref()
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Topic {}", i + 1)),
            doc_count: c.doc_count.unwrap_or(c.keywords.len() as u64),
            keywords: c.keywords.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(label: Option<&str>, keywords: &[&str], doc_count: Option<u64>) -> TopicCluster {
        TopicCluster {
            label: label.map(str::to_string),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            doc_count,
        }
    }

    #[test]
    fn test_palette_cycles_and_order_is_kept() {
        let clusters: Vec<TopicCluster> = (0..14)
            .map(|i| cluster(Some(&format!("c{}", i)), &[], Some(1)))
            .collect();
        let cards = present_clusters(&clusters);

        for (i, card) in cards.iter().enumerate() {
            assert_eq!(card.color_index, i % 6);
            assert_eq!(card.label, format!("c{}", i));
        }
        assert_eq!(cards[6].color(), CLUSTER_PALETTE[0]);
    }

    #[test]
    fn test_label_fallback() {
        let cards = present_clusters(&[
            cluster(Some("Named"), &[], None),
            cluster(None, &[], None),
            cluster(Some(""), &[], None),
        ]);
        assert_eq!(cards[0].label, "Named");
        assert_eq!(cards[1].label, "Topic 2");
        assert_eq!(cards[2].label, "Topic 3");
    }

    #[test]
    fn test_doc_count_fallbacks() {
        let cards = present_clusters(&[
            cluster(None, &["a", "b"], Some(9)),
            cluster(None, &["a", "b", "c"], None),
            cluster(None, &[], None),
        ]);
        assert_eq!(cards[0].doc_count, 9);
        assert_eq!(cards[1].doc_count, 3);
        assert_eq!(cards[2].doc_count, 0);
        assert_eq!(cards[1].doc_badge(), "3 docs");
        assert!(cards[2].keywords.is_empty());
    }

    #[test]
    fn test_empty_clusters() {
        assert!(present_clusters(&[]).is_empty());
    }
}
