pub const ALL_CLUSTERS_FILENAME: &str = "all_clusters.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub id: String,
    pub sentences: Vec<String>,
}

impl Cluster {
    pub fn heading(&self) -> String {
        format!("Cluster {}", self.id)
    }

    pub fn download_filename(&self) -> String {
        format!("cluster_{}.txt", self.id)
    }

    pub fn to_download(&self) -> Download {
        Download {
            filename: self.download_filename(),
            content: self.sentences.join("\n"),
        }
    }
}

/// Clusters in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisResult {
    clusters: Vec<Cluster>,
}

impl AnalysisResult {
    /// Builds a result from `(id, sentences)` pairs in response order.
    ///
    /// Ids that are array indices come first in numeric order, the rest keep
    /// their response order. This matches how a JSON object's keys are
    /// enumerated in the browser.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut indexed = Vec::new();
        let mut named = Vec::new();
        for (id, sentences) in entries {
            let cluster = Cluster { id, sentences };
            match array_index(&cluster.id) {
                Some(index) => indexed.push((index, cluster)),
                None => named.push(cluster),
            }
        }
        indexed.sort_by_key(|(index, _)| *index);

        let clusters = indexed
            .into_iter()
            .map(|(_, cluster)| cluster)
            .chain(named)
            .collect();
        Self { clusters }
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn cluster(&self, id: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|cluster| cluster.id == id)
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn sentence_count(&self) -> usize {
        self.clusters.iter().map(|c| c.sentences.len()).sum()
    }

    /// Every cluster as a labeled block, blocks separated by a blank line.
    pub fn to_combined_download(&self) -> Download {
        let content = self
            .clusters
            .iter()
            .map(|cluster| format!("Cluster {}:\n{}", cluster.id, cluster.sentences.join("\n")))
            .collect::<Vec<_>>()
            .join("\n\n");
        Download {
            filename: ALL_CLUSTERS_FILENAME.to_string(),
            content,
        }
    }
}

/// A text file generated on the client side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub content: String,
}

fn array_index(id: &str) -> Option<u32> {
    if id.is_empty() || (id.len() > 1 && id.starts_with('0')) {
        return None;
    }
    if !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    id.parse::<u32>().ok().filter(|value| *value != u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{array_index, AnalysisResult};

    fn entry(id: &str, sentences: &[&str]) -> (String, Vec<String>) {
        (
            id.to_string(),
            sentences.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn index_like_ids_sort_numerically_before_names() {
        let result = AnalysisResult::from_entries(vec![
            entry("b", &["x"]),
            entry("10", &["y"]),
            entry("2", &["z"]),
            entry("a", &["w"]),
            entry("01", &["v"]),
        ]);
        let ids: Vec<_> = result.clusters().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "10", "b", "a", "01"]);
    }

    #[test]
    fn array_index_rejects_non_canonical_forms() {
        assert_eq!(array_index("0"), Some(0));
        assert_eq!(array_index("42"), Some(42));
        assert_eq!(array_index("007"), None);
        assert_eq!(array_index("-1"), None);
        assert_eq!(array_index("+1"), None);
        assert_eq!(array_index("4294967295"), None);
        assert_eq!(array_index(""), None);
    }

    #[test]
    fn cluster_download_joins_sentences() {
        let result = AnalysisResult::from_entries(vec![entry("0", &["a", "b"])]);
        let download = result.cluster("0").unwrap().to_download();
        assert_eq!(download.filename, "cluster_0.txt");
        assert_eq!(download.content, "a\nb");
    }

    #[test]
    fn combined_download_labels_every_cluster() {
        let result =
            AnalysisResult::from_entries(vec![entry("1", &["c"]), entry("0", &["a", "b"])]);
        let download = result.to_combined_download();
        assert_eq!(download.filename, "all_clusters.txt");
        assert_eq!(download.content, "Cluster 0:\na\nb\n\nCluster 1:\nc");
        assert_eq!(result.sentence_count(), 3);
    }
}
