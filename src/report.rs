//! Console reporting of the analysis results.
//!
//! All pipeline output flows through [`Report`], which writes to any
//! `io::Write` so tests can capture it. Only the reported data matters to
//! callers; the exact layout is not a stability guarantee.

use std::io::{self, Write};

use ndarray::{Array1, ArrayView2, Axis};

use crate::dataset::Dataset;

/// Per-segment size and unstandardized attribute means, one entry per
/// cluster id in `[0, n_groups)`.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupSummary {
    pub size: usize,
    pub means: Array1<f64>,
}

/// Groups rows by cluster id and averages each original column per group.
///
/// Means are taken over the raw (unstandardized) values, which is what a
/// human reads to interpret a segment. An empty group keeps zeroed means.
pub fn group_means(records: ArrayView2<'_, f64>, labels: &[usize], n_groups: usize) -> Vec<GroupSummary> {
    let mut summaries: Vec<GroupSummary> = (0..n_groups)
        .map(|_| GroupSummary {
            size: 0,
            means: Array1::zeros(records.ncols()),
        })
        .collect();

    for (row, &label) in records.axis_iter(Axis(0)).zip(labels) {
        summaries[label].means += &row;
        summaries[label].size += 1;
    }
    for summary in &mut summaries {
        if summary.size > 0 {
            summary.means /= summary.size as f64;
        }
    }
    summaries
}

pub struct Report<W: Write> {
    out: W,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Report { out }
    }

    /// Descriptive statistics per variable plus a preview of the first rows.
    pub fn data_summary(&mut self, dataset: &Dataset) -> io::Result<()> {
        self.section("Summary of Input Data")?;
        writeln!(self.out, "Number of observations: {}", dataset.n_observations())?;
        writeln!(self.out, "Number of variables:    {}", dataset.n_variables())?;
        writeln!(self.out)?;

        let width = name_width(dataset.names());
        writeln!(
            self.out,
            "{:<width$} {:>7} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
            "variable", "count", "mean", "std", "min", "25%", "50%", "75%", "max",
        )?;
        for summary in dataset.describe() {
            writeln!(
                self.out,
                "{:<width$} {:>7} {:>8.3} {:>8.3} {:>8.3} {:>8.3} {:>8.3} {:>8.3} {:>8.3}",
                summary.name,
                summary.count,
                summary.mean,
                summary.std,
                summary.min,
                summary.q25,
                summary.median,
                summary.q75,
                summary.max,
            )?;
        }

        writeln!(self.out)?;
        writeln!(self.out, "First observations:")?;
        for row in dataset.head(5).rows() {
            let cells: Vec<String> = row.iter().map(|v| format!("{v:>5.1}")).collect();
            writeln!(self.out, "{}", cells.join(" "))?;
        }
        Ok(())
    }

    /// Variable names grouped by the cluster they were assigned to, with
    /// the silhouette score of the solution.
    pub fn variable_clusters(
        &mut self,
        names: &[String],
        labels: &[usize],
        score: f64,
    ) -> io::Result<()> {
        self.section("K-means Cluster Analysis of Variables")?;
        let n_clusters = labels.iter().max().map_or(0, |m| m + 1);
        for cluster in 0..n_clusters {
            let members: Vec<&str> = names
                .iter()
                .zip(labels)
                .filter(|(_, &label)| label == cluster)
                .map(|(name, _)| name.as_str())
                .collect();
            writeln!(self.out, "cluster {}: {}", cluster, members.join(", "))?;
        }
        writeln!(self.out)?;
        writeln!(
            self.out,
            "Silhouette coefficient for the {n_clusters}-cluster solution: {score:.4}"
        )
    }

    /// One line per candidate cluster count; the human picks the best k.
    pub fn sweep(&mut self, scores: &[(usize, f64)]) -> io::Result<()> {
        self.section("Searching for the Number of Student Segments")?;
        writeln!(self.out, "{:>4} {:>12}", "k", "silhouette")?;
        for (k, score) in scores {
            writeln!(self.out, "{k:>4} {score:>12.4}")?;
        }
        Ok(())
    }

    /// Size and unstandardized attribute means for each final segment.
    pub fn segment_summary(
        &mut self,
        dataset: &Dataset,
        labels: &[usize],
        n_segments: usize,
    ) -> io::Result<()> {
        self.section(&format!("Solution for {n_segments} Student Segments"))?;
        let width = name_width(dataset.names());
        for (segment, summary) in group_means(dataset.records(), labels, n_segments)
            .iter()
            .enumerate()
        {
            writeln!(
                self.out,
                "Attribute means for segment {} ({} observations):",
                segment, summary.size
            )?;
            if summary.size == 0 {
                writeln!(self.out, "  (empty segment)")?;
            } else {
                for (name, mean) in dataset.names().iter().zip(&summary.means) {
                    writeln!(self.out, "  {name:<width$} {mean:>8.3}")?;
                }
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn section(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "----- {title} -----")?;
        writeln!(self.out)
    }
}

fn name_width(names: &[String]) -> usize {
    names.iter().map(|n| n.len()).max().unwrap_or(8).max(8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn group_means_match_hand_computed_averages() {
        let records = array![[1., 2.], [3., 4.], [5., 6.], [7., 8.]];
        let labels = [0, 1, 0, 1];
        let summaries = group_means(records.view(), &labels, 2);

        assert_eq!(summaries[0].size, 2);
        assert_abs_diff_eq!(summaries[0].means, array![3., 4.]);
        assert_eq!(summaries[1].size, 2);
        assert_abs_diff_eq!(summaries[1].means, array![5., 6.]);
    }

    #[test]
    fn group_means_tolerate_empty_groups() {
        let records = array![[1., 1.], [3., 3.]];
        let labels = [2, 2];
        let summaries = group_means(records.view(), &labels, 3);
        assert_eq!(summaries[0].size, 0);
        assert_eq!(summaries[2].size, 2);
        assert_abs_diff_eq!(summaries[2].means, array![2., 2.]);
    }

    #[test]
    fn variable_cluster_listing_groups_names() {
        let names: Vec<String> = ["distant", "talkative", "shy"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut buf = Vec::new();
        Report::new(&mut buf)
            .variable_clusters(&names, &[0, 1, 0], 0.42)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("cluster 0: distant, shy"));
        assert!(text.contains("cluster 1: talkative"));
        assert!(text.contains("0.4200"));
    }

    #[test]
    fn segment_summary_prints_raw_means() {
        let dataset = Dataset::new(
            vec!["a".into(), "b".into()],
            array![[1., 10.], [3., 30.], [5., 50.], [7., 70.]],
        )
        .unwrap();
        let mut buf = Vec::new();
        Report::new(&mut buf)
            .segment_summary(&dataset, &[0, 0, 1, 1], 2)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("segment 0 (2 observations)"));
        assert!(text.contains("2.000"));
        assert!(text.contains("20.000"));
        assert!(text.contains("6.000"));
        assert!(text.contains("60.000"));
    }
}
