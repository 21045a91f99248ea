use cluster_balance::{BatchView, ClusterReport, ClusterRow};
use cluster_models::OperatorId;
use std::fmt::Write;

fn operators(ids: &[OperatorId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn row(operator_ids: &str, balance: &str, runway: &str) -> String {
    format!("{:<24} {:>16}  {}", operator_ids, balance, runway)
}

/// Plain text table of every cluster of an account.
pub fn render_batch(view: &BatchView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Account {} on {} at block {}",
        view.account, view.network, view.block
    );
    if view.clusters.is_empty() {
        out.push_str("No active clusters\n");
        return out;
    }

    let _ = writeln!(out, "{}", row("OPERATORS", "BALANCE (SSV)", "RUNWAY"));
    for cluster in &view.clusters {
        let line = match cluster {
            ClusterRow::Ok(report) => row(
                &operators(&report.operator_ids),
                &report.balance_native,
                &report.runway_label(),
            ),
            ClusterRow::Error { operator_ids, error } => {
                row(&operators(operator_ids), "-", &format!("error: {}", error))
            }
        };
        let _ = writeln!(out, "{}", line);
    }
    if !view.complete {
        out.push_str("Some clusters could not be estimated\n");
    }
    out
}

pub fn render_cluster(report: &ClusterReport) -> String {
    format!(
        "Operators: {}\nBalance:   {} SSV\nRunway:    {}\n",
        operators(&report.operator_ids),
        report.balance_native,
        report.runway_label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cluster_models::{Address, Network};

    fn report(ids: &[u64], balance: &str, blocks: Option<i128>) -> ClusterReport {
        ClusterReport {
            operator_ids: ids.iter().copied().map(OperatorId).collect(),
            balance_native: balance.to_string(),
            runway_blocks: blocks,
            runway_days: blocks.map(|b| b as f64 / 7200.0),
        }
    }

    #[test]
    fn test_batch_table_lists_rows_in_order() {
        let account: Address = "0x00000000000000000000000000000000000000aa".parse().unwrap();
        let view = BatchView {
            account,
            network: Network::Mainnet,
            block: 19_000_000,
            complete: false,
            clusters: vec![
                ClusterRow::Ok(report(&[1, 2, 3, 4], "12.500", Some(72_000))),
                ClusterRow::Error {
                    operator_ids: vec![OperatorId(5), OperatorId(6)],
                    error: "An error occurred while fetching data.".to_string(),
                },
                ClusterRow::Ok(report(&[7], "0.000", None)),
            ],
        };

        let text = render_batch(&view);
        let lines: Vec<_> = text.lines().collect();

        assert!(lines[0].contains("block 19000000"));
        assert!(lines[2].starts_with("1,2,3,4"));
        assert!(lines[2].contains("12.500"));
        assert!(lines[2].contains("10 days (72000 blocks)"));
        assert!(lines[3].starts_with("5,6"));
        assert!(lines[3].contains("error: An error occurred while fetching data."));
        assert!(lines[4].ends_with("unbounded"));
        assert_eq!(lines[5], "Some clusters could not be estimated");
    }

    #[test]
    fn test_empty_account() {
        let account: Address = "0x00000000000000000000000000000000000000aa".parse().unwrap();
        let view = BatchView {
            account,
            network: Network::Holesky,
            block: 1,
            complete: true,
            clusters: Vec::new(),
        };

        assert!(render_batch(&view).ends_with("No active clusters\n"));
    }

    #[test]
    fn test_single_cluster() {
        let text = render_cluster(&report(&[4, 1], "3.142", Some(7_200)));

        assert!(text.contains("Operators: 4,1"));
        assert!(text.contains("3.142 SSV"));
        assert!(text.contains("1 days (7200 blocks)"));
    }
}
