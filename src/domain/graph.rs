//! Transfer Graph Aggregation
//!
//! Folds raw transfers touching a center wallet into nodes and links.
//! Output order is fully determined by the input set, so identical scans
//! always serialize to identical JSON.

use std::collections::BTreeMap;

use super::report::{GraphLink, GraphNode, GraphResult, TransferEvent};

/// Links kept per graph (largest by value)
pub const MAX_GRAPH_LINKS: usize = 250;

#[derive(Default)]
struct NodeAcc {
    inflow: f64,
    outflow: f64,
    tx_count: u32,
}

/// Aggregate transfers where `center` is the sender or the receiver.
///
/// Self-transfers and zero amounts are ignored. The center node is always
/// first when it took part in at least one transfer.
pub fn aggregate_transfers(
    center: &str,
    transfers: &[TransferEvent],
    from_block: Option<u64>,
    to_block: Option<u64>,
) -> GraphResult {
    let mut links: BTreeMap<(String, String), (f64, u32)> = BTreeMap::new();

    for t in transfers {
        if t.from == t.to || t.amount <= 0.0 {
            continue;
        }
        if t.from != center && t.to != center {
            continue;
        }
        let entry = links
            .entry((t.from.clone(), t.to.clone()))
            .or_insert((0.0, 0));
        entry.0 += t.amount;
        entry.1 += 1;
    }

    let mut links: Vec<GraphLink> = links
        .into_iter()
        .map(|((source, target), (value, count))| GraphLink {
            source,
            target,
            value,
            count,
        })
        .collect();
    links.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.source.cmp(&b.source))
            .then_with(|| a.target.cmp(&b.target))
    });
    links.truncate(MAX_GRAPH_LINKS);

    let mut nodes: BTreeMap<&str, NodeAcc> = BTreeMap::new();
    for link in &links {
        let src = nodes.entry(link.source.as_str()).or_default();
        src.outflow += link.value;
        src.tx_count += link.count;
        let dst = nodes.entry(link.target.as_str()).or_default();
        dst.inflow += link.value;
        dst.tx_count += link.count;
    }

    let mut nodes: Vec<GraphNode> = nodes
        .into_iter()
        .map(|(id, acc)| GraphNode {
            id: id.to_string(),
            inflow: acc.inflow,
            outflow: acc.outflow,
            tx_count: acc.tx_count,
        })
        .collect();
    nodes.sort_by(|a, b| {
        (b.id == center)
            .cmp(&(a.id == center))
            .then_with(|| (b.inflow + b.outflow).total_cmp(&(a.inflow + a.outflow)))
            .then_with(|| a.id.cmp(&b.id))
    });

    GraphResult {
        from_block,
        to_block,
        nodes,
        links,
    }
}
