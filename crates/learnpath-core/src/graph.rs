use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::schema::DatabaseSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FkGraphSummary {
    pub nodes: usize,
    pub edges: usize,
}

/// Parent-before-child ordering of relations, or the nodes stuck in a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FkGraphReport {
    pub summary: FkGraphSummary,
    pub topo_order: Option<Vec<String>>,
    pub cycle: Option<Vec<String>>,
}

impl FkGraphReport {
    pub fn has_cycle(&self) -> bool {
        self.cycle.is_some()
    }
}

/// Build a deterministic FK dependency report for a snapshot.
///
/// Nodes are `schema.table`; an edge runs from the referenced table to the
/// referencing one, so the order lists parents first.
pub fn build_fk_graph_report(schema: &DatabaseSchema) -> FkGraphReport {
    let graph = build_adjacency(schema);
    let summary = FkGraphSummary {
        nodes: graph.len(),
        edges: graph.values().map(BTreeSet::len).sum(),
    };

    let (topo_order, cycle) = match toposort(&graph) {
        Ok(order) => (Some(order), None),
        Err(stuck) => (None, Some(stuck)),
    };

    FkGraphReport {
        summary,
        topo_order,
        cycle,
    }
}

fn build_adjacency(schema: &DatabaseSchema) -> BTreeMap<String, BTreeSet<String>> {
    let mut graph: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for db_schema in &schema.schemas {
        for table in &db_schema.tables {
            let child = format!("{}.{}", db_schema.name, table.name);
            graph.entry(child.clone()).or_default();

            for fk in table.foreign_keys() {
                let parent = format!("{}.{}", fk.referenced_schema, fk.referenced_table);
                graph.entry(parent).or_default().insert(child.clone());
            }
        }
    }

    graph
}

fn toposort(graph: &BTreeMap<String, BTreeSet<String>>) -> Result<Vec<String>, Vec<String>> {
    let mut indegree: BTreeMap<&str, usize> =
        graph.keys().map(|node| (node.as_str(), 0)).collect();
    for children in graph.values() {
        for child in children {
            *indegree.entry(child.as_str()).or_insert(0) += 1;
        }
    }

    let mut ready: BTreeSet<&str> = indegree
        .iter()
        .filter(|(_, count)| **count == 0)
        .map(|(node, _)| *node)
        .collect();
    let mut order = Vec::with_capacity(graph.len());

    while let Some(node) = ready.pop_first() {
        order.push(node.to_string());

        for child in graph.get(node).into_iter().flatten() {
            if let Some(count) = indegree.get_mut(child.as_str()) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    ready.insert(child.as_str());
                }
            }
        }
    }

    if order.len() == indegree.len() {
        Ok(order)
    } else {
        Err(indegree
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(node, _)| node.to_string())
            .collect())
    }
}
