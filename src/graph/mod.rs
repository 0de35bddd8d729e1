use itertools::Itertools;
use petgraph::graph::NodeIndex;

use crate::circuit::ComponentId;
use crate::resolve::DependencyMap;

pub mod graphviz;

impl DependencyMap {
    // edges run from a source to the component it feeds
    pub fn to_petgraph(&self) -> petgraph::Graph<(), ()> {
        self.into()
    }

    pub fn has_cycle(&self) -> bool {
        petgraph::algo::is_cyclic_directed(&self.to_petgraph())
    }

    /// Every group of components that feed each other, each sorted by id.
    /// A propagation run over one of these may oscillate.
    pub fn cycles(&self) -> Vec<Vec<ComponentId>> {
        let graph = self.to_petgraph();

        petgraph::algo::tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
            .map(|scc| scc.into_iter().map(|index| index.index()).sorted().collect_vec())
            .sorted()
            .collect_vec()
    }

    pub fn consumers(&self, id: ComponentId) -> Vec<ComponentId> {
        self.listeners(id)
            .iter()
            .map(|listener| listener.component)
            .unique()
            .collect_vec()
    }
}

impl From<&DependencyMap> for petgraph::Graph<(), ()> {
    fn from(value: &DependencyMap) -> Self {
        let mut graph = petgraph::Graph::<(), ()>::with_capacity(value.len(), value.len() * 2);

        for _ in 0..value.len() {
            graph.add_node(());
        }

        for (id, dependency) in value.iter().enumerate() {
            // sources outside the circuit have no node; compile rejects them
            for &source in dependency.sources.iter().unique().filter(|&&s| s < value.len()) {
                graph.add_edge(NodeIndex::new(source), NodeIndex::new(id), ());
            }
        }

        graph
    }
}

#[cfg(test)]
mod tests {
    use crate::resolve::DependencyMap;

    #[test]
    fn unittest_acyclic_chain() {
        let map = DependencyMap::from_sources(vec![vec![], vec![0], vec![1], vec![1, 2]]);

        assert!(!map.has_cycle());
        assert!(map.cycles().is_empty());
        assert_eq!(map.consumers(1), vec![2, 3]);
    }

    #[test]
    fn unittest_cycles_grouped() {
        // 1 <-> 2 loop, 3 feeds itself, 0 and 4 hang off the side
        let map = DependencyMap::from_sources(vec![vec![], vec![0, 2], vec![1], vec![3], vec![2]]);

        assert!(map.has_cycle());
        assert_eq!(map.cycles(), vec![vec![1, 2], vec![3]]);
    }

    #[test]
    fn unittest_unknown_source_has_no_edge() {
        let map = DependencyMap::from_sources(vec![vec![], vec![0, 9]]);
        let graph = map.to_petgraph();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(!map.has_cycle());
    }
}
