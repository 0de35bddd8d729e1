use itertools::Itertools;

use crate::circuit::{Component, ComponentId};
use crate::resolve::DependencyMap;

pub struct GraphvizBuilder<'a> {
    components: &'a [Component],
    map: &'a DependencyMap,
    clusters: Option<Vec<(String, Vec<ComponentId>)>>,
}

impl<'a> GraphvizBuilder<'a> {
    pub fn new(components: &'a [Component], map: &'a DependencyMap) -> Self {
        Self {
            components,
            map,
            clusters: None,
        }
    }

    pub fn with_cluster(&mut self, clusters: Vec<(String, Vec<ComponentId>)>) -> &mut Self {
        self.clusters = Some(clusters);
        self
    }

    pub fn build(&self, graph_name: &str) -> String {
        format!(
            r#"
digraph {graph_name} {{
    rankdir=LR
    graph [label="Circuit", splines=line, nodesep=0.8]
    node [shape=record]
{}
{}
{}
}}
        "#,
            self.print_nodes(),
            self.print_edges(),
            self.print_cluster(),
        )
    }

    fn print_nodes(&self) -> String {
        self.components
            .iter()
            .enumerate()
            .map(|(id, component)| Self::print_node(id, component))
            .collect_vec()
            .join("\n")
    }

    fn print_node(id: ComponentId, component: &Component) -> String {
        let state = if component.state { "on" } else { "off" };

        if component.label.is_empty() {
            format!("    node{id} [label=\"#{id} {} | {state}\"]", component.kind)
        } else {
            format!(
                "    node{id} [label=\"#{id} {} | {} | {state}\"]",
                component.kind, component.label
            )
        }
    }

    fn print_edges(&self) -> String {
        (0..self.map.len())
            .filter(|&id| !self.map.consumers(id).is_empty())
            .map(|id| {
                format!(
                    "    node{id}->{{{}}}",
                    self.map
                        .consumers(id)
                        .iter()
                        .map(|consumer| format!("node{consumer}"))
                        .join(" ")
                )
            })
            .collect_vec()
            .join("\n")
    }

    fn print_cluster(&self) -> String {
        let Some(clusters) = &self.clusters else {
            return String::new();
        };

        clusters
            .iter()
            .enumerate()
            .map(|(index, (name, members))| {
                format!(
                    "    subgraph cluster_{index} {{ label=\"{name}\" {} }}",
                    members.iter().map(|id| format!("node{id}")).join(" ")
                )
            })
            .collect_vec()
            .join("\n")
    }
}

pub trait ToGraphviz {
    fn to_graphviz(&self, components: &[Component]) -> String;
}

impl ToGraphviz for DependencyMap {
    // loops are drawn as clusters so they stand out
    fn to_graphviz(&self, components: &[Component]) -> String {
        GraphvizBuilder::new(components, self)
            .with_cluster(
                self.cycles()
                    .into_iter()
                    .enumerate()
                    .map(|(index, members)| (format!("Loop {index}"), members))
                    .collect_vec(),
            )
            .build("Circuit")
    }
}

#[cfg(test)]
mod tests {
    use super::ToGraphviz;
    use crate::circuit::GateKind;
    use crate::common::Vec2;
    use crate::layout::footprint::{gate, input, line};
    use crate::resolve::resolve;

    #[test]
    fn unittest_graphviz_edges_and_loops() -> eyre::Result<()> {
        let components = vec![
            input(Vec2(31., 0.)),
            gate(GateKind::Nand, Vec2(100., 9.)),
            line(Vec2(150., 9.), Vec2(150., 60.)),
            line(Vec2(150., 60.), Vec2(50., 60.)),
            line(Vec2(50., 60.), Vec2(50., 19.)),
        ];
        let map = resolve(&components)?;
        let dot = map.to_graphviz(&components);

        assert!(dot.contains("digraph Circuit"));
        assert!(dot.contains("node0 [label=\"#0 Input | input | off\"]"));
        assert!(dot.contains("node0->{node1}"));
        assert!(dot.contains("subgraph cluster_0 { label=\"Loop 0\" node1 node4 }"));

        Ok(())
    }
}
