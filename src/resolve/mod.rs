//! Connectivity resolution: turns the spatial layout of components into a
//! per-component list of upstream sources.

use std::collections::{HashSet, VecDeque};

use itertools::Itertools;

use crate::circuit::{overlap, Component, ComponentId, ComponentKind};
use crate::config::{CyclePolicy, GateOverflow, SimulationConfig};
use crate::error::ConfigurationError;

// 부품 하나의 상위 연결 정보
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Dependency {
    // 0..=2 sources, slot order
    pub sources: Vec<ComponentId>,
    pub connected: bool,
}

impl Dependency {
    pub fn new(sources: Vec<ComponentId>) -> Self {
        Self {
            connected: !sources.is_empty(),
            sources,
        }
    }
}

/// A connector that must be told when the component it listens to changes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Listener {
    pub component: ComponentId,
    pub connector: usize,
}

/// An input-capable connector that overlaps nothing. The slot it feeds reads
/// a constant low.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UnresolvedConnection {
    pub component: ComponentId,
    pub connector: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, derive_more::Deref)]
pub struct DependencyMap {
    #[deref]
    dependencies: Vec<Dependency>,
    listeners: Vec<Vec<Listener>>,
    unresolved: Vec<UnresolvedConnection>,
}

impl DependencyMap {
    fn with_len(len: usize) -> Self {
        Self {
            dependencies: vec![Dependency::default(); len],
            listeners: vec![Vec::new(); len],
            unresolved: Vec::new(),
        }
    }

    /// Builds a mapping directly from source lists, bypassing geometry.
    pub fn from_sources(sources: Vec<Vec<ComponentId>>) -> Self {
        let mut map = Self::with_len(sources.len());

        for (id, sources) in sources.into_iter().enumerate() {
            for &source in &sources {
                if let Some(listeners) = map.listeners.get_mut(source) {
                    listeners.push(Listener {
                        component: id,
                        connector: 0,
                    });
                }
            }
            map.dependencies[id] = Dependency::new(sources);
        }

        map
    }

    pub fn sources(&self, id: ComponentId) -> &[ComponentId] {
        &self.dependencies[id].sources
    }

    pub fn listeners(&self, id: ComponentId) -> &[Listener] {
        &self.listeners[id]
    }

    pub fn unresolved(&self) -> &[UnresolvedConnection] {
        &self.unresolved
    }
}

// 커넥터 겹침 하나: 내 커넥터 `connector`가 `source`의 출력과 겹침
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Match {
    source: ComponentId,
    connector: usize,
}

pub struct Resolver<'a> {
    components: &'a [Component],
    config: SimulationConfig,
}

/// Resolves `components` with the default policies.
pub fn resolve(components: &[Component]) -> Result<DependencyMap, ConfigurationError> {
    Resolver::new(components).resolve()
}

impl<'a> Resolver<'a> {
    pub fn new(components: &'a [Component]) -> Self {
        Self {
            components,
            config: SimulationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn resolve(self) -> Result<DependencyMap, ConfigurationError> {
        let mut map = DependencyMap::with_len(self.components.len());

        for (id, component) in self.components.iter().enumerate() {
            let matches = match component.kind {
                // input state is set by the user, never by propagation
                ComponentKind::Input => continue,
                ComponentKind::Wire => self.visit_wire(id)?,
                ComponentKind::Output => self.visit_output(id)?,
                ComponentKind::Gate(..) => self.visit_gate(id)?,
            };

            map.unresolved.extend(self.unresolved_connectors(id, &matches));

            for m in &matches {
                map.listeners[m.source].push(Listener {
                    component: id,
                    connector: m.connector,
                });
            }

            let sources = matches.iter().map(|m| m.source).collect_vec();
            tracing::debug!("resolved {} #{id}: sources {:?}", component.kind, sources);
            map.dependencies[id] = Dependency::new(sources);
        }

        self.check_cycles(&map)?;

        tracing::info!(
            "resolved {} components, {} unresolved connectors",
            self.components.len(),
            map.unresolved.len()
        );

        Ok(map)
    }

    // every overlap between an input-capable connector of `id` and an
    // output-capable connector of another component, connector order first
    fn direct_matches(&self, id: ComponentId) -> Vec<Match> {
        let component = &self.components[id];

        component
            .connectors
            .iter()
            .enumerate()
            .filter(|(_, c)| c.direction.accepts_input())
            .flat_map(|(index, c)| {
                self.components
                    .iter()
                    .enumerate()
                    .filter(move |(other_id, _)| *other_id != id)
                    .filter(move |(_, other)| {
                        other.connectors.iter().any(|oc| {
                            oc.direction.drives_output()
                                && overlap(component.position, c, other.position, oc)
                        })
                    })
                    .map(move |(other_id, _)| Match {
                        source: other_id,
                        connector: index,
                    })
            })
            .collect_vec()
    }

    fn visit_gate(&self, id: ComponentId) -> Result<Vec<Match>, ConfigurationError> {
        let mut matches = self.direct_matches(id);
        let slots = self.components[id].kind.max_sources();

        if matches.len() > slots {
            let sources = matches.iter().map(|m| m.source).collect_vec();

            match self.config.gate_overflow {
                GateOverflow::FirstTwo => {
                    tracing::warn!(
                        "gate #{id} overlaps sources {:?}, keeping the first {slots}",
                        sources
                    );
                    matches.truncate(slots);
                }
                GateOverflow::Reject => {
                    return Err(ConfigurationError::GateOverconnected {
                        component: id,
                        sources,
                    })
                }
            }
        }

        Ok(matches)
    }

    fn visit_output(&self, id: ComponentId) -> Result<Vec<Match>, ConfigurationError> {
        let matches = self
            .direct_matches(id)
            .into_iter()
            .unique_by(|m| m.source)
            .collect_vec();

        self.single_source(id, matches)
    }

    // wires take their value from the nearest non-wire driver, possibly
    // through a chain of other wires
    fn visit_wire(&self, id: ComponentId) -> Result<Vec<Match>, ConfigurationError> {
        let (drivers, wires): (Vec<Match>, Vec<Match>) = self
            .direct_matches(id)
            .into_iter()
            .unique_by(|m| m.source)
            .partition(|m| !self.components[m.source].kind.is_wire());

        if !drivers.is_empty() {
            return self.single_source(id, drivers);
        }

        let mut visit: HashSet<ComponentId> = HashSet::from([id]);
        let mut queue: VecDeque<Match> = VecDeque::new();

        for m in wires {
            visit.insert(m.source);
            queue.push_back(m);
        }

        while let Some(Match { source: wire, connector }) = queue.pop_front() {
            let next = self.direct_matches(wire);

            if let Some(driver) = next
                .iter()
                .find(|m| !self.components[m.source].kind.is_wire())
            {
                tracing::debug!("wire #{id} driven by #{} through wire #{wire}", driver.source);

                return Ok(vec![Match {
                    source: driver.source,
                    connector,
                }]);
            }

            for m in next {
                if visit.insert(m.source) {
                    queue.push_back(Match {
                        source: m.source,
                        connector,
                    });
                }
            }
        }

        Ok(Vec::new())
    }

    fn single_source(
        &self,
        id: ComponentId,
        matches: Vec<Match>,
    ) -> Result<Vec<Match>, ConfigurationError> {
        if matches.len() > 1 {
            return Err(ConfigurationError::Overconnected {
                component: id,
                kind: self.components[id].kind,
                sources: matches.iter().map(|m| m.source).collect(),
            });
        }

        Ok(matches)
    }

    fn unresolved_connectors(&self, id: ComponentId, matches: &[Match]) -> Vec<UnresolvedConnection> {
        let component = &self.components[id];

        // a wire has one upstream end; it is only unresolved as a whole
        if component.kind.is_wire() && !matches.is_empty() {
            return Vec::new();
        }

        component
            .connectors
            .iter()
            .enumerate()
            .filter(|(index, c)| {
                c.direction.accepts_input() && !matches.iter().any(|m| m.connector == *index)
            })
            .map(|(connector, _)| UnresolvedConnection {
                component: id,
                connector,
            })
            .inspect(|u| tracing::debug!("unresolved connector {} on #{id}", u.connector))
            .collect_vec()
    }

    fn check_cycles(&self, map: &DependencyMap) -> Result<(), ConfigurationError> {
        if self.config.cycle_policy == CyclePolicy::Ignore {
            return Ok(());
        }

        let cycles = map.cycles();

        for cycle in &cycles {
            tracing::warn!("combinational loop through components {:?}", cycle);
        }

        match (self.config.cycle_policy, cycles.into_iter().next()) {
            (CyclePolicy::Reject, Some(cycle)) => Err(ConfigurationError::Cycle(cycle)),
            _ => Ok(()),
        }
    }
}
