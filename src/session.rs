use eyre::{ensure, eyre};

use crate::circuit::{Component, ComponentId};
use crate::config::SimulationConfig;
use crate::resolve::{DependencyMap, Resolver};
use crate::simulator::{RunStatus, Simulator};

/// One simulation session over a fixed set of components.
///
/// Geometry is resolved once in [`Session::connect`]; moving parts afterwards
/// needs a new session.
#[derive(Debug, Clone)]
pub struct Session {
    components: Vec<Component>,
    config: SimulationConfig,
    map: Option<DependencyMap>,
    simulator: Option<Simulator>,
}

impl Session {
    pub fn new(components: Vec<Component>) -> Self {
        Self::with_config(components, SimulationConfig::default())
    }

    pub fn with_config(components: Vec<Component>, config: SimulationConfig) -> Self {
        Self {
            components,
            config,
            map: None,
            simulator: None,
        }
    }

    pub fn connect(&mut self) -> eyre::Result<()> {
        let map = Resolver::new(&self.components)
            .with_config(self.config)
            .resolve()?;
        let simulator = Simulator::compile(&self.components, &map)?;

        self.map = Some(map);
        self.simulator = Some(simulator);

        Ok(())
    }

    pub fn toggle(&mut self, id: ComponentId) -> eyre::Result<()> {
        let component = self
            .components
            .get_mut(id)
            .ok_or_else(|| eyre!("no component #{id}"))?;
        ensure!(
            component.kind.is_input(),
            "component #{id} is {}, only inputs can be toggled",
            component.kind
        );

        component.toggle();
        tracing::info!("toggled input #{id} to {}", component.state);

        if let Some(simulator) = &mut self.simulator {
            simulator.reseed_inputs(&self.components);
        }

        Ok(())
    }

    pub fn step(&mut self) -> eyre::Result<bool> {
        let simulator = self.simulator.as_mut().ok_or_else(not_connected)?;
        let changed = simulator.step();
        simulator.writeback(&mut self.components);

        Ok(changed)
    }

    /// Runs until stable or `max_steps`, then writes the states back.
    pub fn settle(&mut self) -> eyre::Result<RunStatus> {
        let max_steps = self.config.max_steps;
        let simulator = self.simulator.as_mut().ok_or_else(not_connected)?;
        let status = simulator.run(max_steps);
        simulator.writeback(&mut self.components);

        Ok(status)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn state(&self, id: ComponentId) -> Option<bool> {
        self.components.get(id).map(|c| c.state)
    }

    pub fn map(&self) -> Option<&DependencyMap> {
        self.map.as_ref()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

fn not_connected() -> eyre::Report {
    eyre!("session is not connected")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::GateKind;
    use crate::common::Vec2;
    use crate::layout::footprint::{gate, input, line, output};
    use crate::layout::Layout;

    #[test]
    fn unittest_session_toggle_and_settle() -> eyre::Result<()> {
        let mut session = Session::new(Layout::load("test/single_and_gate.json")?.components());

        assert!(session.step().is_err());
        session.connect()?;

        assert_eq!(session.settle()?, RunStatus::Converged { steps: 0 });
        assert_eq!(session.state(3), Some(false));

        session.toggle(1)?;
        session.toggle(2)?;
        assert_eq!(session.settle()?, RunStatus::Converged { steps: 5 });
        assert!(session.components().iter().all(|c| c.state));

        session.toggle(2)?;
        session.settle()?;
        assert_eq!(session.state(0), Some(false));
        assert_eq!(session.state(3), Some(false));
        assert_eq!(session.state(4), Some(true));

        Ok(())
    }

    #[test]
    fn unittest_session_only_inputs_toggle() -> eyre::Result<()> {
        let mut session = Session::new(vec![
            input(Vec2(0., 0.)),
            output(Vec2(36., 0.)),
        ]);
        session.connect()?;

        assert!(session.toggle(1).is_err());
        assert!(session.toggle(7).is_err());

        session.toggle(0)?;
        assert!(session.step()?);
        assert!(session.step()?);
        assert!(!session.step()?);
        assert_eq!(session.state(1), Some(true));

        Ok(())
    }

    #[test]
    fn unittest_session_reports_oscillation() -> eyre::Result<()> {
        let config = SimulationConfig {
            max_steps: 20,
            ..Default::default()
        };
        let mut session = Session::with_config(
            vec![
                gate(GateKind::Nand, Vec2(100., 100.)),
                line(Vec2(150., 100.), Vec2(150., 40.)),
                line(Vec2(150., 40.), Vec2(50., 40.)),
                line(Vec2(50., 40.), Vec2(50., 91.)),
            ],
            config,
        );
        session.connect()?;

        assert_eq!(session.map().map(|m| m.cycles().len()), Some(1));
        assert_eq!(session.settle()?, RunStatus::NonConvergence { steps: 21 });

        Ok(())
    }
}
