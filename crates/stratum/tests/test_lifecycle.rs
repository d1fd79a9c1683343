//! Integration tests for node lifecycle: creation, grace periods, pruning
//! and clearing.

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use stratum::{
        Control, ControlParams, Error, Identity, Phase, RenderParams, Result, UiContext,
        control::Hook,
        testing::Harness,
    };

    /// A control that does nothing.
    struct Plain;
    impl Control for Plain {}

    /// A control that logs every hook it receives.
    struct Logged(Rc<RefCell<Vec<(Identity, Hook)>>>);

    impl Logged {
        /// Append a hook to the log.
        fn log(&self, p: &ControlParams<'_>, hook: Hook) -> Result<()> {
            self.0.borrow_mut().push((p.node.identity, hook));
            Ok(())
        }
    }

    impl Control for Logged {
        fn on_add(&mut self, p: &mut ControlParams<'_>) -> Result<()> {
            self.log(p, Hook::Add)
        }
        fn on_start(&mut self, p: &mut ControlParams<'_>) -> Result<()> {
            self.log(p, Hook::Start)
        }
        fn on_end(&mut self, p: &mut ControlParams<'_>) -> Result<()> {
            self.log(p, Hook::End)
        }
        fn on_remove(&mut self, p: &mut ControlParams<'_>) -> Result<()> {
            self.log(p, Hook::Remove)
        }
    }

    /// A control that records the animation time of every render.
    struct Timed(Rc<RefCell<Vec<f32>>>);

    impl Control for Timed {
        fn on_render(&mut self, p: &mut RenderParams<'_>) -> Result<()> {
            self.0.borrow_mut().push(p.t);
            Ok(())
        }
    }

    fn id(n: u32) -> Identity {
        Identity::from_raw(n)
    }

    fn declare(ui: &mut UiContext, n: u32) -> Result<()> {
        ui.start(id(n), Plain)?;
        ui.dead_time(0.45)?;
        ui.end()
    }

    #[test]
    fn dying_node_stays_queryable_until_grace_period_ends() -> Result<()> {
        let mut h = Harness::new().with_dt(0.1);
        h.frame(|ui| declare(ui, 1))?;
        assert_eq!(h.ui().node(id(1))?.phase, Phase::Alive);

        let mut last = 0.0;
        for _ in 0..4 {
            h.frame(|_| Ok(()))?;
            let info = h.ui().node(id(1))?;
            assert_eq!(info.phase, Phase::Dying);
            assert!(info.seconds_dead > last);
            last = info.seconds_dead;
        }

        let report = h.frame(|_| Ok(()))?;
        assert_eq!(report.pruned, vec![id(1)]);
        assert_eq!(h.ui().node(id(1)), Err(Error::UnknownIdentity(id(1))));
        assert!(h.ui().children(Identity::ROOT)?.is_empty());
        Ok(())
    }

    #[test]
    fn redeclaring_a_dying_node_revives_it() -> Result<()> {
        let mut h = Harness::new().with_dt(0.1);
        h.frame(|ui| declare(ui, 1))?;
        h.frame(|_| Ok(()))?;
        h.frame(|_| Ok(()))?;
        assert!(h.ui().node(id(1))?.seconds_dead > 0.15);

        h.frame(|ui| declare(ui, 1))?;
        let info = h.ui().node(id(1))?;
        assert_eq!(info.phase, Phase::Alive);
        assert_eq!(info.seconds_dead, 0.0);
        assert!(!info.alive_last_frame);

        h.frame(|ui| declare(ui, 1))?;
        assert!(h.ui().node(id(1))?.alive_last_frame);
        Ok(())
    }

    #[test]
    fn animation_time_rises_while_alive() -> Result<()> {
        let mut h = Harness::new().with_dt(0.1);
        let mut seen = Vec::new();
        for _ in 0..7 {
            h.frame(|ui| declare(ui, 1))?;
            seen.push(h.ui().node(id(1))?.animation_time);
        }
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(seen.last().copied(), Some(1.0));

        h.frame(|_| Ok(()))?;
        let t = h.ui().node(id(1))?.animation_time;
        assert!(t > 0.0 && t < 1.0);
        Ok(())
    }

    #[test]
    fn hooks_fire_in_order() -> Result<()> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut h = Harness::new().with_dt(0.2);
        let declare = |ui: &mut UiContext| -> Result<()> {
            ui.start(id(1), Logged(log.clone()))?;
            ui.start(id(2), Logged(log.clone()))?;
            ui.dead_time(0.1)?;
            ui.end()?;
            ui.dead_time(0.1)?;
            ui.end()
        };
        h.frame(declare)?;
        h.frame(declare)?;
        h.frame(|_| Ok(()))?;

        let expected = vec![
            (id(1), Hook::Add),
            (id(1), Hook::Start),
            (id(2), Hook::Add),
            (id(2), Hook::Start),
            (id(2), Hook::End),
            (id(1), Hook::End),
            (id(1), Hook::Start),
            (id(2), Hook::Start),
            (id(2), Hook::End),
            (id(1), Hook::End),
            (id(2), Hook::Remove),
            (id(1), Hook::Remove),
        ];
        assert_eq!(*log.borrow(), expected);
        Ok(())
    }

    #[test]
    fn clear_resets_everything() -> Result<()> {
        let mut h = Harness::new();
        h.frame(|ui| {
            declare(ui, 1)?;
            ui.values_mut().store(id(1), 42_u32);
            Ok(())
        })?;
        assert!(h.ui().contains(id(1)));

        h.ui_mut().clear();
        let ui = h.ui();
        assert_eq!(ui.node_count(), 1);
        assert!(ui.is_empty());
        assert!(!ui.contains(id(1)));
        assert!(ui.values().is_empty());
        assert_eq!(ui.focused(), None);
        assert_eq!(ui.hovered(), None);

        h.frame(|ui| declare(ui, 1))?;
        assert_eq!(h.ui().node(id(1))?.seconds_alive, h.ui().time().delta);
        Ok(())
    }

    #[test]
    fn values_are_dropped_with_their_node() -> Result<()> {
        let mut h = Harness::new().with_dt(0.3);
        h.frame(|ui| {
            declare(ui, 1)?;
            ui.values_mut().store(id(1), 7_i32);
            Ok(())
        })?;
        h.frames(2, |_| Ok(()))?;
        assert!(!h.ui().contains(id(1)));
        assert!(!h.ui().values().has(id(1)));
        Ok(())
    }

    #[test]
    fn render_time_rises_then_falls_while_dying() -> Result<()> {
        let times = Rc::new(RefCell::new(Vec::new()));
        let mut h = Harness::new().with_dt(0.1);
        h.frames(6, |ui| {
            ui.start(id(1), Timed(times.clone()))?;
            ui.dead_time(0.45)?;
            ui.end()
        })?;
        h.frames(6, |_| Ok(()))?;

        let expected = [
            0.1 / 0.45,
            0.2 / 0.45,
            0.3 / 0.45,
            0.4 / 0.45,
            1.0,
            1.0,
            1.0 - 0.1 / 0.45,
            1.0 - 0.2 / 0.45,
            1.0 - 0.3 / 0.45,
            1.0 - 0.4 / 0.45,
        ];
        let times = times.borrow();
        assert_eq!(times.len(), expected.len(), "{times:?}");
        for (got, want) in times.iter().zip(expected) {
            assert!((got - want).abs() < 1e-4, "{times:?}");
        }
        assert!(!h.ui().contains(id(1)));
        Ok(())
    }
}
