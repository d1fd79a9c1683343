//! Integration tests for the layout pass.

#[cfg(test)]
mod tests {
    use stratum::{
        Control, Identity, Result, UiContext,
        geom::Rect,
        layout::{FitHeight, StickRight, VerticalLayout},
        testing::Harness,
    };

    /// A control that does nothing.
    struct Plain;
    impl Control for Plain {}

    fn id(n: u32) -> Identity {
        Identity::from_raw(n)
    }

    fn intermediate(h: &Harness, n: u32) -> Result<Rect> {
        Ok(h.ui().instance(id(n))?.rects.intermediate)
    }

    /// A vertical stack under node 100 holding children with the given
    /// identities and heights.
    fn stack(ui: &mut UiContext, children: &[(u32, f32)]) -> Result<()> {
        ui.start(id(100), Plain)?;
        ui.rect(Rect::new(0.0, 0.0, 200.0, 400.0))?;
        ui.children_layout(VerticalLayout)?;
        for (n, height) in children {
            ui.start(id(*n), Plain)?;
            ui.size(50.0, *height)?;
            ui.end()?;
        }
        ui.end()
    }

    #[test]
    fn vertical_stacking_offsets() -> Result<()> {
        let mut h = Harness::new();
        h.frame(|ui| stack(ui, &[(1, 10.0), (2, 20.0), (3, 30.0)]))?;
        assert_eq!(intermediate(&h, 1)?, Rect::new(0.0, 0.0, 50.0, 10.0));
        assert_eq!(intermediate(&h, 2)?, Rect::new(0.0, 15.0, 50.0, 35.0));
        assert_eq!(intermediate(&h, 3)?, Rect::new(0.0, 40.0, 50.0, 70.0));
        Ok(())
    }

    #[test]
    fn stacking_skips_children_that_are_not_declared() -> Result<()> {
        let mut h = Harness::new();
        h.frame(|ui| stack(ui, &[(1, 10.0), (2, 20.0), (3, 30.0)]))?;
        h.frame(|ui| stack(ui, &[(1, 10.0), (3, 30.0)]))?;
        assert_eq!(intermediate(&h, 3)?, Rect::new(0.0, 15.0, 50.0, 45.0));
        assert_eq!(intermediate(&h, 2)?, Rect::new(0.0, 15.0, 50.0, 35.0));
        Ok(())
    }

    #[test]
    fn layout_is_a_fixed_point_across_frames() -> Result<()> {
        let mut h = Harness::new();
        let declare = |ui: &mut UiContext| -> Result<()> {
            ui.start(id(100), Plain)?;
            ui.rect(Rect::new(0.0, 0.0, 200.0, 400.0))?;
            ui.children_layout(VerticalLayout)?;
            for n in 1..=3 {
                ui.start(id(n), Plain)?;
                ui.size(50.0, 10.0 * n as f32)?;
                ui.constraint(StickRight)?;
                ui.end()?;
            }
            ui.end()
        };
        h.frame(declare)?;
        let first: Vec<Rect> = (1..=3).map(|n| intermediate(&h, n)).collect::<Result<_>>()?;
        h.frames(3, declare)?;
        let later: Vec<Rect> = (1..=3).map(|n| intermediate(&h, n)).collect::<Result<_>>()?;
        assert_eq!(first, later);
        assert_eq!(first[1], Rect::new(145.0, 15.0, 195.0, 35.0));
        Ok(())
    }

    #[test]
    fn children_layout_sees_rectangles_before_child_constraints() -> Result<()> {
        let mut h = Harness::new();
        h.frame(|ui| {
            ui.start(id(100), Plain)?;
            ui.rect(Rect::new(0.0, 0.0, 200.0, 400.0))?;
            ui.children_layout(VerticalLayout)?;

            ui.start(id(1), Plain)?;
            ui.size(50.0, 10.0)?;
            ui.constraint(FitHeight)?;
            ui.end()?;

            ui.start(id(2), Plain)?;
            ui.size(50.0, 20.0)?;
            ui.end()?;

            ui.end()
        })?;
        assert_eq!(intermediate(&h, 1)?, Rect::new(0.0, 5.0, 50.0, 395.0));
        assert_eq!(intermediate(&h, 2)?, Rect::new(0.0, 15.0, 50.0, 35.0));
        Ok(())
    }

    #[test]
    fn queues_are_replaced_on_redeclaration() -> Result<()> {
        let mut h = Harness::new();
        h.frame(|ui| {
            ui.start(id(1), Plain)?;
            ui.rect(Rect::new(0.0, 0.0, 50.0, 10.0))?;
            ui.constraint(StickRight)?;
            ui.end()
        })?;
        assert_eq!(intermediate(&h, 1)?.min_x, 745.0);

        h.frame(|ui| {
            ui.start(id(1), Plain)?;
            ui.end()
        })?;
        assert_eq!(intermediate(&h, 1)?, Rect::new(0.0, 0.0, 50.0, 10.0));
        Ok(())
    }

    #[test]
    fn global_rectangles_follow_the_parent() -> Result<()> {
        let mut h = Harness::new();
        h.frame(|ui| {
            ui.start(id(1), Plain)?;
            ui.rect(Rect::new(100.0, 50.0, 300.0, 250.0))?;
            ui.start(id(2), Plain)?;
            ui.rect(Rect::new(10.0, 20.0, 30.0, 40.0))?;
            ui.end()?;
            ui.end()
        })?;
        let global = h.ui().instance(id(2))?.rects.computed_global;
        assert_eq!(global, Rect::new(110.0, 70.0, 130.0, 90.0));
        Ok(())
    }
}
