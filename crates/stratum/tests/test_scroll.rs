//! Integration tests for containment and scroll clamping.

#[cfg(test)]
mod tests {
    use stratum::{
        Control, Identity, Result, UiContext,
        geom::{Point, Rect},
        testing::Harness,
    };

    /// A control that does nothing.
    struct Plain;
    impl Control for Plain {}

    fn id(n: u32) -> Identity {
        Identity::from_raw(n)
    }

    /// A 100x100 container at the origin holding one child of the given
    /// height.
    fn container(ui: &mut UiContext, content_height: f32) -> Result<()> {
        ui.start(id(1), Plain)?;
        ui.rect(Rect::new(0.0, 0.0, 100.0, 100.0))?;
        ui.start(id(2), Plain)?;
        ui.rect(Rect::new(0.0, 0.0, 100.0, content_height))?;
        ui.end()?;
        ui.end()
    }

    fn set_scroll(h: &mut Harness, offset: Point) -> Result<()> {
        h.ui_mut().instance_mut(id(1))?.inner_scroll = offset;
        Ok(())
    }

    fn scroll(h: &Harness) -> Result<Point> {
        Ok(h.ui().instance(id(1))?.inner_scroll)
    }

    #[test]
    fn offset_is_clamped_to_the_overflow() -> Result<()> {
        let mut h = Harness::new();
        h.frame(|ui| container(ui, 300.0))?;
        let bounds = h.ui().instance(id(1))?.rects.computed_scroll_bounds;
        assert_eq!(bounds, Some(Rect::new(0.0, -200.0, 0.0, 0.0)));

        set_scroll(&mut h, Point::new(0.0, -500.0))?;
        h.frame(|ui| container(ui, 300.0))?;
        assert_eq!(scroll(&h)?, Point::new(0.0, -200.0));
        let child = h.ui().instance(id(2))?.rects.computed_global;
        assert_eq!(child, Rect::new(0.0, -200.0, 100.0, 100.0));

        set_scroll(&mut h, Point::new(0.0, 50.0))?;
        h.frame(|ui| container(ui, 300.0))?;
        assert_eq!(scroll(&h)?, Point::zero());
        Ok(())
    }

    #[test]
    fn in_range_offsets_are_kept() -> Result<()> {
        let mut h = Harness::new();
        h.frame(|ui| container(ui, 300.0))?;
        set_scroll(&mut h, Point::new(0.0, -120.0))?;
        h.frames(2, |ui| container(ui, 300.0))?;
        assert_eq!(scroll(&h)?, Point::new(0.0, -120.0));
        Ok(())
    }

    #[test]
    fn shrinking_content_resets_the_offset() -> Result<()> {
        let mut h = Harness::new();
        h.frame(|ui| container(ui, 300.0))?;
        set_scroll(&mut h, Point::new(0.0, -150.0))?;
        h.frame(|ui| container(ui, 300.0))?;
        assert_eq!(scroll(&h)?, Point::new(0.0, -150.0));

        h.frame(|ui| container(ui, 80.0))?;
        assert_eq!(scroll(&h)?, Point::zero());
        assert_eq!(h.ui().instance(id(1))?.rects.computed_scroll_bounds, None);
        Ok(())
    }

    #[test]
    fn leaf_nodes_never_scroll() -> Result<()> {
        let mut h = Harness::new();
        h.frame(|ui| container(ui, 300.0))?;
        h.ui_mut().instance_mut(id(2))?.inner_scroll = Point::new(-10.0, -10.0);
        h.frame(|ui| container(ui, 300.0))?;
        assert_eq!(h.ui().instance(id(2))?.inner_scroll, Point::zero());
        Ok(())
    }

    #[test]
    fn scroll_offsets_accumulate_through_nesting() -> Result<()> {
        let mut h = Harness::new();
        let declare = |ui: &mut UiContext| -> Result<()> {
            ui.start(id(1), Plain)?;
            ui.rect(Rect::new(0.0, 0.0, 100.0, 100.0))?;
            ui.start(id(2), Plain)?;
            ui.rect(Rect::new(0.0, 0.0, 100.0, 300.0))?;
            ui.start(id(3), Plain)?;
            ui.rect(Rect::new(0.0, 0.0, 100.0, 600.0))?;
            ui.end()?;
            ui.end()?;
            ui.end()
        };
        h.frame(declare)?;
        h.ui_mut().instance_mut(id(1))?.inner_scroll = Point::new(0.0, -50.0);
        h.ui_mut().instance_mut(id(2))?.inner_scroll = Point::new(0.0, -100.0);
        h.frame(declare)?;
        let leaf = h.ui().instance(id(3))?.rects.computed_global;
        assert_eq!(leaf.min_y, -150.0);
        Ok(())
    }
}
