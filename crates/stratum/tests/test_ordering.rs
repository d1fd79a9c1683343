//! Integration tests for sibling ordering, paint order and hit-testing.

#[cfg(test)]
mod tests {
    use stratum::{
        CaptureFlags, Color, Control, ControlParams, ControlState, DrawCommand, Identity, RenderParams,
        Result, UiContext,
        geom::{Point, Rect},
        testing::Harness,
    };

    /// Draws its tag and claims hover over its whole rectangle.
    struct Probe(&'static str);

    impl Control for Probe {
        fn on_process(&mut self, p: &mut ControlParams<'_>) -> Result<()> {
            p.instance.rects.raycast = Some(p.instance.rects.computed_global);
            p.instance.capture_flags = CaptureFlags::HOVER;
            Ok(())
        }

        fn on_render(&mut self, p: &mut RenderParams<'_>) -> Result<()> {
            p.painter.text(Point::zero(), self.0, 12.0, Color::WHITE);
            Ok(())
        }
    }

    fn id(n: u32) -> Identity {
        Identity::from_raw(n)
    }

    fn probe(ui: &mut UiContext, n: u32, tag: &'static str) -> Result<()> {
        ui.start(id(n), Probe(tag))?;
        ui.rect(Rect::new(0.0, 0.0, 100.0, 100.0))?;
        Ok(())
    }

    /// Tags in the order a host would paint them.
    fn painted(h: &Harness) -> Vec<String> {
        h.sink()
            .painted()
            .into_iter()
            .filter_map(|(_, c)| match c {
                DrawCommand::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn siblings_follow_identity_order() -> Result<()> {
        let mut h = Harness::new();
        h.frame(|ui| {
            probe(ui, 5, "five")?;
            ui.end()?;
            probe(ui, 3, "three")?;
            ui.end()
        })?;
        assert_eq!(h.ui().children(Identity::ROOT)?, vec![id(3), id(5)]);
        assert_eq!(painted(&h), vec!["three", "five"]);

        let three = h.ui().node(id(3))?;
        let five = h.ui().node(id(5))?;
        assert!(three.computed_global_order < five.computed_global_order);
        assert_eq!((three.sibling_index, five.sibling_index), (0, 1));
        Ok(())
    }

    #[test]
    fn requested_order_moves_a_node_first() -> Result<()> {
        let mut h = Harness::new();
        h.frame(|ui| {
            probe(ui, 3, "three")?;
            ui.end()?;
            probe(ui, 5, "five")?;
            ui.order(-1)?;
            ui.end()
        })?;
        assert_eq!(painted(&h), vec!["five", "three"]);
        Ok(())
    }

    #[test]
    fn descendants_paint_after_ancestors() -> Result<()> {
        let mut h = Harness::new();
        h.frame(|ui| {
            probe(ui, 3, "parent")?;
            probe(ui, 9, "child")?;
            ui.end()?;
            ui.end()?;
            probe(ui, 5, "sibling")?;
            ui.end()
        })?;
        assert_eq!(painted(&h), vec!["parent", "child", "sibling"]);
        Ok(())
    }

    #[test]
    fn always_on_top_paints_last() -> Result<()> {
        let mut h = Harness::new();
        h.frame(|ui| {
            probe(ui, 3, "popup")?;
            ui.always_on_top()?;
            probe(ui, 4, "popup child")?;
            ui.end()?;
            ui.end()?;
            probe(ui, 5, "five")?;
            probe(ui, 6, "six")?;
            ui.end()?;
            ui.end()
        })?;
        assert_eq!(painted(&h), vec!["five", "six", "popup", "popup child"]);

        let popup = h.ui().node(id(3))?;
        let six = h.ui().node(id(6))?;
        assert!(popup.always_on_top);
        assert!(popup.computed_global_order > six.computed_global_order);
        assert!(popup.chronological_position < six.chronological_position);
        Ok(())
    }

    #[test]
    fn topmost_overlapping_node_is_hovered() -> Result<()> {
        let mut h = Harness::new();
        let declare = |ui: &mut UiContext| -> Result<()> {
            probe(ui, 3, "under")?;
            ui.end()?;
            probe(ui, 5, "over")?;
            ui.end()
        };
        h.move_to(Point::new(50.0, 50.0));
        h.frames(2, declare)?;
        assert_eq!(h.ui().hovered(), Some(id(5)));
        assert!(h.ui().instance(id(5))?.state.contains(ControlState::HOVER));
        assert!(h.ui().instance(id(3))?.state.is_empty());
        Ok(())
    }

    #[test]
    fn overlay_wins_hover_over_later_siblings() -> Result<()> {
        let mut h = Harness::new();
        h.move_to(Point::new(50.0, 50.0));
        h.frame(|ui| {
            probe(ui, 3, "popup")?;
            ui.always_on_top()?;
            ui.end()?;
            probe(ui, 5, "five")?;
            ui.end()
        })?;
        assert_eq!(h.ui().hovered(), Some(id(3)));
        Ok(())
    }
}
