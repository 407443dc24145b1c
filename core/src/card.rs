use core::f64::consts::{FRAC_PI_2, PI};
use serde::{Deserialize, Serialize};

use crate::*;

/// A single tile on the board.
///
/// `flip_progress` is the rotation angle in `[0, π]`: `0` shows the back, `π` the front. At rest it always agrees
/// with `revealed`; intermediate values only exist while a [`Flip`] is running.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    position: Point,
    size: Size,
    stack_order: CellCount,
    face: FaceId,
    revealed: bool,
    flip_progress: f64,
}

impl Card {
    pub const fn new(position: Point, size: Size, stack_order: CellCount, face: FaceId) -> Self {
        Self {
            position,
            size,
            stack_order,
            face,
            revealed: false,
            flip_progress: 0.,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn stack_order(&self) -> CellCount {
        self.stack_order
    }

    pub fn face(&self) -> FaceId {
        self.face
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn flip_progress(&self) -> f64 {
        self.flip_progress
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    pub fn center(&self) -> Point {
        self.rect().center()
    }

    /// Hit testing ignores the flip and always uses the static rectangle.
    pub fn hit_test(&self, point: Point) -> bool {
        self.rect().contains(point)
    }

    pub fn shows_back(&self) -> bool {
        self.flip_progress <= FRAC_PI_2
    }

    pub fn is_at_rest(&self) -> bool {
        self.flip_progress == rest_angle(self.revealed)
    }

    pub(crate) fn set_flip_progress(&mut self, angle: f64) {
        self.flip_progress = angle.clamp(0., PI);
    }

    pub(crate) fn settle(&mut self, revealed: bool) {
        self.revealed = revealed;
        self.flip_progress = rest_angle(revealed);
    }

    /// Draws the card at its current flip progress, compressing it horizontally around its own center.
    pub fn render<S, F>(&self, surface: &mut S, images: &F, style: &CardStyle)
    where
        S: Surface,
        F: FaceImages<S::Image> + ?Sized,
    {
        let center = self.center();
        let rect = self.rect();

        surface.save();
        surface.translate(center.x, center.y);
        surface.scale(self.flip_progress.cos().abs(), 1.);
        surface.translate(-center.x, -center.y);

        if self.shows_back() {
            surface.fill_path(&Path::rounded_rect(rect, style.corner_radius), style.back);
            let glyph = Path::heart(
                center.x,
                rect.origin.y + rect.size.height / 3.,
                rect.size.width / 2.,
            );
            surface.fill_path(&glyph, style.glyph);
        } else {
            match images.face_image(self.face) {
                Some(image) => surface.draw_image(image, rect),
                None => {
                    log::trace!("no image for face {}, drawing placeholder", self.face);
                    surface.fill_path(&Path::rect(rect), style.placeholder);
                }
            }
        }

        surface.restore();
    }
}

pub(crate) const fn rest_angle(revealed: bool) -> f64 {
    if revealed { PI } else { 0. }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn card() -> Card {
        Card::new(Point::new(10., 10.), Size::new(100., 150.), 0, 3)
    }

    #[test]
    fn hit_test_includes_boundary_and_excludes_one_unit_outside() {
        let card = card();

        assert!(card.hit_test(Point::new(10., 10.)));
        assert!(card.hit_test(Point::new(110., 160.)));
        assert!(card.hit_test(Point::new(60., 85.)));
        assert!(!card.hit_test(Point::new(9., 85.)));
        assert!(!card.hit_test(Point::new(111., 85.)));
        assert!(!card.hit_test(Point::new(60., 9.)));
        assert!(!card.hit_test(Point::new(60., 161.)));
    }

    #[test]
    fn hit_test_ignores_flip_progress() {
        let mut card = card();
        card.set_flip_progress(FRAC_PI_2);

        assert!(card.hit_test(Point::new(10., 10.)));
    }

    #[test]
    fn face_down_card_draws_uncompressed_back() {
        let mut list = DrawList::<&str>::new();
        card().render(&mut list, &NoImages, &CardStyle::default());

        let commands = list.take();
        assert_eq!(commands[0], DrawCommand::Save);
        assert_eq!(commands[1], DrawCommand::Translate(60., 85.));
        assert_eq!(commands[2], DrawCommand::Scale(1., 1.));
        assert_eq!(commands[3], DrawCommand::Translate(-60., -85.));
        assert!(matches!(commands[4], DrawCommand::FillPath(_, color) if color == Color::BLUE));
        assert!(matches!(commands[5], DrawCommand::FillPath(_, color) if color == Color::RED));
        assert_eq!(commands[6], DrawCommand::Restore);
        assert_eq!(commands.len(), 7);
    }

    #[test]
    fn revealed_card_draws_front_image() {
        let mut card = card();
        card.settle(true);
        let images = BTreeMap::<FaceId, &str>::from([(3, "three.jpg")]);

        let mut list = DrawList::new();
        card.render(&mut list, &images, &CardStyle::default());

        let commands = list.take();
        assert!(matches!(commands[2], DrawCommand::Scale(sx, _) if (sx - 1.).abs() < 1e-12));
        assert_eq!(commands[4], DrawCommand::DrawImage("three.jpg", card.rect()));
    }

    #[test]
    fn past_midpoint_front_is_compressed_but_not_mirrored() {
        let mut card = card();
        card.set_flip_progress(PI * 2. / 3.);

        let mut list = DrawList::<&str>::new();
        card.render(&mut list, &NoImages, &CardStyle::default());

        let commands = list.take();
        assert!(matches!(commands[2], DrawCommand::Scale(sx, sy) if (sx - 0.5).abs() < 1e-9 && sy == 1.));
        assert!(matches!(commands[4], DrawCommand::FillPath(_, color) if color == Color::GRAY));
    }

    #[test]
    fn settle_keeps_rest_invariant() {
        let mut card = card();
        assert!(card.is_at_rest());

        card.set_flip_progress(1.);
        assert!(!card.is_at_rest());

        card.settle(true);
        assert!(card.is_revealed());
        assert_eq!(card.flip_progress(), PI);
        assert!(card.is_at_rest());
    }
}
