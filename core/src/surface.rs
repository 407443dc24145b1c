use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const RED: Self = Self(0xff, 0x00, 0x00);
    pub const BLUE: Self = Self(0x00, 0x7b, 0xff);
    pub const GRAY: Self = Self(0xcc, 0xcc, 0xcc);

    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { control: Point, to: Point },
    CubicTo { control1: Point, control2: Point, to: Point },
    Close,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    pub fn quad_to(mut self, cx: f64, cy: f64, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::QuadTo {
            control: Point::new(cx, cy),
            to: Point::new(x, y),
        });
        self
    }

    pub fn cubic_to(mut self, c1: (f64, f64), c2: (f64, f64), x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::CubicTo {
            control1: Point::new(c1.0, c1.1),
            control2: Point::new(c2.0, c2.1),
            to: Point::new(x, y),
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn rect(rect: Rect) -> Self {
        let Rect { origin, .. } = rect;
        Self::new()
            .move_to(origin.x, origin.y)
            .line_to(rect.right(), origin.y)
            .line_to(rect.right(), rect.bottom())
            .line_to(origin.x, rect.bottom())
            .close()
    }

    /// Rectangle whose corners are rounded with quadratic curves of `radius`.
    pub fn rounded_rect(rect: Rect, radius: f64) -> Self {
        let (x, y) = (rect.origin.x, rect.origin.y);
        let (right, bottom) = (rect.right(), rect.bottom());
        let r = radius
            .min(rect.size.width / 2.)
            .min(rect.size.height / 2.)
            .max(0.);

        Self::new()
            .move_to(x + r, y)
            .line_to(right - r, y)
            .quad_to(right, y, right, y + r)
            .line_to(right, bottom - r)
            .quad_to(right, bottom, right - r, bottom)
            .line_to(x + r, bottom)
            .quad_to(x, bottom, x, bottom - r)
            .line_to(x, y + r)
            .quad_to(x, y, x + r, y)
            .close()
    }

    /// Heart glyph whose top notch sits at `(x, y)`, `size` wide and tall.
    pub fn heart(x: f64, y: f64, size: f64) -> Self {
        let half = size / 2.;
        let quarter = size / 4.;

        Self::new()
            .move_to(x, y + quarter)
            .cubic_to((x, y), (x - half, y), x - half, y + quarter)
            .cubic_to((x - half, y + half), (x, y + size * 0.75), x, y + size)
            .cubic_to((x, y + size * 0.75), (x + half, y + half), x + half, y + quarter)
            .cubic_to((x + half, y), (x, y), x, y + quarter)
            .close()
    }
}

/// Drawing capability the board renders onto.
pub trait Surface {
    type Image;

    fn clear(&mut self, size: Size);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    /// Rotates clockwise by `angle` radians around the current origin.
    fn rotate(&mut self, angle: f64);
    fn scale(&mut self, sx: f64, sy: f64);
    fn fill_path(&mut self, path: &Path, color: Color);
    fn draw_image(&mut self, image: &Self::Image, rect: Rect);
}

/// Resolves a face identity to something a [`Surface`] can draw.
pub trait FaceImages<I> {
    fn face_image(&self, face: FaceId) -> Option<&I>;
}

impl<I> FaceImages<I> for BTreeMap<FaceId, I> {
    fn face_image(&self, face: FaceId) -> Option<&I> {
        self.get(&face)
    }
}

/// No assets at all, every front face degrades to a placeholder.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoImages;

impl<I> FaceImages<I> for NoImages {
    fn face_image(&self, _face: FaceId) -> Option<&I> {
        None
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand<I> {
    Clear(Size),
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
    Scale(f64, f64),
    FillPath(Path, Color),
    DrawImage(I, Rect),
}

/// Surface that records every call so hosts and tests can replay or inspect a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawList<I> {
    commands: Vec<DrawCommand<I>>,
}

impl<I> Default for DrawList<I> {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
        }
    }
}

impl<I> DrawList<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand<I>] {
        &self.commands
    }

    pub fn take(&mut self) -> Vec<DrawCommand<I>> {
        std::mem::take(&mut self.commands)
    }
}

impl<I: Clone> Surface for DrawList<I> {
    type Image = I;

    fn clear(&mut self, size: Size) {
        self.commands.push(DrawCommand::Clear(size));
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.commands.push(DrawCommand::Translate(dx, dy));
    }

    fn rotate(&mut self, angle: f64) {
        self.commands.push(DrawCommand::Rotate(angle));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.commands.push(DrawCommand::Scale(sx, sy));
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        self.commands
            .push(DrawCommand::FillPath(path.clone(), color));
    }

    fn draw_image(&mut self, image: &I, rect: Rect) {
        self.commands
            .push(DrawCommand::DrawImage(image.clone(), rect));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_formats_as_css_hex() {
        assert_eq!(Color::BLUE.to_css(), "#007bff");
        assert_eq!(Color::RED.to_css(), "#ff0000");
    }

    #[test]
    fn rounded_rect_is_closed_and_clamps_radius() {
        let rect = Rect::new(Point::new(0., 0.), Size::new(10., 4.));
        let path = Path::rounded_rect(rect, 100.);

        assert_eq!(path.commands().first(), Some(&PathCommand::MoveTo(Point::new(2., 0.))));
        assert_eq!(path.commands().last(), Some(&PathCommand::Close));
        assert_eq!(path.commands().len(), 10);
    }

    #[test]
    fn heart_starts_and_ends_at_its_notch() {
        let path = Path::heart(50., 10., 40.);
        let notch = Point::new(50., 20.);

        assert_eq!(path.commands()[0], PathCommand::MoveTo(notch));
        assert!(matches!(
            path.commands()[4],
            PathCommand::CubicTo { to, .. } if to == notch
        ));
    }

    #[test]
    fn draw_list_records_in_order() {
        let mut list = DrawList::<&str>::new();
        list.save();
        list.scale(0.5, 1.);
        list.draw_image(&"img", Rect::default());
        list.restore();

        assert_eq!(
            list.take(),
            [
                DrawCommand::Save,
                DrawCommand::Scale(0.5, 1.),
                DrawCommand::DrawImage("img", Rect::default()),
                DrawCommand::Restore,
            ]
        );
        assert!(list.commands().is_empty());
    }

    #[test]
    fn draw_list_records_rotation_inside_its_transform() {
        let mut list = DrawList::<&str>::new();
        list.save();
        list.translate(60., 85.);
        list.rotate(std::f64::consts::FRAC_PI_2);
        list.translate(-60., -85.);
        list.restore();

        assert_eq!(
            list.commands(),
            [
                DrawCommand::Save,
                DrawCommand::Translate(60., 85.),
                DrawCommand::Rotate(std::f64::consts::FRAC_PI_2),
                DrawCommand::Translate(-60., -85.),
                DrawCommand::Restore,
            ]
        );
    }
}
