use anyhow::{Context as _, anyhow};
use gloo::events::EventListener;
use game::{Color, FaceId, FaceImages, Path, PathCommand, Rect, Size, Surface};
use pairflip_core as game;
use std::collections::BTreeMap;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};
use yew::Callback;

pub(crate) fn context_2d(canvas: &HtmlCanvasElement) -> anyhow::Result<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|err| anyhow!("get_context failed: {:?}", err))?
        .context("canvas has no 2d context")?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| anyhow!("2d context has unexpected type"))
}

/// [`Surface`] backed by a canvas 2D context.
pub(crate) struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
    pub(crate) fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn check(op: &str, result: Result<(), JsValue>) {
        if let Err(err) = result {
            log::error!("canvas {} failed: {:?}", op, err);
        }
    }
}

impl Surface for CanvasSurface<'_> {
    type Image = HtmlImageElement;

    fn clear(&mut self, size: Size) {
        self.ctx.clear_rect(0., 0., size.width, size.height);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        Self::check("translate", self.ctx.translate(dx, dy));
    }

    fn rotate(&mut self, angle: f64) {
        Self::check("rotate", self.ctx.rotate(angle));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        Self::check("scale", self.ctx.scale(sx, sy));
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        use PathCommand::*;

        self.ctx.begin_path();
        for command in path.commands() {
            match *command {
                MoveTo(to) => self.ctx.move_to(to.x, to.y),
                LineTo(to) => self.ctx.line_to(to.x, to.y),
                QuadTo { control, to } => self.ctx.quadratic_curve_to(control.x, control.y, to.x, to.y),
                CubicTo {
                    control1,
                    control2,
                    to,
                } => self.ctx.bezier_curve_to(
                    control1.x, control1.y, control2.x, control2.y, to.x, to.y,
                ),
                Close => self.ctx.close_path(),
            }
        }
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn draw_image(&mut self, image: &HtmlImageElement, rect: Rect) {
        Self::check(
            "draw_image",
            self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                image,
                rect.origin.x,
                rect.origin.y,
                rect.size.width,
                rect.size.height,
            ),
        );
    }
}

pub(crate) fn asset_path(face: FaceId) -> String {
    format!("assets/{}.jpg", face)
}

/// Front-face images, requested up front and only handed out once loaded.
#[derive(Default)]
pub(crate) struct FaceAssets {
    images: BTreeMap<FaceId, HtmlImageElement>,
    _listeners: Vec<EventListener>,
}

impl FaceAssets {
    pub(crate) fn load(pairs: game::CellCount, on_load: Callback<()>) -> Self {
        let mut images = BTreeMap::new();
        let mut listeners = Vec::new();
        for face in 1..=pairs {
            match HtmlImageElement::new() {
                Ok(image) => {
                    let on_load = on_load.clone();
                    listeners.push(EventListener::new(&image, "load", move |_| on_load.emit(())));
                    listeners.push(EventListener::new(&image, "error", move |_| {
                        log::warn!("failed to load {}", asset_path(face));
                    }));
                    image.set_src(&asset_path(face));
                    images.insert(face, image);
                }
                Err(err) => log::warn!("could not create image for face {}: {:?}", face, err),
            }
        }
        log::debug!("requested {} face images", images.len());
        Self {
            images,
            _listeners: listeners,
        }
    }
}

impl FaceImages<HtmlImageElement> for FaceAssets {
    fn face_image(&self, face: FaceId) -> Option<&HtmlImageElement> {
        self.images
            .get(&face)
            .filter(|image| image.complete() && image.natural_width() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_path_uses_face_id() {
        assert_eq!(asset_path(4), "assets/4.jpg");
    }

    #[cfg(target_arch = "wasm32")]
    mod browser {
        use super::*;
        use rand::SeedableRng;
        use rand::rngs::SmallRng;
        use wasm_bindgen_test::*;

        wasm_bindgen_test_configure!(run_in_browser);

        fn canvas() -> HtmlCanvasElement {
            gloo::utils::document()
                .create_element("canvas")
                .unwrap()
                .dyn_into()
                .unwrap()
        }

        #[wasm_bindgen_test]
        fn unloaded_faces_are_not_handed_out() {
            let assets = FaceAssets::load(6, Callback::noop());

            assert_eq!(assets.images.len(), 6);
            assert!(assets.face_image(1).is_none());
            assert!(assets.face_image(7).is_none());
        }

        #[wasm_bindgen_test]
        fn board_renders_onto_canvas() {
            let canvas = canvas();
            let ctx = context_2d(&canvas).unwrap();
            let board =
                game::Board::new(game::BoardConfig::default(), SmallRng::seed_from_u64(1)).unwrap();

            board.render(&mut CanvasSurface::new(&ctx), &FaceAssets::default());
        }
    }
}
