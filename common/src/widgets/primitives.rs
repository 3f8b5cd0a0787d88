//! Low-level drawing primitives shared across widgets.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle};
use micromath::F32;

use crate::animations::color::{blend, colors_close_enough};
use crate::geometry::{PointF, point_on_circle};

#[inline]
fn round(v: f32) -> i32 { F32(v).round().0 as i32 }

/// Draw a hand (or marker) from `from` toward `angle_deg` for `length` pixels.
///
/// `rounded` adds filled end caps so thick hands get the round look of a stroked path.
pub fn draw_radial_line<D>(
    display: &mut D,
    from: PointF,
    angle_deg: f32,
    length: f32,
    width: u32,
    color: Rgb565,
    rounded: bool,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let to = point_on_circle(from, length, angle_deg);
    draw_line(display, from, to, width, color, rounded);
}

/// Draw a line between two sub-pixel points.
pub fn draw_line<D>(
    display: &mut D,
    from: PointF,
    to: PointF,
    width: u32,
    color: Rgb565,
    rounded: bool,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if width == 0 {
        return;
    }
    let (start, end) = (from.to_point(), to.to_point());
    Line::new(start, end)
        .into_styled(PrimitiveStyle::with_stroke(color, width))
        .draw(display)
        .ok();

    if rounded && width > 2 {
        draw_dot(display, from, width, color);
        draw_dot(display, to, width, color);
    }
}

/// Filled circle of `diameter` centred on a sub-pixel point.
pub fn draw_dot<D>(
    display: &mut D,
    center: PointF,
    diameter: u32,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if diameter == 0 {
        return;
    }
    Circle::with_center(center.to_point(), diameter)
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
        .ok();
}

/// Filled square pixel of the pixel clock. Edges are rounded so neighbouring squares tile without gaps.
pub fn fill_pixel_square<D>(
    display: &mut D,
    x: f32,
    y: f32,
    size: f32,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let left = round(x);
    let top = round(y);
    let right = round(x + size);
    let bottom = round(y + size);
    if right <= left || bottom <= top {
        return;
    }
    Rectangle::new(Point::new(left, top), Size::new((right - left) as u32, (bottom - top) as u32))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
        .ok();
}

// =============================================================================
// Glyph Transform
// =============================================================================

/// Draw target adapter that moves, squashes, fades and clips everything drawn through it.
///
/// Used for counter glyphs. Each incoming pixel is scaled around `pivot`
/// (vertically also by `cos(rotation_x)`, which is what an X rotation looks
/// like head-on), shifted by `offset_y`, blended toward `background` by
/// `opacity`, and dropped if it falls outside `clip` or ends up
/// indistinguishable from the background.
pub struct GlyphTransform<'a, D> {
    target: &'a mut D,
    pivot: Point,
    scale_x: f32,
    scale_y: f32,
    offset_y: i32,
    opacity: f32,
    background: Rgb565,
    clip: Rectangle,
}

impl<'a, D> GlyphTransform<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        target: &'a mut D,
        pivot: Point,
        scale: f32,
        rotation_x_deg: f32,
        offset_y: f32,
        opacity: f32,
        background: Rgb565,
        clip: Rectangle,
    ) -> Self {
        let squash = F32(rotation_x_deg * core::f32::consts::PI / 180.0).cos().0;
        let squash = if squash < 0.0 { -squash } else { squash };
        Self {
            target,
            pivot,
            scale_x: scale,
            scale_y: scale * squash,
            offset_y: round(offset_y),
            opacity: opacity.clamp(0.0, 1.0),
            background,
            clip,
        }
    }

    /// Whether the transform leaves pixels where they are.
    pub fn is_identity(&self) -> bool { self.scale_x == 1.0 && self.scale_y == 1.0 && self.offset_y == 0 }
}

impl<D> Dimensions for GlyphTransform<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn bounding_box(&self) -> Rectangle { self.target.bounding_box() }
}

impl<D> DrawTarget for GlyphTransform<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Color = Rgb565;
    type Error = D::Error;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let identity = self.is_identity();
        let Self { pivot, scale_x, scale_y, offset_y, opacity, background, clip, .. } = *self;
        if opacity <= 0.0 {
            return Ok(());
        }

        let transformed = pixels.into_iter().filter_map(move |Pixel(point, color)| {
            let moved = if identity {
                point
            } else {
                let dx = (point.x - pivot.x) as f32;
                let dy = (point.y - pivot.y) as f32;
                Point::new(pivot.x + round(dx * scale_x), pivot.y + round(dy * scale_y) + offset_y)
            };
            if !clip.contains(moved) {
                return None;
            }
            let shade = blend(color, background, opacity);
            if colors_close_enough(shade, background) {
                return None;
            }
            Some(Pixel(moved, shade))
        });
        self.target.draw_iter(transformed)
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;

    use super::*;
    use crate::colors::{BLACK, LIME, WHITE};

    fn lit(display: &MockDisplay<Rgb565>) -> usize {
        display.affected_area().points().filter(|&p| display.get_pixel(p).is_some()).count()
    }

    #[test]
    fn test_pixel_square_covers_size() {
        let mut display = MockDisplay::<Rgb565>::new();
        fill_pixel_square(&mut display, 2.0, 3.0, 4.0, LIME);
        assert_eq!(display.affected_area(), Rectangle::new(Point::new(2, 3), Size::new(4, 4)));
    }

    #[test]
    fn test_pixel_square_degenerate_draws_nothing() {
        let mut display = MockDisplay::<Rgb565>::new();
        fill_pixel_square(&mut display, 2.0, 3.0, 0.2, LIME);
        assert_eq!(lit(&display), 0);
    }

    #[test]
    fn test_radial_line_points_up_at_zero() {
        let mut display = MockDisplay::<Rgb565>::new();
        draw_radial_line(&mut display, PointF::new(10.0, 20.0), 0.0, 15.0, 1, WHITE, false);
        let area = display.affected_area();
        assert_eq!(area.top_left, Point::new(10, 5), "Line runs straight up from the pivot");
        assert_eq!(area.size, Size::new(1, 16));
    }

    #[test]
    fn test_transform_identity_passes_pixels_through() {
        let mut display = MockDisplay::<Rgb565>::new();
        let clip = Rectangle::new(Point::zero(), Size::new(20, 20));
        let mut transform = GlyphTransform::new(&mut display, Point::new(5, 5), 1.0, 0.0, 0.0, 1.0, BLACK, clip);
        assert!(transform.is_identity());
        Pixel(Point::new(3, 4), WHITE).draw(&mut transform).unwrap();

        assert_eq!(display.get_pixel(Point::new(3, 4)), Some(WHITE));
    }

    #[test]
    fn test_transform_identity_still_clips_and_fades() {
        let mut display = MockDisplay::<Rgb565>::new();
        let clip = Rectangle::new(Point::zero(), Size::new(4, 4));
        let mut transform = GlyphTransform::new(&mut display, Point::new(2, 2), 1.0, 0.0, 0.0, 0.5, BLACK, clip);
        assert!(transform.is_identity());
        Pixel(Point::new(1, 1), WHITE).draw(&mut transform).unwrap();
        Pixel(Point::new(6, 1), WHITE).draw(&mut transform).unwrap();

        assert_eq!(display.get_pixel(Point::new(6, 1)), None, "Identity pixels outside the slot are dropped");
        let shade = display.get_pixel(Point::new(1, 1));
        assert!(shade.is_some() && shade != Some(WHITE), "Half opacity blends toward the background");
    }

    #[test]
    fn test_transform_offsets_and_clips() {
        let mut display = MockDisplay::<Rgb565>::new();
        let clip = Rectangle::new(Point::zero(), Size::new(10, 10));
        let mut transform = GlyphTransform::new(&mut display, Point::new(5, 5), 1.0, 0.0, 3.0, 1.0, BLACK, clip);
        Pixel(Point::new(5, 5), WHITE).draw(&mut transform).unwrap();
        Pixel(Point::new(5, 8), WHITE).draw(&mut transform).unwrap();

        assert_eq!(display.get_pixel(Point::new(5, 8)), Some(WHITE), "Moved down by the offset");
        assert_eq!(lit(&display), 1, "Pixel pushed past the clip edge is dropped");
    }

    #[test]
    fn test_transform_scales_toward_pivot() {
        let mut display = MockDisplay::<Rgb565>::new();
        let clip = Rectangle::new(Point::zero(), Size::new(20, 20));
        let mut transform = GlyphTransform::new(&mut display, Point::new(10, 10), 0.5, 0.0, 0.0, 1.0, BLACK, clip);
        Pixel(Point::new(18, 2), WHITE).draw(&mut transform).unwrap();

        assert_eq!(display.get_pixel(Point::new(14, 6)), Some(WHITE));
    }

    #[test]
    fn test_transform_rotation_squashes_vertically() {
        let mut display = MockDisplay::<Rgb565>::new();
        let clip = Rectangle::new(Point::zero(), Size::new(20, 20));
        let mut transform = GlyphTransform::new(&mut display, Point::new(10, 10), 1.0, 60.0, 0.0, 1.0, BLACK, clip);
        Pixel(Point::new(10, 18), WHITE).draw(&mut transform).unwrap();

        assert_eq!(display.get_pixel(Point::new(10, 14)), Some(WHITE), "cos(60°) halves the vertical distance");
    }

    #[test]
    fn test_transform_fades_toward_background() {
        let mut display = MockDisplay::<Rgb565>::new();
        let clip = Rectangle::new(Point::zero(), Size::new(20, 20));
        let mut faded = GlyphTransform::new(&mut display, Point::zero(), 1.0, 0.0, 0.0, 0.5, BLACK, clip);
        Pixel(Point::new(1, 1), LIME).draw(&mut faded).unwrap();
        let shade = display.get_pixel(Point::new(1, 1)).unwrap();
        assert!(shade != LIME && shade != BLACK, "Half opacity mixes with the background");

        let mut display = MockDisplay::<Rgb565>::new();
        let mut invisible = GlyphTransform::new(&mut display, Point::zero(), 1.0, 0.0, 0.0, 0.02, BLACK, clip);
        Pixel(Point::new(1, 1), LIME).draw(&mut invisible).unwrap();
        assert_eq!(lit(&display), 0, "Near-zero opacity draws nothing");
    }
}
