//! Core rendering engine.
//!
//! The [`Engine`] owns the framebuffer and depth buffer and turns each
//! [`DrawCommand`] into rasterization calls. Every command is one synchronous
//! pass that runs to completion; the presenter reads the result through
//! [`Engine::framebuffer`] afterwards.

use std::path::Path;

use log::{debug, info};

use crate::colors::{self, Color};
use crate::config::Config;
use crate::light::DirectionalLight;
use crate::math::Vec2i;
use crate::model::MeshSource;
use crate::projection::{world_to_pixel, world_to_screen};
use crate::render::{
    patterns, BarycentricRasterizer, DepthBuffer, DepthMode, Framebuffer, LineAlgorithm,
    LineDispatcher, LineRasterizer, Orientation, Rasterizer, RenderTarget, Triangle,
};

/// Segments drawn by [`DrawCommand::LineSet`], in top-down pixel coordinates.
pub const DEMO_LINES: [((i32, i32), (i32, i32), u32); 6] = [
    ((50, 50), (100, 100), colors::RED),
    ((50, 60), (100, 40), colors::BLUE),
    ((50, 400), (100, 100), colors::BLUE),
    ((13, 20), (80, 40), colors::WHITE),
    ((20, 13), (40, 80), colors::RED),
    ((80, 40), (13, 20), colors::RED),
];

/// One discrete drawing request. Input events map 1:1 onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCommand {
    /// Fill the framebuffer with white.
    Clear,
    /// Draw [`DEMO_LINES`] over whatever is already there.
    LineSet,
    /// Black background, white edges of every model face.
    Wireframe,
    /// Black background, flat Lambert-shaded faces, no depth test.
    Shaded,
    /// Like [`DrawCommand::Shaded`] but nearest surface wins per pixel.
    ShadedDepth,
    /// White screen with one blue row.
    HorizontalMarker(i32),
    /// White screen with one blue column.
    VerticalMarker(i32),
}

/// Counters from one executed command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub pixels_written: usize,
    pub triangles_drawn: usize,
    pub triangles_culled: usize,
}

pub struct Engine {
    framebuffer: Framebuffer,
    depth_buffer: DepthBuffer,
    lines: LineDispatcher,
    rasterizer: BarycentricRasterizer,
    light: DirectionalLight,
    base_color: Color,
}

impl Engine {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            framebuffer: Framebuffer::new(width, height),
            depth_buffer: DepthBuffer::new(width, height),
            lines: LineDispatcher::default(),
            rasterizer: BarycentricRasterizer::new(),
            light: DirectionalLight::default(),
            base_color: Color::WHITE,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            framebuffer: Framebuffer::with_row_alignment(
                config.width,
                config.height,
                config.row_alignment,
            ),
            depth_buffer: DepthBuffer::new(config.width, config.height),
            lines: LineDispatcher::new(config.line, config.slope_margin),
            rasterizer: BarycentricRasterizer::new(),
            light: DirectionalLight::new(config.light_direction()),
            base_color: Color::WHITE,
        }
    }

    pub fn set_line_algorithm(&mut self, algorithm: LineAlgorithm) {
        self.lines.set_type(algorithm);
    }

    pub fn line_algorithm(&self) -> LineAlgorithm {
        self.lines.active_type()
    }

    pub fn set_light(&mut self, light: DirectionalLight) {
        self.light = light;
    }

    pub fn set_base_color(&mut self, color: Color) {
        self.base_color = color;
    }

    /// Resize both buffers together. Contents must be redrawn afterwards.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.framebuffer.resize(width, height);
        self.depth_buffer.resize(width, height);
        info!(
            "resized to {}x{} (pitch {} bytes)",
            width,
            height,
            self.framebuffer.pitch()
        );
    }

    /// The rendered pixels, for presentation.
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn depth_buffer(&self) -> &DepthBuffer {
        &self.depth_buffer
    }

    pub fn clear(&mut self, color: u32) {
        self.framebuffer.clear(color);
    }

    pub fn clear_depth(&mut self) {
        self.depth_buffer.clear();
    }

    fn target(&mut self, orientation: Orientation) -> RenderTarget<'_> {
        RenderTarget::new(&mut self.framebuffer, &mut self.depth_buffer, orientation)
    }

    /// Runs one command against `model` and returns what it did.
    pub fn execute(&mut self, command: DrawCommand, model: &impl MeshSource) -> FrameStats {
        let stats = match command {
            DrawCommand::Clear => {
                self.clear(colors::WHITE);
                FrameStats {
                    pixels_written: pixel_count(
                        self.framebuffer.width(),
                        self.framebuffer.height(),
                    ),
                    ..FrameStats::default()
                }
            }
            DrawCommand::LineSet => self.draw_line_set(),
            DrawCommand::Wireframe => self.draw_wireframe(model),
            DrawCommand::Shaded => self.draw_shaded(model, DepthMode::Overwrite),
            DrawCommand::ShadedDepth => self.draw_shaded(model, DepthMode::Test),
            DrawCommand::HorizontalMarker(y) => {
                let mut target = self.target(Orientation::TopDown);
                patterns::horizontal_marker(&mut target, y, colors::WHITE, colors::BLUE);
                FrameStats {
                    pixels_written: target.pixels_written(),
                    ..FrameStats::default()
                }
            }
            DrawCommand::VerticalMarker(x) => {
                let mut target = self.target(Orientation::TopDown);
                patterns::vertical_marker(&mut target, x, colors::WHITE, colors::BLUE);
                FrameStats {
                    pixels_written: target.pixels_written(),
                    ..FrameStats::default()
                }
            }
        };
        debug!("{command:?}: {stats:?}");
        stats
    }

    /// Draws [`DEMO_LINES`] with the active line algorithm.
    pub fn draw_line_set(&mut self) -> FrameStats {
        let mut target = RenderTarget::new(
            &mut self.framebuffer,
            &mut self.depth_buffer,
            Orientation::TopDown,
        );
        for ((x0, y0), (x1, y1), color) in DEMO_LINES {
            self.lines
                .draw_line(&mut target, Vec2i::new(x0, y0), Vec2i::new(x1, y1), color);
        }
        FrameStats {
            pixels_written: target.pixels_written(),
            ..FrameStats::default()
        }
    }

    /// Clears to black and draws every face edge in white, origin bottom-left.
    pub fn draw_wireframe(&mut self, model: &impl MeshSource) -> FrameStats {
        self.clear(colors::BLACK);
        let (width, height) = (self.framebuffer.width(), self.framebuffer.height());
        let mut target = RenderTarget::new(
            &mut self.framebuffer,
            &mut self.depth_buffer,
            Orientation::BottomUp,
        );

        for i in 0..model.face_count() {
            let corners = model
                .face_vertices(i)
                .map(|v| world_to_pixel(v, width, height));
            for j in 0..3 {
                self.lines
                    .draw_line(&mut target, corners[j], corners[(j + 1) % 3], colors::WHITE);
            }
        }

        FrameStats {
            pixels_written: target.pixels_written(),
            triangles_drawn: model.face_count(),
            triangles_culled: 0,
        }
    }

    /// Clears to black and fills every lit face with its flat Lambert shade,
    /// origin bottom-left.
    ///
    /// Faces with intensity `<= 0` are skipped without any draw call. With
    /// [`DepthMode::Test`] the depth buffer is reset first and the nearest
    /// (greatest z) surface wins.
    pub fn draw_shaded(&mut self, model: &impl MeshSource, depth_mode: DepthMode) -> FrameStats {
        self.clear(colors::BLACK);
        if depth_mode == DepthMode::Test {
            self.clear_depth();
        }

        let (width, height) = (self.framebuffer.width(), self.framebuffer.height());
        let mut target = RenderTarget::new(
            &mut self.framebuffer,
            &mut self.depth_buffer,
            Orientation::BottomUp,
        );
        let mut stats = FrameStats::default();

        for i in 0..model.face_count() {
            let world = model.face_vertices(i);
            let Some(intensity) = self.light.flat_intensity(world[0], world[1], world[2]) else {
                stats.triangles_culled += 1;
                continue;
            };

            let triangle = Triangle::new(
                world.map(|v| world_to_screen(v, width, height)),
                (self.base_color * intensity).pack(),
            );
            self.rasterizer
                .fill_triangle(&triangle, &mut target, depth_mode);
            stats.triangles_drawn += 1;
        }

        stats.pixels_written = target.pixels_written();
        stats
    }

    /// Writes the current framebuffer to a PNG file.
    pub fn save_capture(&self, path: &Path) -> Result<(), image::ImageError> {
        self.framebuffer.to_rgba_image().save(path)?;
        info!("saved capture to {}", path.display());
        Ok(())
    }
}

fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3f;
    use crate::model::Model;

    fn single_face(points: [[f32; 3]; 3]) -> Model {
        Model::new("face", points.map(Vec3f::from).to_vec(), vec![[0, 1, 2]]).unwrap()
    }

    fn count(engine: &Engine, color: u32) -> usize {
        let fb = engine.framebuffer();
        (0..fb.height() as i32)
            .flat_map(|y| (0..fb.width() as i32).map(move |x| (x, y)))
            .filter(|&(x, y)| fb.read_pixel(x, y) == Some(color))
            .count()
    }

    #[test]
    fn clear_command_fills_white() {
        let mut engine = Engine::new(8, 8);
        let stats = engine.execute(DrawCommand::Clear, &Model::cube());
        assert_eq!(stats.pixels_written, 64);
        assert_eq!(count(&engine, colors::WHITE), 64);
    }

    #[test]
    fn pixel_count_does_not_wrap() {
        assert_eq!(pixel_count(70_000, 70_000), 4_900_000_000);
        assert_eq!(pixel_count(0, u32::MAX), 0);
    }

    #[test]
    fn back_facing_triangle_writes_nothing() {
        // (v2-v0) x (v1-v0) points along +Z, away from the default light
        let model = single_face([[-0.5, -0.5, 0.0], [-0.5, 0.5, 0.0], [0.5, -0.5, 0.0]]);
        let mut engine = Engine::new(32, 32);
        let stats = engine.draw_shaded(&model, DepthMode::Overwrite);
        assert_eq!(stats.pixels_written, 0);
        assert_eq!(stats.triangles_culled, 1);
        assert_eq!(count(&engine, colors::BLACK), 32 * 32);
    }

    #[test]
    fn front_facing_triangle_is_lit_full_white() {
        let model = single_face([[-0.5, -0.5, 0.0], [0.5, -0.5, 0.0], [-0.5, 0.5, 0.0]]);
        let mut engine = Engine::new(32, 32);
        let stats = engine.draw_shaded(&model, DepthMode::Overwrite);
        assert_eq!(stats.triangles_drawn, 1);
        assert!(stats.pixels_written > 0);
        assert_eq!(count(&engine, colors::WHITE), stats.pixels_written);
    }

    #[test]
    fn shaded_pass_is_flipped_vertically() {
        // Face in the lower half of normalized space lands in the lower half
        // of the image, i.e. the high memory rows.
        let model = single_face([[-0.5, -1.0, 0.0], [0.5, -1.0, 0.0], [-0.5, -0.5, 0.0]]);
        let mut engine = Engine::new(32, 32);
        engine.draw_shaded(&model, DepthMode::Overwrite);
        let fb = engine.framebuffer();
        assert_eq!(fb.read_pixel(10, 30), Some(colors::WHITE));
        assert_eq!(fb.read_pixel(10, 2), Some(colors::BLACK));
    }

    #[test]
    fn depth_pass_keeps_nearer_face() {
        let far = [[-1.0, -1.0, 0.5], [1.0, -1.0, 0.5], [-1.0, 1.0, 0.5]];
        let near = [[-1.0, -1.0, 0.9], [1.0, -1.0, 0.9], [-1.0, 1.0, 0.9]];
        for (first, second) in [(far, near), (near, far)] {
            let vertices = first.iter().chain(second.iter()).map(|&p| Vec3f::from(p)).collect();
            let model = Model::new("pair", vertices, vec![[0, 1, 2], [3, 4, 5]]).unwrap();
            let mut engine = Engine::new(16, 16);
            engine.draw_shaded(&model, DepthMode::Test);
            let depth = engine.depth_buffer().get(3, 5).unwrap();
            assert!((depth - 0.9).abs() < 1e-5, "depth {depth}");
        }
    }

    #[test]
    fn wireframe_draws_edges_only() {
        let model = single_face([[-0.5, -0.5, 0.0], [0.5, -0.5, 0.0], [-0.5, 0.5, 0.0]]);
        let mut engine = Engine::new(64, 64);
        let stats = engine.draw_wireframe(&model);
        assert_eq!(stats.triangles_drawn, 1);
        // Bottom edge at y = 16 in drawing space -> memory row 48
        let fb = engine.framebuffer();
        assert_eq!(fb.read_pixel(20, 48), Some(colors::WHITE));
        // Interior stays black
        assert_eq!(fb.read_pixel(20, 44), Some(colors::BLACK));
    }

    #[test]
    fn line_set_draws_without_clearing() {
        let mut engine = Engine::new(128, 128);
        engine.clear(colors::BLACK);
        let stats = engine.execute(DrawCommand::LineSet, &Model::cube());
        assert!(stats.pixels_written > 0);
        assert_eq!(engine.framebuffer().read_pixel(75, 75), Some(colors::RED));
        assert_eq!(engine.framebuffer().read_pixel(0, 0), Some(colors::BLACK));
    }

    #[test]
    fn marker_commands_repaint_whole_screen() {
        let mut engine = Engine::new(10, 10);
        let stats = engine.execute(DrawCommand::HorizontalMarker(4), &Model::cube());
        assert_eq!(stats.pixels_written, 100);
        assert_eq!(engine.framebuffer().read_pixel(7, 4), Some(colors::BLUE));
        assert_eq!(engine.framebuffer().read_pixel(7, 5), Some(colors::WHITE));

        engine.execute(DrawCommand::VerticalMarker(2), &Model::cube());
        assert_eq!(count(&engine, colors::BLUE), 10);
        assert_eq!(engine.framebuffer().read_pixel(2, 9), Some(colors::BLUE));
    }

    #[test]
    fn resize_keeps_buffers_in_step() {
        let mut engine = Engine::new(8, 8);
        engine.resize(20, 10);
        assert_eq!(engine.framebuffer().width(), 20);
        assert_eq!(engine.depth_buffer().height(), 10);
        let stats = engine.execute(DrawCommand::ShadedDepth, &Model::cube());
        assert!(stats.triangles_drawn > 0);
    }

    #[test]
    fn capture_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let mut engine = Engine::new(4, 3);
        engine.clear(colors::RED);
        engine.save_capture(&path).unwrap();
        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.get_pixel(2, 1).0, [255, 0, 0, 255]);
    }
}
