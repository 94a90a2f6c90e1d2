//! Immediate-mode rendering engine
//!
//! The engine owns the whole software pipeline for one viewport:
//!
//! ```text
//! set_color / add_vertex -> pending queue -> flush -> faces
//!     -> flat shading (optional) -> projection -> culling
//!     -> scanline fill or wireframe -> frame buffer
//! ```
//!
//! A frame is `begin_frame`, transform calls, producer calls, `end_frame`.
//! The host then reads [`Engine::framebuffer`] to present the image.

use serde::{Deserialize, Serialize};

use fractal3d_math::{Axis, Mat4};

use crate::color::{Color, Rgba8};
use crate::framebuffer::FrameBuffer;
use crate::lighting::{Lighting, DEFAULT_LIGHT_COEFFICIENT};
use crate::projector::{Projector, DEFAULT_PERSPECTIVE_RATIO};
use crate::rasterizer;
use crate::timing::Profiler;
use crate::transform::TransformPipeline;
use crate::vertex::{Face, Vertex};

/// How queued vertices are grouped into faces at flush time
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriangleMode {
    /// Every 3 vertices form one triangle
    #[default]
    List,
    /// Every 4 vertices form two triangles, (v1, v2, v3) and (v2, v3, v4)
    Strip,
}

impl TriangleMode {
    /// Raw code for [`TriangleMode::List`]
    pub const RAW_LIST: i32 = 0;
    /// Raw code for [`TriangleMode::Strip`]
    pub const RAW_STRIP: i32 = 1;

    /// Decode a raw mode; anything unknown falls back to `List`
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            Self::RAW_STRIP => TriangleMode::Strip,
            _ => TriangleMode::List,
        }
    }

    /// Vertices consumed per group
    pub const fn group_size(self) -> usize {
        match self {
            TriangleMode::List => 3,
            TriangleMode::Strip => 4,
        }
    }
}

/// How faces are rasterized
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Scanline fill with depth test
    Filled,
    /// Edges only, drawn over whatever is there
    #[default]
    Wireframe,
}

impl RenderMode {
    /// Raw code for [`RenderMode::Filled`]
    pub const RAW_FILLED: i32 = 0;
    /// Raw code for [`RenderMode::Wireframe`]
    pub const RAW_WIREFRAME: i32 = 1;

    /// Decode a raw mode; anything unknown falls back to `Wireframe`
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            Self::RAW_FILLED => RenderMode::Filled,
            _ => RenderMode::Wireframe,
        }
    }

    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            RenderMode::Filled => RenderMode::Wireframe,
            RenderMode::Wireframe => RenderMode::Filled,
        }
    }
}

/// Engine tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Eye-to-projection-plane distance
    pub perspective_ratio: f32,
    /// Scale applied to flat-shading intensity
    pub light_coefficient: f32,
    /// Clear color [r, g, b]
    pub background: [u8; 3],
    /// Render mode at construction
    pub render_mode: RenderMode,
    /// Triangle mode at construction
    pub triangle_mode: TriangleMode,
    /// Flat shading enabled at construction
    pub lighting: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            perspective_ratio: DEFAULT_PERSPECTIVE_RATIO,
            light_coefficient: DEFAULT_LIGHT_COEFFICIENT,
            background: [128, 128, 128],
            render_mode: RenderMode::Wireframe,
            triangle_mode: TriangleMode::List,
            lighting: false,
        }
    }
}

impl EngineConfig {
    /// Clear color as a packed opaque pixel
    pub fn background_color(&self) -> Rgba8 {
        let [r, g, b] = self.background;
        Rgba8::rgb(r, g, b)
    }
}

/// Counters for one flush, or a whole frame when accumulated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Vertices that were queued when flushed
    pub vertices: usize,
    /// Faces built from the queue
    pub triangles: usize,
    /// Faces rejected because no corner was in view
    pub culled: usize,
    /// Pixels written to the frame buffer
    pub pixels: usize,
    /// Vertices dropped because the queue did not divide into groups
    pub discarded: usize,
}

impl FrameStats {
    /// Faces that reached the rasterizer
    pub fn drawn(&self) -> usize {
        self.triangles - self.culled
    }

    fn accumulate(&mut self, other: &FrameStats) {
        self.vertices += other.vertices;
        self.triangles += other.triangles;
        self.culled += other.culled;
        self.pixels += other.pixels;
        self.discarded += other.discarded;
    }
}

/// Group a vertex queue into faces.
///
/// Returns `None` when the queue length is not a multiple of the mode's
/// group size. An empty queue yields no faces.
pub fn group_faces(vertices: &[Vertex], mode: TriangleMode) -> Option<Vec<Face>> {
    let group = mode.group_size();
    if vertices.len() % group != 0 {
        return None;
    }

    let faces = match mode {
        TriangleMode::List => vertices
            .chunks_exact(3)
            .map(|v| Face::new(v[0], v[1], v[2]))
            .collect(),
        TriangleMode::Strip => vertices
            .chunks_exact(4)
            .flat_map(|v| [Face::new(v[0], v[1], v[2]), Face::new(v[1], v[2], v[3])])
            .collect(),
    };
    Some(faces)
}

/// Software rendering engine for one fixed-size viewport
pub struct Engine {
    config: EngineConfig,
    transform: TransformPipeline,
    projector: Projector,
    lighting: Lighting,
    framebuffer: FrameBuffer,
    pending: Vec<Vertex>,
    current_color: Color,
    triangle_mode: TriangleMode,
    render_mode: RenderMode,
    lighting_enabled: bool,
    frame_stats: FrameStats,
}

impl Engine {
    /// Create an engine with default settings
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_config(width, height, EngineConfig::default())
    }

    /// Create an engine; the frame buffer is allocated here, once
    pub fn with_config(width: u32, height: u32, config: EngineConfig) -> Self {
        log::info!(
            "Engine {}x{}: perspective {}, light coefficient {}, {:?}/{:?}",
            width,
            height,
            config.perspective_ratio,
            config.light_coefficient,
            config.render_mode,
            config.triangle_mode,
        );

        Self {
            transform: TransformPipeline::new(width, height),
            projector: Projector::new(config.perspective_ratio, height),
            lighting: Lighting::new(config.perspective_ratio, config.light_coefficient),
            framebuffer: FrameBuffer::new(width, height, config.background_color()),
            pending: Vec::new(),
            current_color: Color::WHITE,
            triangle_mode: config.triangle_mode,
            render_mode: config.render_mode,
            lighting_enabled: config.lighting,
            frame_stats: FrameStats::default(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn width(&self) -> u32 {
        self.framebuffer.width()
    }

    pub fn height(&self) -> u32 {
        self.framebuffer.height()
    }

    // --- Producer surface ---

    /// Set the paint color; each channel is clamped to [0, 1]
    pub fn set_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.current_color = Color::clamped(r, g, b, a);
    }

    /// Opaque variant of [`Engine::set_color`]
    pub fn set_color_rgb(&mut self, r: f32, g: f32, b: f32) {
        self.set_color(r, g, b, 1.0);
    }

    pub fn color(&self) -> Color {
        self.current_color
    }

    /// Transform (x, y, z) by the model-view matrix and queue it with the
    /// current color
    pub fn add_vertex(&mut self, x: f32, y: f32, z: f32) {
        let point = self.transform.transform_point(x, y, z);
        self.pending.push(Vertex::new(point, self.current_color));
    }

    /// Vertices waiting for the next flush
    pub fn pending(&self) -> &[Vertex] {
        &self.pending
    }

    pub fn set_triangle_mode(&mut self, mode: TriangleMode) {
        self.triangle_mode = mode;
    }

    pub fn triangle_mode(&self) -> TriangleMode {
        self.triangle_mode
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.render_mode = mode;
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn toggle_render_mode(&mut self) -> RenderMode {
        self.render_mode = self.render_mode.toggled();
        self.render_mode
    }

    pub fn enable_lighting(&mut self, enabled: bool) {
        self.lighting_enabled = enabled;
    }

    pub fn lighting_enabled(&self) -> bool {
        self.lighting_enabled
    }

    pub fn toggle_lighting(&mut self) -> bool {
        self.lighting_enabled = !self.lighting_enabled;
        self.lighting_enabled
    }

    // --- Transform surface ---

    /// Reset the model-view matrix to the viewport-centered identity
    pub fn load_identity(&mut self) {
        self.transform.reset();
    }

    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.transform.translate(dx, dy, dz);
    }

    /// Rotate around `axis` by `degrees`
    pub fn rotate(&mut self, degrees: f32, axis: Axis) {
        self.transform.rotate(degrees, axis);
    }

    /// Right-multiply an arbitrary matrix into the model-view matrix
    pub fn apply_transform(&mut self, m: Mat4) {
        self.transform.apply(m);
    }

    pub fn transform(&self) -> &TransformPipeline {
        &self.transform
    }

    // --- Frame lifecycle ---

    /// Clear the frame buffer, reset the transform and paint color
    pub fn begin_frame(&mut self) {
        self.framebuffer.clear();
        self.transform.reset();
        self.current_color = Color::WHITE;
        self.frame_stats = FrameStats::default();
    }

    /// [`Engine::begin_frame`] with the clear timed under "clear"
    pub fn begin_frame_profiled(&mut self, profiler: &mut Profiler) {
        profiler.start("clear");
        self.begin_frame();
        profiler.stop("clear");
    }

    /// Flush the pending queue and return the stats accumulated this frame
    pub fn end_frame(&mut self) -> FrameStats {
        self.flush();
        log::trace!("Frame: {:?}", self.frame_stats);
        self.frame_stats
    }

    /// [`Engine::end_frame`] with the flush timed under "flush"
    pub fn end_frame_profiled(&mut self, profiler: &mut Profiler) -> FrameStats {
        profiler.start("flush");
        let stats = self.end_frame();
        profiler.stop("flush");
        stats
    }

    /// Stats accumulated since the last `begin_frame`
    pub fn frame_stats(&self) -> FrameStats {
        self.frame_stats
    }

    /// Group the pending queue into faces and rasterize them.
    ///
    /// A queue that does not divide into whole groups is dropped without
    /// drawing anything. The queue is always empty afterwards.
    pub fn flush(&mut self) -> FrameStats {
        let mut stats = FrameStats::default();
        if self.pending.is_empty() {
            return stats;
        }

        let mut queue = std::mem::take(&mut self.pending);
        stats.vertices = queue.len();

        match group_faces(&queue, self.triangle_mode) {
            Some(faces) => {
                for face in faces {
                    stats.triangles += 1;
                    match self.draw_face(face) {
                        Some(pixels) => stats.pixels += pixels,
                        None => stats.culled += 1,
                    }
                }
            }
            None => {
                log::debug!(
                    "Discarding {} queued vertices: not a multiple of {} ({:?})",
                    queue.len(),
                    self.triangle_mode.group_size(),
                    self.triangle_mode,
                );
                stats.discarded = queue.len();
            }
        }

        // Keep the allocation for the next frame
        queue.clear();
        self.pending = queue;

        self.frame_stats.accumulate(&stats);
        stats
    }

    /// Shade, project, cull and rasterize one face.
    ///
    /// Returns the number of pixels written, or `None` when culled.
    pub fn draw_face(&mut self, face: Face) -> Option<usize> {
        let face = if self.lighting_enabled {
            self.lighting.shade_face(face)
        } else {
            face
        };

        let a = self.projector.project(&face.a);
        let b = self.projector.project(&face.b);
        let c = self.projector.project(&face.c);

        if !rasterizer::triangle_in_view(&self.framebuffer, &[a, b, c]) {
            return None;
        }

        let written = match self.render_mode {
            RenderMode::Filled => rasterizer::fill_triangle(&mut self.framebuffer, a, b, c),
            RenderMode::Wireframe => rasterizer::draw_wireframe(&mut self.framebuffer, a, b, c),
        };
        Some(written)
    }

    // --- Output ---

    /// The resolved depth/color grid for the host to present
    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }
}
