//! Frame presentation system
//!
//! The image is produced on the CPU. Presenting it is a single
//! `queue.write_texture` of the resolved frame buffer into the swapchain
//! texture, with no render pass. The surface must therefore allow
//! `COPY_DST` and use an 8-bit RGBA or BGRA format.

use std::sync::Arc;
use winit::window::Window;

use fractal3d_raster::{FrameBuffer, Rgba8};

/// Present error types
#[derive(Debug)]
pub enum PresentError {
    /// Surface could not be created for the window
    CreateSurface(String),
    /// No adapter can drive the surface
    NoAdapter,
    /// Device request failed
    RequestDevice(String),
    /// Surface cannot receive texture copies in a supported format
    UnsupportedSurface(String),
    /// Surface was lost or outdated and has been reconfigured
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for PresentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresentError::CreateSurface(msg) => write!(f, "Surface creation failed: {}", msg),
            PresentError::NoAdapter => write!(f, "No compatible GPU adapter"),
            PresentError::RequestDevice(msg) => write!(f, "Device request failed: {}", msg),
            PresentError::UnsupportedSurface(msg) => write!(f, "Unsupported surface: {}", msg),
            PresentError::SurfaceLost => write!(f, "Surface lost"),
            PresentError::OutOfMemory => write!(f, "Out of memory"),
            PresentError::Other(msg) => write!(f, "Present error: {}", msg),
        }
    }
}

impl std::error::Error for PresentError {}

/// Byte order the surface expects per pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelOrder {
    Rgba,
    Bgra,
}

/// Pick a surface format the frame buffer can be copied into.
///
/// Linear formats are preferred so the stored bytes reach the screen as is.
pub fn choose_format(formats: &[wgpu::TextureFormat]) -> Option<(wgpu::TextureFormat, PixelOrder)> {
    use wgpu::TextureFormat as F;

    let order = |format: F| match format {
        F::Rgba8Unorm | F::Rgba8UnormSrgb => Some(PixelOrder::Rgba),
        F::Bgra8Unorm | F::Bgra8UnormSrgb => Some(PixelOrder::Bgra),
        _ => None,
    };

    let linear = formats
        .iter()
        .copied()
        .find(|f| !f.is_srgb() && order(*f).is_some());
    let any = formats.iter().copied().find(|f| order(*f).is_some());

    linear.or(any).and_then(|f| order(f).map(|o| (f, o)))
}

/// Owns the surface and copies finished frames into it
pub struct PresentSystem {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pixel_order: PixelOrder,
    staging: Vec<Rgba8>,
}

impl PresentSystem {
    /// Create the GPU surface for `window`
    pub fn new(window: Arc<Window>, vsync: bool) -> Result<Self, PresentError> {
        pollster::block_on(Self::init(window, vsync))
    }

    async fn init(window: Arc<Window>, vsync: bool) -> Result<Self, PresentError> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let surface = instance
            .create_surface(window)
            .map_err(|e| PresentError::CreateSurface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(PresentError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("fractal3d device"),
                    ..Default::default()
                },
                None,
            )
            .await
            .map_err(|e| PresentError::RequestDevice(e.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        if !caps.usages.contains(wgpu::TextureUsages::COPY_DST) {
            return Err(PresentError::UnsupportedSurface(
                "surface textures do not accept copies".to_string(),
            ));
        }
        let (format, pixel_order) = choose_format(&caps.formats).ok_or_else(|| {
            PresentError::UnsupportedSurface(format!("no 8-bit RGBA/BGRA format in {:?}", caps.formats))
        })?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::COPY_DST,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            desired_maximum_frame_latency: 2,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        log::info!(
            "Surface {}x{} {:?} via {}",
            config.width,
            config.height,
            format,
            adapter.get_info().name
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pixel_order,
            staging: Vec::new(),
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Copy the frame buffer into the next surface texture and present it.
    ///
    /// Only the region both sizes share is copied.
    pub fn present(&mut self, fb: &FrameBuffer) -> Result<(), PresentError> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Err(PresentError::SurfaceLost);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(PresentError::OutOfMemory),
            Err(e) => return Err(PresentError::Other(format!("{:?}", e))),
        };

        match self.pixel_order {
            PixelOrder::Rgba => fb.copy_rgba8(&mut self.staging),
            PixelOrder::Bgra => fb.copy_bgra8(&mut self.staging),
        }

        let width = fb.width().min(self.config.width);
        let height = fb.height().min(self.config.height);

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &output.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(&self.staging),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * fb.width()),
                rows_per_image: Some(fb.height()),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        // Flush the pending copy before presenting
        self.queue.submit(std::iter::empty());
        output.present();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }
}
