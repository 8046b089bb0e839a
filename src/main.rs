mod shader;
mod window;

use particle_forms::{GalleryConfig, ShapeKind, ViewerError};
use winit::event_loop::{ControlFlow, EventLoop};

fn main() -> Result<(), ViewerError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let shape = match std::env::args().nth(1) {
        Some(id) => id.parse::<ShapeKind>().unwrap_or_else(|e| {
            log::warn!("{}; showing '{}'", e, ShapeKind::default());
            ShapeKind::default()
        }),
        None => ShapeKind::default(),
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = window::App::new(GalleryConfig::new().with_shape(shape));
    event_loop.run_app(&mut app)?;
    app.into_result()
}
