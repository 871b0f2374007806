use std::time::Duration;

use anyhow::Result;
use huigame::{
    prelude::*,
    window::winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut app = Application::new()?;
    let mut win = app.create_graphics_window("huigame")?;

    let extensions = win.extension_names()?;
    for e in &extensions {
        info!("{}", e.to_string_lossy());
    }

    let config = ContextConfig::default();
    let mut context = GraphicsContext::new(win.entry().clone(), &extensions, &config)?;
    let device = context.create_device()?;
    info!("Graphics queue family {}", device.family_index());

    let mut modifiers = ModifiersState::default();
    app.run(|event_loop| {
        let status = event_loop.pump_events(Some(Duration::ZERO), |event, elwt| {
            if let Event::WindowEvent { event, .. } = event {
                handle_window_event(&mut modifiers, &event, elwt);
            }
        });
        matches!(status, PumpStatus::Continue)
    });

    drop(context);
    win.destroy();
    Ok(())
}
