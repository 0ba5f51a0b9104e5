//! Tauri-backed implementation of the composer and history windows.

use std::sync::{Arc, Mutex, MutexGuard};

use quicknote_core::{
    ChangeNotifier, QuickNoteError, Result, Surface, SurfaceControl, SurfaceRegistry,
};
use tauri::{
    AppHandle, Emitter, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder, WindowEvent,
};

/// Zero-payload event telling a window to re-list the notes.
pub const REFRESH_EVENT: &str = "notes:refresh";

/// Sent to the composer each time it is toggled visible, so it can reset and focus.
pub const SHOW_EVENT: &str = "note:show";

/// Owns the live windows and keeps their refresh subscriptions in step with them.
#[derive(Clone)]
pub struct TauriSurfaces {
    app: AppHandle,
    registry: Arc<Mutex<SurfaceRegistry<WebviewWindow>>>,
    notifier: Arc<ChangeNotifier>,
}

impl TauriSurfaces {
    pub fn new(app: AppHandle, notifier: Arc<ChangeNotifier>) -> Self {
        Self {
            app,
            registry: Arc::new(Mutex::new(SurfaceRegistry::new())),
            notifier,
        }
    }

    /// Returns the window for `surface`, creating it hidden if it does not exist yet.
    ///
    /// Must not hold the registry lock across `build()`; the event loop takes
    /// it on `Destroyed` while `build()` waits on the event loop.
    pub fn ensure(&self, surface: Surface) -> Result<WebviewWindow> {
        let live = lock(&self.registry).get(surface).cloned();
        if let Some(window) = live {
            return Ok(window);
        }

        let window = match self.build_window(surface) {
            Ok(window) => window,
            // A concurrent caller already created the label and will register it.
            Err(e) => match self.app.get_webview_window(surface.label()) {
                Some(window) => return Ok(window),
                None => return Err(e),
            },
        };

        let (live, fresh) = lock(&self.registry).register(surface, window.clone());
        if !fresh {
            log::debug!("Discarding duplicate '{surface}' window");
            if let Err(e) = window.destroy() {
                log::warn!("Failed to discard duplicate '{surface}' window: {e}");
            }
            return Ok(live);
        }

        self.attach(surface, &live);
        log::info!("Created '{surface}' window");
        Ok(live)
    }

    fn build_window(&self, surface: Surface) -> Result<WebviewWindow> {
        let label = surface.label();
        let builder = WebviewWindowBuilder::new(&self.app, label, WebviewUrl::App("index.html".into()))
            .initialization_script(&format!("window.__QUICKNOTE_SURFACE__ = '{label}';"))
            .decorations(false)
            .resizable(true)
            .visible(false)
            .center();

        let builder = match surface {
            Surface::Composer => builder
                .title("QuickNote")
                .inner_size(520.0, 320.0)
                .always_on_top(true)
                .skip_taskbar(true),
            Surface::History => builder
                .title("QuickNote History")
                .inner_size(720.0, 520.0),
        };
        builder.build().map_err(surface_error)
    }

    /// Wires a registered window to the notifier and to registry teardown.
    fn attach(&self, surface: Surface, window: &WebviewWindow) {
        let label = surface.label();
        let app = self.app.clone();
        self.notifier.subscribe(label, move || {
            if let Err(e) = app.emit_to(label, REFRESH_EVENT, ()) {
                log::warn!("Failed to send refresh to '{label}': {e}");
            }
        });

        let registry = Arc::clone(&self.registry);
        let notifier = Arc::clone(&self.notifier);
        let handle = window.clone();
        window.on_window_event(move |event| match event {
            WindowEvent::Focused(false) if surface == Surface::Composer => {
                if let Err(e) = handle.hide() {
                    log::warn!("Failed to hide composer on blur: {e}");
                }
            }
            WindowEvent::Destroyed => {
                lock(&registry).remove(surface);
                notifier.unsubscribe(label);
            }
            _ => {}
        });
    }
}

impl SurfaceControl for TauriSurfaces {
    fn hide_all(&self) -> Result<()> {
        let windows = lock(&self.registry).handles();
        for window in windows {
            window.hide().map_err(surface_error)?;
        }
        Ok(())
    }

    fn open_history(&self) -> Result<()> {
        let window = self.ensure(Surface::History)?;
        window.show().map_err(surface_error)?;
        window.set_focus().map_err(surface_error)
    }

    fn toggle_composer(&self) -> Result<()> {
        let window = self.ensure(Surface::Composer)?;
        if window.is_visible().map_err(surface_error)? {
            return window.hide().map_err(surface_error);
        }
        window.center().map_err(surface_error)?;
        window.show().map_err(surface_error)?;
        window.set_focus().map_err(surface_error)?;
        self.app
            .emit_to(Surface::Composer.label(), SHOW_EVENT, ())
            .map_err(surface_error)
    }
}

fn lock(
    registry: &Mutex<SurfaceRegistry<WebviewWindow>>,
) -> MutexGuard<'_, SurfaceRegistry<WebviewWindow>> {
    registry.lock().unwrap_or_else(|e| e.into_inner())
}

fn surface_error(e: tauri::Error) -> QuickNoteError {
    QuickNoteError::Surface(e.to_string())
}
