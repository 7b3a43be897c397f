use crate::host::GraphicsHost;

/// Holds the host graphics context for as long as it lives.
#[must_use = "the graphics context is released as soon as the guard is dropped"]
pub struct GraphicsGuard<'a, G: GraphicsHost + ?Sized> {
    host: &'a G,
}

impl<'a, G: GraphicsHost + ?Sized> GraphicsGuard<'a, G> {
    pub fn enter(host: &'a G) -> Self {
        host.enter_graphics();
        Self { host }
    }
}

impl<G: GraphicsHost + ?Sized> Drop for GraphicsGuard<'_, G> {
    fn drop(&mut self) {
        self.host.leave_graphics();
    }
}
