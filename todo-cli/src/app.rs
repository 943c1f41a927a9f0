use crate::render;
use std::io::Write;
use todo_list::{Clock, ItemId, ListStore, Storage, SystemClock, Theme};
use tracing::{debug, info};

/// A user action, as the page would deliver it from a click or key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Load,
    Add(String),
    ToggleComplete(ItemId),
    Delete(ItemId),
    ToggleTheme,
    SetTheme(Theme),
}

/// Turns events into store calls and re-renders the list after each one.
pub struct App<S: Storage, C: Clock = SystemClock> {
    store: ListStore<S, C>,
}

impl<S: Storage, C: Clock> App<S, C> {
    pub fn new(store: ListStore<S, C>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ListStore<S, C> {
        &self.store
    }

    pub fn theme(&self) -> anyhow::Result<Theme> {
        Ok(Theme::load(self.store.storage())?)
    }

    /// Applies `event` and renders the resulting list to `out`.
    ///
    /// A rejected add returns the validation error without rendering.
    #[tracing::instrument(skip(self, out))]
    pub fn handle(&mut self, event: Event, out: &mut impl Write) -> anyhow::Result<()> {
        match event {
            Event::Load => {}
            Event::Add(text) => {
                let item = self.store.add(&text)?;
                debug!("Rendering after adding {}", item.id());
            }
            Event::ToggleComplete(id) => {
                self.store.toggle_complete(id)?;
            }
            Event::Delete(id) => {
                self.store.delete(id)?;
            }
            Event::ToggleTheme => {
                let theme = self.theme()?.toggled();
                self.apply_theme(theme, out)?;
                return Ok(());
            }
            Event::SetTheme(theme) => {
                self.apply_theme(theme, out)?;
                return Ok(());
            }
        }
        self.render(out)
    }

    /// Writes the current list as text.
    pub fn render(&self, out: &mut impl Write) -> anyhow::Result<()> {
        render::render_text(&self.store.list_all()?, out)?;
        Ok(())
    }

    /// The current list as an HTML fragment in the saved theme.
    pub fn export_html(&self) -> anyhow::Result<String> {
        Ok(render::render_html(&self.store.list_all()?, self.theme()?))
    }

    fn apply_theme(&mut self, theme: Theme, out: &mut impl Write) -> anyhow::Result<()> {
        theme.save(self.store.storage_mut())?;
        info!("Theme set to {}", theme);
        writeln!(out, "Theme: {}", theme)?;
        Ok(())
    }
}
