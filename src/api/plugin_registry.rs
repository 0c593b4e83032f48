use crate::error::{ChartError, ChartResult};
use crate::extensions::{DashboardContext, DashboardEvent, DashboardPlugin};
use crate::render::Renderer;

use super::{CaseSource, DashboardController};

impl<S: CaseSource, R: Renderer> DashboardController<S, R> {
    /// Registers a plugin with unique identifier.
    pub fn register_plugin(&mut self, plugin: Box<dyn DashboardPlugin>) -> ChartResult<()> {
        let plugin_id = plugin.id().to_owned();
        if plugin_id.is_empty() {
            return Err(ChartError::InvalidData(
                "plugin id must not be empty".to_owned(),
            ));
        }
        if self.has_plugin(&plugin_id) {
            return Err(ChartError::InvalidData(format!(
                "plugin with id `{plugin_id}` is already registered"
            )));
        }
        self.plugins.push(plugin);
        Ok(())
    }

    /// Unregisters a plugin by id. Returns `true` when removed.
    pub fn unregister_plugin(&mut self, plugin_id: &str) -> bool {
        if let Some(position) = self
            .plugins
            .iter()
            .position(|entry| entry.id() == plugin_id)
        {
            self.plugins.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn has_plugin(&self, plugin_id: &str) -> bool {
        self.plugins.iter().any(|plugin| plugin.id() == plugin_id)
    }

    pub(super) fn plugin_context(&self) -> DashboardContext {
        DashboardContext {
            viewport: self.viewport,
            filters: self.filters,
            applied_filters: self.applied_filters,
            record_count: self.records.len(),
            bucket_count: self.buckets.len(),
            latest_applied_sequence: self.latest_applied_sequence,
        }
    }

    pub(super) fn emit_event(&mut self, event: DashboardEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            plugin.on_event(event, context);
        }
    }
}
