use crate::extensions::{ChartEvent, ListenerContext};
use crate::render::Renderer;

use super::ChartController;

impl<R: Renderer> ChartController<R> {
    pub(super) fn listener_context(&self) -> ListenerContext {
        ListenerContext {
            window: self.model.window(),
            visible_indices: self.model.visible_indices(),
            sample_count: self.model.sample_count(),
            gesture_state: self.gesture.state(),
            selected_index: self.selection.index(),
        }
    }

    pub(super) fn emit_chart_event(&mut self, event: ChartEvent) {
        if self.listeners.is_empty() {
            return;
        }
        let context = self.listener_context();
        for listener in &mut self.listeners {
            listener.on_event(&event, context);
        }
    }
}
