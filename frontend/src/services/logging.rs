use gloo::console;

/// Console logger tagged with the emitting component, so browser output
/// stays greppable across the list hooks.
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        console::debug!(Self::format(component, message));
    }

    pub fn info_with_component(component: &str, message: &str) {
        console::info!(Self::format(component, message));
    }

    pub fn warn_with_component(component: &str, message: &str) {
        console::warn!(Self::format(component, message));
    }

    pub fn error_with_component(component: &str, message: &str) {
        console::error!(Self::format(component, message));
    }

    fn format(component: &str, message: &str) -> String {
        format!("[{}] {}", component, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn format_tags_the_component() {
        assert_eq!(
            Logger::format("dashboards-hook", "refresh dispatched"),
            "[dashboards-hook] refresh dispatched"
        );
    }
}
