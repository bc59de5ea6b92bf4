//! User interface events.
//!
//! Key presses and timers are translated into [`UiEvent`]s and routed to an
//! [`EventHandler`] by [`dispatch`]. Each handler method is one capability;
//! a handler that does not support a capability keeps the default no-op.

use std::path::PathBuf;

/// Typed user intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Send a chat message
    Submit(String),
    /// Set the web-search flag
    ToggleWebSearch(bool),
    /// Upload a new selection of files
    FilesDropped(Vec<PathBuf>),
    /// Start server-side ingestion
    Ingest,
    /// Refresh server status
    RefreshStatus,
    /// Stop the answer currently streaming
    CancelStream,
}

/// Capability set for consumers of [`UiEvent`]s.
pub trait EventHandler {
    /// Accepts user-submit events.
    fn on_submit(&mut self, _text: String) {}

    /// Accepts web-search toggles.
    fn on_toggle_web_search(&mut self, _enabled: bool) {}

    /// Accepts file-drop events.
    fn on_files_dropped(&mut self, _paths: Vec<PathBuf>) {}

    /// Accepts ingest requests.
    fn on_ingest(&mut self) {}

    /// Accepts status refresh requests.
    fn on_refresh_status(&mut self) {}

    /// Accepts stream cancellation.
    fn on_cancel_stream(&mut self) {}
}

/// Route `event` to the matching handler method.
pub fn dispatch<H: EventHandler + ?Sized>(handler: &mut H, event: UiEvent) {
    match event {
        UiEvent::Submit(text) => handler.on_submit(text),
        UiEvent::ToggleWebSearch(enabled) => handler.on_toggle_web_search(enabled),
        UiEvent::FilesDropped(paths) => handler.on_files_dropped(paths),
        UiEvent::Ingest => handler.on_ingest(),
        UiEvent::RefreshStatus => handler.on_refresh_status(),
        UiEvent::CancelStream => handler.on_cancel_stream(),
    }
}

/// Split a comma-separated list of paths typed by the user.
///
/// Blank entries are dropped and a leading `~/` expands to the home
/// directory.
pub fn parse_path_list(input: &str) -> Vec<PathBuf> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(s)),
            None => PathBuf::from(s),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<String>,
    }

    impl EventHandler for Recorder {
        fn on_submit(&mut self, text: String) {
            self.seen.push(format!("submit:{}", text));
        }

        fn on_files_dropped(&mut self, paths: Vec<PathBuf>) {
            self.seen.push(format!("files:{}", paths.len()));
        }
    }

    #[test]
    fn test_dispatch_routes_events() {
        let mut recorder = Recorder::default();
        dispatch(&mut recorder, UiEvent::Submit("hi".to_string()));
        dispatch(
            &mut recorder,
            UiEvent::FilesDropped(vec![PathBuf::from("a"), PathBuf::from("b")]),
        );
        assert_eq!(recorder.seen, vec!["submit:hi", "files:2"]);
    }

    #[test]
    fn test_unsupported_capabilities_are_noops() {
        let mut recorder = Recorder::default();
        dispatch(&mut recorder, UiEvent::Ingest);
        dispatch(&mut recorder, UiEvent::ToggleWebSearch(true));
        dispatch(&mut recorder, UiEvent::RefreshStatus);
        dispatch(&mut recorder, UiEvent::CancelStream);
        assert!(recorder.seen.is_empty());
    }

    #[test]
    fn test_parse_path_list() {
        let paths = parse_path_list(" a.txt, ,docs/b.pdf ,");
        assert_eq!(
            paths,
            vec![PathBuf::from("a.txt"), PathBuf::from("docs/b.pdf")]
        );
        assert!(parse_path_list("  ").is_empty());
    }

    #[test]
    fn test_parse_path_list_expands_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(parse_path_list("~/notes.md"), vec![home.join("notes.md")]);
        }
    }
}
