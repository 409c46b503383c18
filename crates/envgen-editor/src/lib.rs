//! Control-surface model for the envgen envelope generator.
//!
//! [`Editor`] mirrors the backend's parameter set, applies the user's edits
//! optimistically and forwards them, drains backend pushes, and produces an
//! [`EditorView`] for whatever draws the surface.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use envgen_bridge::LoopbackHost;
//! use envgen_config::EditorConfig;
//! use envgen_editor::Editor;
//!
//! let (_host, bridge) = LoopbackHost::attach();
//! let mut editor = Editor::connect(Arc::new(bridge), EditorConfig::default());
//! editor.load_state().unwrap();
//! editor.pump();
//!
//! editor.add_lane();
//! assert_eq!(editor.view().lanes().len(), 2);
//! ```

pub mod editor;
pub mod view;

pub use editor::{Editor, PumpReport};
pub use view::{
    ControlKind, ControlView, EditorView, LaneView, SectionBody, SectionView, build_view,
};
