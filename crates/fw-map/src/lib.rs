//! `fw-map`: binds the operator's focus to an external map surface.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`surface`]     | `MapSurface` trait, `MapHandle`, `LayerHandle`            |
//! | [`timer`]       | `TimerQueue` trait, `TimerId`, `ManualTimers`             |
//! | [`focus`]       | `FocusTarget`, `MarkerSpec`, `FocusChanged`               |
//! | [`adapter`]     | `MapAdapter` state machine, `MapStatus`                   |
//! | [`headless`]    | `HeadlessSurface` recording surface                       |
//! | [`error`]       | `SurfaceError`, `SurfaceResult`                           |
//!
//! Nothing outside [`MapAdapter`] holds map handles.  Callers resolve
//! entities into [`FocusTarget`]s and [`MarkerSpec`]s and hand those over.

pub mod adapter;
pub mod error;
pub mod focus;
pub mod headless;
pub mod surface;
pub mod timer;

#[cfg(test)]
mod tests;

pub use adapter::{MapAdapter, MapStatus};
pub use error::{SurfaceError, SurfaceResult};
pub use focus::{FocusChanged, FocusTarget, MarkerSpec};
pub use headless::{HeadlessSurface, RecordedLayer, RecordedMap};
pub use surface::{LayerHandle, MapHandle, MapSurface};
pub use timer::{ManualTimers, TimerId, TimerQueue};
