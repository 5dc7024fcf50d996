//! Core library for the Algorithm Visualiser application.
//!
//! Algorithms run once, eagerly, and record one [`Frame`] per meaningful
//! state transition. A [`Player`] then unfolds those frames over time with
//! play, pause, step, seek and speed controls, notifying a single consumer
//! whenever the active frame changes. The player knows nothing about what a
//! snapshot contains; [`render::TextRenderer`] is one consumer that draws the
//! [`ArraySnapshot`]s produced by the bundled runners.

pub mod algorithms;
pub mod config;
pub mod controls;
pub mod error;
pub mod frame;
pub mod player;
pub mod record;
pub mod render;
pub mod snapshot;
pub mod timeline;

pub use algorithms::{parse_values, Algorithm, AlgorithmInput, Category};
pub use config::{AppConfig, LoggingConfig, PlaybackConfig, RunnerConfig};
pub use controls::{SpeedPreset, TransportView};
pub use error::{Result, VisualiserError};
pub use frame::Frame;
pub use player::{spawn_player, PlaybackState, PlaybackStatus, Player, PlayerHandle};
pub use record::FrameRecorder;
pub use render::TextRenderer;
pub use snapshot::{ArraySnapshot, Mark};
pub use timeline::{Clock, ManualClock, SystemClock, TickTimer, TokioClock};
