//! Media-section accessor.
//!
//! The accessor is not a separate type: its operations are inherent methods
//! on [`MediaSection`](crate::session::MediaSection), so a borrowed section
//! is the view.

mod accessor;
