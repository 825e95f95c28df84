/// Animation actions and templates.
pub mod action;
/// Easing curves.
pub mod ease;
