/// Keyframe schedule generator.
pub mod generator;
/// Keyframe and schedule types.
pub mod keyframe;
