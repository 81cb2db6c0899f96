/// Frame-to-segment resolution.
pub mod controller;
/// Progress ranges and the segments that own them.
pub mod segment;
