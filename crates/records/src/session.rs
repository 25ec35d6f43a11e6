/// Marker type for session identity.
/// The live Session lives in dlm-gameroom.
/// This marker allows records to use ID<Session> without circular dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Session;
