/// Mutating intents of the profile bounded context. A command is created by
/// the caller, consumed exactly once by the aggregate, then discarded.
///
/// The enum is closed on purpose: the aggregate matches exhaustively, so a
/// new variant without a handler is a build error, not a runtime gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileCommand {
    LogOut,
    SetNickname { nickname: String },
}
