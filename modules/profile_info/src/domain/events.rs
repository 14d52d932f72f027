/// Facts emitted by the profile projector after a state change has been
/// applied. Observers must tolerate receiving each event at most once per
/// successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileDomainEvent {
    LoggedOut,
    NicknameChanged { nickname: String },
}
