/// Mutating intents of the auth bounded context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCommand {
    Login { email: String, password: String },
}
