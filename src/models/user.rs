/// Represents a user in the system.
///
/// Carries the password digest, so it is never serialized directly. Use
/// `UserResponse` for anything that leaves the process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    /// The unique identifier for the user.
    pub id: i64,
    /// The user's email address, unique across all users.
    pub email: String,
    /// The Argon2 PHC string of the user's password.
    pub hashed_password: String,
}
