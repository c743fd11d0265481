/// Authentication primitives
///
/// - [`password`]: Argon2id credential hashing
/// - [`jwt`]: HS256 session tokens issued at registration and login
/// - [`middleware`]: bearer-token extraction into an [`middleware::AuthContext`]
///
/// ```
/// use trackit_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("hunter22")?;
/// assert!(verify_password("hunter22", &hash)?);
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
