//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Credential derivation
// =============================================================================

/// Default PBKDF2-HMAC-SHA512 iteration count
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 210_000;

/// Iteration count of rows created before the count became configurable.
/// Those rows only verify when the manager runs with this value.
pub const REFERENCE_PBKDF2_ITERATIONS: u32 = 1_000;

/// Length of the derived secret in bytes (hex-encoded it is twice as long)
pub const SECRET_LENGTH_BYTES: usize = 64;

/// Length of a freshly generated salt in bytes
pub const SALT_LENGTH_BYTES: usize = 16;

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default bearer token lifetime in minutes
pub const DEFAULT_JWT_EXPIRATION_MINUTES: i64 = 60;

/// Longest accepted bearer token lifetime (one year)
pub const MAX_JWT_EXPIRATION_MINUTES: i64 = 525_600;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per minute (for token expiration calculation)
pub const SECONDS_PER_MINUTE: i64 = 60;

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// =============================================================================
// Response messages
// =============================================================================

/// Returned on successful signup
pub const MSG_SIGNUP_SUCCESS: &str = "User registered successfully";

/// Returned on successful login
pub const MSG_LOGIN_SUCCESS: &str = "Login successful";

/// Returned for both unknown email and wrong password
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid email or password";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 5000;

/// Default overall request deadline in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Longest accepted request deadline in seconds
pub const MAX_REQUEST_TIMEOUT_SECONDS: u64 = 3_600;

// =============================================================================
// Database
// =============================================================================

/// Default database host
pub const DEFAULT_DATABASE_HOST: &str = "localhost";

/// Default database port
pub const DEFAULT_DATABASE_PORT: u16 = 5432;

/// Default database name
pub const DEFAULT_DATABASE_NAME: &str = "auth_api";

/// Default database user
pub const DEFAULT_DATABASE_USER: &str = "postgres";

/// Default connection pool size
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;
