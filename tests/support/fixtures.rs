//! Test fixtures and constants.

/// Standard test secrets used across multiple tests.
pub const STANDARD_SECRETS: &[(&str, &str)] = &[
    ("DATABASE_URL", "postgres://localhost/mydb"),
    ("API_KEY", "sk-test-12345"),
    ("JWT_SECRET", "super-secret-jwt-token"),
    ("REDIS_URL", "redis://localhost:6379"),
    ("S3_BUCKET", "my-app-bucket"),
];
