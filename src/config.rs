//! Runtime configuration, read once at startup. Every variable here is
//! required and a missing one is a startup panic, not a silent default.

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub image_base_url: String,
    pub jwt: JwtConfig,
}

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expiry_hours: i64,
}

impl AppConfig {
    pub fn from_env() -> AppConfig {
        AppConfig {
            database_url: require("DATABASE_URL"),
            image_base_url: require("IMAGE_BASE_URL"),
            jwt: JwtConfig {
                secret: require("JWT_SECRET"),
                issuer: require("JWT_ISSUER"),
                audience: require("JWT_AUDIENCE"),
                expiry_hours: require("JWT_EXPIRY_HOURS")
                    .parse()
                    .expect("JWT_EXPIRY_HOURS must be an integer"),
            },
        }
    }
}

fn require(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| panic!("{name} must be set"))
}
