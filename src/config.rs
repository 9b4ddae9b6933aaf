use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_enforce_expiry: bool,
    pub product_cache_ttl_secs: u64,
    pub admin: Option<AdminSeed>,
}

/// Credentials of the administrator account created at start-up.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|n| n.parse::<u32>().ok())
            .unwrap_or(10);
        let jwt_enforce_expiry = env::var("JWT_ENFORCE_EXPIRY")
            .ok()
            .map(|v| parse_flag(&v))
            .unwrap_or(true);
        let product_cache_ttl_secs = env::var("PRODUCT_CACHE_TTL_SECS")
            .ok()
            .and_then(|n| n.parse::<u64>().ok())
            .unwrap_or(3600);

        let admin = match (
            env::var("ADMIN_EMAIL"),
            env::var("ADMIN_PASSWORD"),
        ) {
            (Ok(email), Ok(password)) if !email.is_empty() && !password.is_empty() => {
                Some(AdminSeed {
                    full_name: env::var("ADMIN_FULL_NAME")
                        .unwrap_or_else(|_| "Administrator".to_string()),
                    email,
                    password,
                })
            }
            _ => None,
        };

        Ok(Self {
            port,
            database_url,
            host,
            db_max_connections,
            jwt_secret,
            jwt_enforce_expiry,
            product_cache_ttl_secs,
            admin,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::parse_flag;

    #[test]
    fn flag_defaults_to_enabled_for_unknown_values() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(parse_flag("yes please"));
    }

    #[test]
    fn flag_recognises_disabled_spellings() {
        for value in ["0", "false", "FALSE", " off ", "no"] {
            assert!(!parse_flag(value), "{value} should disable the flag");
        }
    }
}
