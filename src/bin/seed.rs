use fashion_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    models::Role,
    services::user_service::{ensure_admin, hash_password},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, config.db_max_connections).await?;
    run_migrations(&pool).await?;

    let seed = config
        .admin
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("set ADMIN_EMAIL and ADMIN_PASSWORD before seeding"))?;
    let admin_id = ensure_admin(&pool, seed).await?;
    let customer_id = ensure_customer(&pool, "Jane Customer", "customer@example.com", "customer123").await?;
    seed_catalog(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}, Customer ID: {customer_id}");
    Ok(())
}

async fn ensure_customer(
    pool: &sqlx::PgPool,
    full_name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<i32> {
    let password_hash = hash_password(password)?;

    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO users (full_name, email, password_hash, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE SET full_name = EXCLUDED.full_name
        RETURNING id
        "#,
    )
    .bind(full_name)
    .bind(email)
    .bind(password_hash)
    .bind(Role::Customer.as_str())
    .fetch_one(pool)
    .await?;

    Ok(id)
}

async fn seed_catalog(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let catalog = [
        ("Tops", "Linen Shirt", "Breathable shirt for warm days", 250_000_i64, 40_i32),
        ("Tops", "Oversized Tee", "Heavyweight cotton tee", 150_000, 80),
        ("Bottoms", "Selvedge Jeans", "Raw denim, straight cut", 650_000, 25),
        ("Outerwear", "Rain Shell", "Packable waterproof jacket", 900_000, 15),
    ];

    for (kind, name, description, price, stock) in catalog {
        let (category_id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO categories (type)
            VALUES ($1)
            ON CONFLICT (type) DO UPDATE SET type = EXCLUDED.type
            RETURNING id
            "#,
        )
        .bind(kind)
        .fetch_one(pool)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO products (name, description, category_id, price, stock)
            SELECT $1, $2, $3, $4, $5
            WHERE NOT EXISTS (
                SELECT 1 FROM products WHERE name = $1 AND deleted_at IS NULL
            )
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(category_id)
        .bind(price)
        .bind(stock)
        .execute(pool)
        .await?;
    }

    println!("Seeded catalog");
    Ok(())
}
