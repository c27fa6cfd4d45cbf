use tourism_agency_api::{
    config::AppConfig,
    db::create_pool,
    services::auth_service::hash_password,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin12345".to_string());

    let admin_id = ensure_admin(&pool, &email, &password).await?;
    seed_destinations(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}");
    Ok(())
}

async fn ensure_admin(pool: &sqlx::PgPool, email: &str, password: &str) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password)?;

    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, role, is_active, first_name, last_name)
        VALUES ($1, $2, $3, 'admin', TRUE, 'System', 'Admin')
        ON CONFLICT (email) DO UPDATE SET role = 'admin', is_active = TRUE
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .fetch_optional(pool)
    .await?;

    // If user already exists, fetch id
    let admin_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM users WHERE email = $1")
                .bind(email)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured admin {email}");
    Ok(admin_id)
}

async fn seed_destinations(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let destinations = [
        ("Ubud", "Indonesia", "Gianyar", -8.5069, 115.2625, "Rice terraces and temples in central Bali"),
        ("Komodo National Park", "Indonesia", "Labuan Bajo", -8.5500, 119.4833, "Island hopping and Komodo dragons"),
        ("Kyoto", "Japan", "Kyoto", 35.0116, 135.7681, "Shrines, gardens and old wooden streets"),
        ("Reykjavik", "Iceland", "Reykjavik", 64.1466, -21.9426, "Base for northern lights and glacier tours"),
    ];

    for (name, country, city, latitude, longitude, description) in destinations {
        sqlx::query(
            r#"
            INSERT INTO destinations (id, name, country, city, latitude, longitude, description)
            SELECT $1, $2, $3, $4, $5, $6, $7
            WHERE NOT EXISTS (SELECT 1 FROM destinations WHERE name = $2)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(country)
        .bind(city)
        .bind(latitude)
        .bind(longitude)
        .bind(description)
        .execute(pool)
        .await?;
    }

    println!("Seeded destinations");
    Ok(())
}
