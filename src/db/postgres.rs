/// PostgreSQL implementation of the entity store
///
/// Repository-style raw SQL over a `PgPool`. The schema is ensured lazily at
/// service startup to unblock environments where migrations have not been
/// applied yet (fresh developer machines, CI spins).
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::db::{CommentRecord, EntityStore};
use crate::error::Result;
use crate::models::{
    Content, ContentWithInteractions, Interaction, InteractionType, Membership, NewInteraction,
};

/// Create the connection pool from database configuration
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;
    Ok(pool)
}

const CONTENT_COLUMNS: &str =
    "id, business_id, title, description, content_type, body, media_url, tags, created_at";

const INTERACTION_COLUMNS: &str =
    "id, user_id, content_id, business_id, interaction_type, payload, created_at";

const MEMBERSHIP_COLUMNS: &str = "id, user_id, business_id, created_at";

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore for PgStore {
    async fn business_id_by_slug(&self, slug: &str) -> Result<Option<Uuid>> {
        let row = sqlx::query("SELECT id FROM businesses WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get::<Uuid, _>("id")))
    }

    async fn contents_by_business(
        &self,
        business_id: Uuid,
    ) -> Result<Vec<ContentWithInteractions>> {
        let contents = sqlx::query_as::<_, Content>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM contents WHERE business_id = $1"
        ))
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, (Uuid, InteractionType)>(
            r#"
            SELECT content_id, interaction_type
            FROM interactions
            WHERE business_id = $1
            "#,
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;

        let mut types_by_content: HashMap<Uuid, Vec<InteractionType>> = HashMap::new();
        for (content_id, interaction_type) in rows {
            types_by_content
                .entry(content_id)
                .or_default()
                .push(interaction_type);
        }

        Ok(contents
            .into_iter()
            .map(|content| {
                let interaction_types = types_by_content.remove(&content.id).unwrap_or_default();
                ContentWithInteractions {
                    content,
                    interaction_types,
                }
            })
            .collect())
    }

    async fn content_by_id(&self, content_id: Uuid) -> Result<Option<Content>> {
        let content = sqlx::query_as::<_, Content>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM contents WHERE id = $1"
        ))
        .bind(content_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(content)
    }

    async fn interactions_by_user_and_business(
        &self,
        user_id: Uuid,
        business_id: Uuid,
    ) -> Result<Vec<Interaction>> {
        let interactions = sqlx::query_as::<_, Interaction>(&format!(
            r#"
            SELECT {INTERACTION_COLUMNS}
            FROM interactions
            WHERE user_id = $1 AND business_id = $2
            ORDER BY created_at
            "#
        ))
        .bind(user_id)
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(interactions)
    }

    async fn interactions_by_user_and_content(
        &self,
        user_id: Uuid,
        content_id: Uuid,
    ) -> Result<Vec<Interaction>> {
        let interactions = sqlx::query_as::<_, Interaction>(&format!(
            r#"
            SELECT {INTERACTION_COLUMNS}
            FROM interactions
            WHERE user_id = $1 AND content_id = $2
            "#
        ))
        .bind(user_id)
        .bind(content_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(interactions)
    }

    async fn interaction_counts_by_type(
        &self,
        content_id: Uuid,
    ) -> Result<HashMap<InteractionType, i64>> {
        let rows = sqlx::query_as::<_, (InteractionType, i64)>(
            r#"
            SELECT interaction_type, COUNT(*)
            FROM interactions
            WHERE content_id = $1
            GROUP BY interaction_type
            "#,
        )
        .bind(content_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    async fn comments_by_content(&self, content_id: Uuid) -> Result<Vec<CommentRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT i.user_id, u.name AS user_name, i.payload, i.created_at
            FROM interactions i
            JOIN users u ON u.id = i.user_id
            WHERE i.content_id = $1 AND i.interaction_type = $2
            "#,
        )
        .bind(content_id)
        .bind(InteractionType::Comment)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CommentRecord {
                user_id: row.get("user_id"),
                user_name: row.get("user_name"),
                payload: row.get("payload"),
                created_at: row.get("created_at"),
            })
            .collect())
    }

    async fn find_interaction(
        &self,
        user_id: Uuid,
        content_id: Uuid,
        interaction_type: InteractionType,
    ) -> Result<Option<Interaction>> {
        let interaction = sqlx::query_as::<_, Interaction>(&format!(
            r#"
            SELECT {INTERACTION_COLUMNS}
            FROM interactions
            WHERE user_id = $1 AND content_id = $2 AND interaction_type = $3
            "#
        ))
        .bind(user_id)
        .bind(content_id)
        .bind(interaction_type)
        .fetch_optional(&self.pool)
        .await?;

        Ok(interaction)
    }

    async fn create_interaction(&self, interaction: NewInteraction) -> Result<Interaction> {
        // The UNIQUE (user_id, content_id, interaction_type) constraint is
        // the authoritative guard; From<sqlx::Error> maps a violation to
        // Conflict.
        let created = sqlx::query_as::<_, Interaction>(&format!(
            r#"
            INSERT INTO interactions (user_id, content_id, business_id, interaction_type, payload)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {INTERACTION_COLUMNS}
            "#
        ))
        .bind(interaction.user_id)
        .bind(interaction.content_id)
        .bind(interaction.business_id)
        .bind(interaction.interaction_type)
        .bind(interaction.payload)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn delete_interaction(
        &self,
        user_id: Uuid,
        content_id: Uuid,
        interaction_type: InteractionType,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM interactions
            WHERE user_id = $1 AND content_id = $2 AND interaction_type = $3
            "#,
        )
        .bind(user_id)
        .bind(content_id)
        .bind(interaction_type)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_membership(
        &self,
        user_id: Uuid,
        business_id: Uuid,
    ) -> Result<Option<Membership>> {
        let membership = sqlx::query_as::<_, Membership>(&format!(
            r#"
            SELECT {MEMBERSHIP_COLUMNS}
            FROM memberships
            WHERE user_id = $1 AND business_id = $2
            "#
        ))
        .bind(user_id)
        .bind(business_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(membership)
    }

    async fn membership_by_id(&self, membership_id: Uuid) -> Result<Option<Membership>> {
        let membership = sqlx::query_as::<_, Membership>(&format!(
            "SELECT {MEMBERSHIP_COLUMNS} FROM memberships WHERE id = $1"
        ))
        .bind(membership_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(membership)
    }

    async fn memberships_by_user(&self, user_id: Uuid) -> Result<Vec<Membership>> {
        let memberships = sqlx::query_as::<_, Membership>(&format!(
            r#"
            SELECT {MEMBERSHIP_COLUMNS}
            FROM memberships
            WHERE user_id = $1
            ORDER BY created_at
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(memberships)
    }

    async fn create_membership(&self, user_id: Uuid, business_id: Uuid) -> Result<Membership> {
        let membership = sqlx::query_as::<_, Membership>(&format!(
            r#"
            INSERT INTO memberships (user_id, business_id)
            VALUES ($1, $2)
            RETURNING {MEMBERSHIP_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(business_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(membership)
    }

    async fn delete_membership(&self, membership_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM memberships WHERE id = $1")
            .bind(membership_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Ensure database types, tables, and uniqueness constraints exist
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    info!("Ensuring database schema exists");

    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}

const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    DO $$ BEGIN
        CREATE TYPE content_type AS ENUM ('TEXT', 'LONGFORM', 'IMAGE', 'LINK');
    EXCEPTION WHEN duplicate_object THEN NULL;
    END $$
    "#,
    r#"
    DO $$ BEGIN
        CREATE TYPE interaction_type AS ENUM ('VIEW', 'CLICK', 'LIKE', 'COMMENT', 'SHARE');
    EXCEPTION WHEN duplicate_object THEN NULL;
    END $$
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS businesses (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name TEXT NOT NULL,
        slug TEXT NOT NULL UNIQUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS memberships (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        user_id UUID NOT NULL REFERENCES users(id),
        business_id UUID NOT NULL REFERENCES businesses(id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        UNIQUE (user_id, business_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS contents (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        business_id UUID NOT NULL REFERENCES businesses(id),
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        content_type content_type NOT NULL,
        body TEXT NOT NULL,
        media_url TEXT,
        tags TEXT[] NOT NULL DEFAULT '{}',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS interactions (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        user_id UUID NOT NULL REFERENCES users(id),
        content_id UUID NOT NULL REFERENCES contents(id),
        business_id UUID NOT NULL REFERENCES businesses(id),
        interaction_type interaction_type NOT NULL,
        payload TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        UNIQUE (user_id, content_id, interaction_type)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_contents_business ON contents (business_id)",
    "CREATE INDEX IF NOT EXISTS idx_interactions_content ON interactions (content_id)",
    "CREATE INDEX IF NOT EXISTS idx_interactions_user_business ON interactions (user_id, business_id)",
];
