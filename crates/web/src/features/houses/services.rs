use sqlx::PgPool;
use school_storage::{
    dto::house::{CreateHouseRequest, UpdateHouseRequest},
    error::Result,
    models::House,
    repository::house::HouseRepository,
};

/// List houses in display order
pub async fn list_houses(pool: &PgPool, include_inactive: bool) -> Result<Vec<House>> {
    let repo = HouseRepository::new(pool);
    repo.list(include_inactive).await
}

/// Get house by slug
pub async fn get_house_by_slug(pool: &PgPool, slug: &str) -> Result<House> {
    let repo = HouseRepository::new(pool);
    repo.find_by_slug(slug).await
}

/// Create a new house on behalf of `actor`
pub async fn create_house(pool: &PgPool, request: &CreateHouseRequest, actor: &str) -> Result<House> {
    let repo = HouseRepository::new(pool);
    let house = repo.create(request, actor).await?;

    tracing::info!(
        house_id = %house.house_id,
        slug = %house.slug,
        actor = %actor,
        "House created"
    );

    Ok(house)
}

/// Update a house
pub async fn update_house(
    pool: &PgPool,
    slug: &str,
    request: &UpdateHouseRequest,
    actor: &str,
) -> Result<House> {
    let repo = HouseRepository::new(pool);

    let existing = repo.find_by_slug(slug).await?;
    let house = repo.update(&existing, request).await?;

    tracing::info!(house_id = %house.house_id, actor = %actor, "House updated");

    Ok(house)
}

/// Delete a house that has no ledger entries
pub async fn delete_house(pool: &PgPool, slug: &str, actor: &str) -> Result<()> {
    let repo = HouseRepository::new(pool);
    let house = repo.find_by_slug(slug).await?;
    repo.delete(house.house_id).await?;

    tracing::info!(house_id = %house.house_id, slug = %house.slug, actor = %actor, "House deleted");

    Ok(())
}
