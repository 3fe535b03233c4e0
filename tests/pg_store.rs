//! Exercises [`PgStore`] against a real database. Needs `DATABASE_URL`;
//! run with `cargo test --test pg_store -- --ignored`.

use catalog::catalog_core::PageWindow;
use catalog::catalog_models::{
    NewProduct, NewUser, ProductFilter, ProductSort, ProfileChanges, SortField, SortOrder,
    UpdateProductDto,
};
use catalog::store::{PgStore, ProductStore, Store, UserStore};
use sqlx::PgPool;

fn new_product(name: &str, price: f64, category: &str) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        price,
        description: None,
        category: category.to_string(),
        stock: 1,
    }
}

#[ignore]
#[sqlx::test(migrations = "./migrations")]
async fn test_product_roundtrip(pool: PgPool) {
    let store = PgStore::new(pool);
    store.ping().await.unwrap();

    let created = store
        .insert_product(new_product("Lamp", 20.0, "Home"))
        .await
        .unwrap();
    let found = store.find_product(created.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Lamp");

    let updated = store
        .update_product(
            created.id,
            &UpdateProductDto {
                price: Some(25.0),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.price, 25.0);
    assert_eq!(updated.name, "Lamp");
    assert!(updated.updated_at >= created.updated_at);

    assert!(store.delete_product(created.id).await.unwrap());
    assert!(!store.delete_product(created.id).await.unwrap());
}

#[ignore]
#[sqlx::test(migrations = "./migrations")]
async fn test_filters_sorting_and_literal_wildcards(pool: PgPool) {
    let store = PgStore::new(pool);
    for (name, price, category) in [
        ("100% Cotton", 30.0, "Clothing"),
        ("Cotton_Shirt", 20.0, "Clothing"),
        ("Teapot", 10.0, "Kitchen"),
    ] {
        store
            .insert_product(new_product(name, price, category))
            .await
            .unwrap();
    }

    let percent = ProductFilter::new(Some("%"), None);
    assert_eq!(store.count_products(&percent).await.unwrap(), 1);

    let underscore = ProductFilter::new(Some("_"), None);
    assert_eq!(store.count_products(&underscore).await.unwrap(), 1);

    let clothing = ProductFilter::new(Some("cotton"), Some("Clothing"));
    let sort = ProductSort {
        field: SortField::Price,
        order: SortOrder::Asc,
    };
    let items = store
        .find_products(&clothing, sort, PageWindow::default())
        .await
        .unwrap();
    let names: Vec<_> = items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Cotton_Shirt", "100% Cotton"]);

    assert_eq!(
        store.categories().await.unwrap(),
        ["Clothing".to_string(), "Kitchen".to_string()]
    );
}

#[ignore]
#[sqlx::test(migrations = "./migrations")]
async fn test_users(pool: PgPool) {
    let store = PgStore::new(pool);
    let new_user = || NewUser {
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        password_hash: "hash".to_string(),
        is_admin: false,
    };

    let user = store.insert_user(new_user()).await.unwrap();
    let err = store.insert_user(new_user()).await.unwrap_err();
    assert_eq!(err.public_message(), "User already exists");

    let renamed = store
        .update_profile(
            user.id,
            &ProfileChanges {
                name: Some("Alicia".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.name, "Alicia");
    assert_eq!(renamed.email, "alice@example.com");

    let promoted = store.set_admin(user.id, true).await.unwrap().unwrap();
    assert!(promoted.is_admin);

    let by_email = store
        .find_user_by_email("alice@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, user.id);
}
