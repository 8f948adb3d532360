use moscow_art_bot::assets::{FsProbe, InMemoryProbe};
use moscow_art_bot::catalog::{Catalog, MAX_ITEMS_PER_CATEGORY};
use moscow_art_bot::content_model::Category;
use moscow_art_bot::errors::CatalogError;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn item(slug: &str) -> Value {
    json!({
        "slug": slug,
        "title": format!("Place {slug}"),
        "short_title": slug,
        "summary": "summary",
        "button_label": slug,
        "description": "description",
        "address": "address",
        "site_url": "https://example.org/"
    })
}

fn menu(id: &str, tokens: &[&str]) -> Value {
    let buttons: Vec<Value> = tokens
        .iter()
        .map(|token| json!([{ "label": token, "token": token }]))
        .collect();
    json!({ "id": id, "title": id, "body": format!("*{id}*"), "buttons": buttons })
}

/// Smallest definition that passes validation
fn minimal_definition() -> Value {
    let categories: Vec<Value> = Category::ALL
        .iter()
        .map(|c| json!({ "category": c.slug(), "title": c.slug(), "items": [item("first")] }))
        .collect();

    json!({
        "menus": [
            menu("main", &["info:moscow", "artists", "guide", "authors"]),
            menu("info_moscow", &["back"]),
            menu("artists", &["artist:solo", "back"]),
            menu("guide", &["guide:classic", "guide:avant", "guide:soviet", "guide:contemporary", "back"]),
            menu("authors", &["back"]),
        ],
        "categories": categories,
        "artists": [
            { "key": "solo", "title": "Solo", "title_genitive": "Solo", "image_dir": "solo" }
        ]
    })
}

fn load(definition: &Value) -> Result<Catalog, CatalogError> {
    Catalog::from_json(&definition.to_string(), "/img")
}

fn assert_invalid(definition: &Value, fragment: &str) {
    match load(definition) {
        Err(CatalogError::Invalid(msg)) => {
            assert!(msg.contains(fragment), "message {msg:?} should mention {fragment:?}")
        }
        other => panic!("expected invalid catalog mentioning {fragment:?}, got {other:?}"),
    }
}

#[test]
fn test_minimal_definition_loads() {
    let catalog = load(&minimal_definition()).unwrap();
    for category in Category::ALL {
        assert_eq!(catalog.list_items(category).len(), 1);
        assert!(catalog.get_item(category, "first").is_ok());
    }
    assert_eq!(catalog.artist("solo").unwrap().title, "Solo");
}

#[test]
fn test_builtin_list_order() {
    let catalog = Catalog::builtin("/img").unwrap();
    let slugs = |category| -> Vec<String> {
        catalog
            .list_items(category)
            .iter()
            .map(|item| item.slug.clone())
            .collect()
    };

    assert_eq!(
        slugs(Category::Classic),
        vec!["tretyakov_lavrushinsky", "tretyakov_kadashevskaya", "pushkin_main"]
    );
    assert_eq!(
        slugs(Category::Contemporary),
        vec!["mmoma", "garage", "mamm", "winzavod"]
    );
    assert_eq!(slugs(Category::Soviet), slugs(Category::Soviet));
}

#[test]
fn test_builtin_lookups() {
    let catalog = Catalog::builtin("/img").unwrap();

    let garage = catalog.get_item(Category::Contemporary, "garage").unwrap();
    assert!(garage.title.starts_with("Музей современного искусства «Гараж»"));

    // slugs are scoped to their category
    assert_eq!(
        catalog.get_item(Category::Classic, "garage"),
        Err(CatalogError::not_found("classic item", "garage"))
    );
    assert!(matches!(
        catalog.artist("malevich"),
        Err(CatalogError::NotFound { .. })
    ));
    assert!(matches!(
        catalog.menu("settings"),
        Err(CatalogError::NotFound { .. })
    ));
    assert_eq!(catalog.artist("chtak").unwrap().title_genitive, "Чтака");
}

#[test]
fn test_artist_assets_from_real_directory() {
    let root = TempDir::new().unwrap();
    let dir = root.path().join("Пименов");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("1.jpg"), b"jpg").unwrap();
    fs::write(dir.join("2.jpeg"), b"jpeg").unwrap();
    fs::write(dir.join("4.png"), b"png").unwrap();

    let catalog = Catalog::builtin(root.path()).unwrap();
    let assets = catalog.artist_assets("pimenov", &FsProbe);

    let names: Vec<String> = assets
        .iter()
        .map(|a| a.path().file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["1.jpg", "2.jpeg"]);

    assert!(catalog.artist_assets("plavinskiy", &FsProbe).is_empty());
}

#[test]
fn test_image_resolution_checks_existence() {
    let catalog = Catalog::builtin("/img").unwrap();
    assert_eq!(catalog.images_root(), std::path::Path::new("/img"));
    let probe = InMemoryProbe::new().with_file("/img/Авангард/фото-раздела.jpg");

    let cover = catalog.section(Category::Avant).cover.clone().unwrap();
    assert_eq!(
        catalog.image(&cover, &probe).unwrap().path(),
        std::path::Path::new("/img/Авангард/фото-раздела.jpg")
    );

    let other = catalog.section(Category::Classic).cover.clone().unwrap();
    assert_eq!(catalog.image(&other, &probe), None);
    assert_eq!(
        catalog.resolve_image(&other, &probe),
        Err(CatalogError::MissingAsset(
            std::path::PathBuf::from("/img").join(&other)
        ))
    );
}

#[test]
fn test_rejects_duplicate_slug() {
    let mut definition = minimal_definition();
    definition["categories"][1]["items"] = json!([item("tower"), item("tower")]);
    assert_invalid(&definition, "duplicate slug 'tower'");
}

#[test]
fn test_rejects_slug_with_separator() {
    let mut definition = minimal_definition();
    definition["categories"][0]["items"] = json!([item("a:b")]);
    assert_invalid(&definition, "invalid slug");
}

#[test]
fn test_rejects_missing_category() {
    let mut definition = minimal_definition();
    definition["categories"].as_array_mut().unwrap().pop();
    assert_invalid(&definition, "missing category 'contemporary'");
}

#[test]
fn test_rejects_empty_and_oversized_categories() {
    let mut definition = minimal_definition();
    definition["categories"][2]["items"] = json!([]);
    assert_invalid(&definition, "has no items");

    let mut definition = minimal_definition();
    let items: Vec<Value> = (0..=MAX_ITEMS_PER_CATEGORY)
        .map(|i| item(&format!("place{i}")))
        .collect();
    definition["categories"][2]["items"] = Value::Array(items);
    assert_invalid(&definition, "at most 9 allowed");
}

#[test]
fn test_rejects_missing_menu() {
    let mut definition = minimal_definition();
    definition["menus"].as_array_mut().unwrap().remove(4);
    assert_invalid(&definition, "missing menu 'authors'");
}

#[test]
fn test_rejects_dangling_tokens() {
    let mut definition = minimal_definition();
    definition["menus"][2] = menu("artists", &["artist:ghost", "back"]);
    assert_invalid(&definition, "dangling token 'artist:ghost'");

    let mut definition = minimal_definition();
    definition["menus"][3] = menu("guide", &["guide:classic:nowhere", "back"]);
    assert_invalid(&definition, "dangling token 'guide:classic:nowhere'");

    let mut definition = minimal_definition();
    definition["menus"][1] = menu("info_moscow", &["settings"]);
    assert_invalid(&definition, "dangling token 'settings'");
}

#[test]
fn test_rejects_unknown_parent() {
    let mut definition = minimal_definition();
    definition["menus"][4]["parent"] = json!("home");
    assert_invalid(&definition, "unknown parent 'home'");
}

#[test]
fn test_rejects_artist_without_button() {
    let mut definition = minimal_definition();
    definition["artists"]
        .as_array_mut()
        .unwrap()
        .push(json!({ "key": "duet", "title": "Duet", "title_genitive": "Duet", "image_dir": "duet" }));
    assert_invalid(&definition, "artist 'duet' has no button in the artists menu");
}

#[test]
fn test_rejects_duplicate_artist() {
    let mut definition = minimal_definition();
    let solo = definition["artists"][0].clone();
    definition["artists"].as_array_mut().unwrap().push(solo);
    assert_invalid(&definition, "duplicate artist 'solo'");
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        Catalog::from_json("{ not json", "/img"),
        Err(CatalogError::Parse(_))
    ));

    let mut definition = minimal_definition();
    definition["categories"][0]["category"] = json!("baroque");
    assert!(matches!(load(&definition), Err(CatalogError::Parse(_))));
}
