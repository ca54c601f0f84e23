use listing_recommender::{
    build_similarity_index,
    catalog::{load_catalog, Catalog, ColumnMapping},
    config::RecommenderConfig,
    context::RecommenderContext,
    recommend::recommend_listings,
    RecommenderError,
};
use std::io::Write;
use tempfile::NamedTempFile;

const LISTINGS_CSV: &str = "\
id,name,price,description,picture_url,neighbourhood
101,Park Studio,$85.00,Cozy studio near the park with a sunny balcony,https://img.example/1.jpg,Queen Anne
102,Brick Loft,$150.00,\"Spacious loft downtown, exposed brick and city views\",https://img.example/2.jpg,Belltown
103,Lake Studio,$95.00,Quiet studio apartment near the park and the lake,https://img.example/3.jpg,Green Lake
104,Modern Loft,$140.00,Modern loft downtown close to restaurants,https://img.example/4.jpg,Belltown
105,Mystery Room,$60.00,,https://img.example/5.jpg,Fremont
";

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_catalog_preserves_source_order() {
    let file = write_csv(LISTINGS_CSV);
    let records = load_catalog(file.path()).unwrap();

    assert_eq!(records.len(), 5);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.index, i);
        assert_eq!(record.id(), i as i64 + 1);
    }
    assert_eq!(records[0].name, "Park Studio");
    assert_eq!(records[1].description, "Spacious loft downtown, exposed brick and city views");
    assert_eq!(records[2].price, "$95.00");
    assert_eq!(records[3].image_reference, "https://img.example/4.jpg");
    assert!(!records[4].has_description());
}

#[test]
fn test_missing_columns_are_a_load_error() {
    let file = write_csv("name,price\nPark Studio,$85.00\n");

    match load_catalog(file.path()) {
        Err(RecommenderError::DataLoadError(message)) => {
            assert!(message.contains("description"));
            assert!(message.contains("picture_url"));
        }
        other => panic!("expected DataLoadError, got {other:?}"),
    }
}

#[test]
fn test_unreadable_source_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_catalog(dir.path().join("missing.csv"));

    assert!(matches!(result, Err(RecommenderError::DataLoadError(_))));
}

#[test]
fn test_malformed_row_is_a_load_error() {
    let file = write_csv("name,price,description,picture_url\nA,1,text,url\nB,2\n");

    assert!(matches!(
        load_catalog(file.path()),
        Err(RecommenderError::DataLoadError(_))
    ));
}

#[test]
fn test_custom_column_mapping() {
    let csv = "title,cost,summary,photo\nLoft,$10,bright loft,a.jpg\n";
    let columns = ColumnMapping {
        description: "summary".to_string(),
        name: "title".to_string(),
        price: "cost".to_string(),
        image_reference: "photo".to_string(),
    };

    let catalog = Catalog::from_reader(csv.as_bytes(), &columns).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get(0).unwrap().description, "bright loft");
    assert_eq!(catalog.get(0).unwrap().image_reference, "a.jpg");
}

#[test]
fn test_header_only_catalog_is_empty() {
    let catalog =
        Catalog::from_reader("name,price,description,picture_url\n".as_bytes(), &ColumnMapping::default())
            .unwrap();
    assert!(catalog.is_empty());

    let context = RecommenderContext::new(catalog);
    assert!(context.similarity().is_empty());
    assert!(matches!(
        context.recommend(1, 5),
        Err(RecommenderError::IndexOutOfRange { index: 0, len: 0 })
    ));
}

#[test]
fn test_end_to_end_recommendation() {
    let file = write_csv(LISTINGS_CSV);
    let records = load_catalog(file.path()).unwrap();
    let (term_vectors, sim) = build_similarity_index(&records);

    assert_eq!(term_vectors.n_rows(), 5);
    assert_eq!(sim.len(), 5);

    // Only the other park studio shares terms; the runner-up is the lowest tied index.
    let names = recommend_listings(&sim, &records, 1, 2).unwrap();
    assert_eq!(names, vec!["Lake Studio", "Brick Loft"]);

    let lofts = recommend_listings(&sim, &records, 2, 1).unwrap();
    assert_eq!(lofts, vec!["Modern Loft"]);

    // An empty description scores 0.0 against every record, so index order decides.
    let all = recommend_listings(&sim, &records, 5, 10).unwrap();
    assert_eq!(
        all,
        vec!["Park Studio", "Brick Loft", "Lake Studio", "Modern Loft"]
    );
}

#[test]
fn test_recommend_listings_rejects_bad_ids() {
    let file = write_csv(LISTINGS_CSV);
    let records = load_catalog(file.path()).unwrap();
    let (_, sim) = build_similarity_index(&records);

    assert!(matches!(
        recommend_listings(&sim, &records, 0, 3),
        Err(RecommenderError::InvalidId(0))
    ));
    assert!(matches!(
        recommend_listings(&sim, &records, 6, 3),
        Err(RecommenderError::IndexOutOfRange { index: 5, len: 5 })
    ));
}

#[test]
fn test_context_from_config() {
    let data = write_csv(LISTINGS_CSV);
    let config = RecommenderConfig::new(data.path()).with_top_n(3);
    let context = RecommenderContext::from_config(&config).unwrap();

    assert_eq!(context.catalog().len(), 5);
    assert_eq!(context.default_top_n(), 3);

    let listing = context.listing(3).unwrap();
    assert_eq!(listing.name, "Lake Studio");
    assert_eq!(listing.price, "$95.00");

    let names = context.recommend_default(3).unwrap();
    assert_eq!(names.len(), 3);
    assert_eq!(names[0], "Park Studio");

    let scored = context.recommend_records(3, 2).unwrap();
    assert_eq!(scored[0].0.name, "Park Studio");
    assert!(scored[0].1 >= scored[1].1);
}

#[test]
fn test_config_file_defaults_and_validation() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "data_path": "data/seattle.csv", "columns": {{ "image_reference": "thumbnail_url" }} }}"#)
        .unwrap();

    let config = RecommenderConfig::from_file(file.path()).unwrap();
    assert_eq!(config.data_path.to_str(), Some("data/seattle.csv"));
    assert_eq!(config.top_n, 10);
    assert_eq!(config.columns.description, "description");
    assert_eq!(config.columns.image_reference, "thumbnail_url");

    let mut zero = NamedTempFile::new().unwrap();
    write!(zero, r#"{{ "top_n": 0 }}"#).unwrap();
    assert!(matches!(
        RecommenderConfig::from_file(zero.path()),
        Err(RecommenderError::ConfigError(_))
    ));

    let mut broken = NamedTempFile::new().unwrap();
    write!(broken, "not json").unwrap();
    assert!(matches!(
        RecommenderConfig::from_file(broken.path()),
        Err(RecommenderError::ConfigError(_))
    ));
}

#[test]
fn test_catalog_lookups() {
    let catalog = Catalog::from_rows(vec![
        ("garden cottage", "Cottage", "$70", "c.jpg"),
        ("harbour flat", "Flat", "$90", "f.jpg"),
        ("hill cabin", "Cabin", "$50", "h.jpg"),
    ]);

    assert_eq!(catalog.head(2).len(), 2);
    assert_eq!(catalog.head(10).len(), 3);
    assert_eq!(catalog.names(), vec!["Cottage", "Flat", "Cabin"]);
    assert_eq!(catalog.descriptions()[1], "harbour flat");
    assert_eq!(catalog.get_by_id(2).unwrap().name, "Flat");
    assert!(matches!(catalog.get_by_id(-1), Err(RecommenderError::InvalidId(-1))));
    assert!(catalog.get(3).is_none());
}

#[test]
fn test_context_is_shared_across_threads() {
    let context = RecommenderContext::new(Catalog::from_rows(vec![
        ("cozy studio near park", "A", "$1", "a"),
        ("cozy studio near park", "B", "$2", "b"),
        ("industrial loft downtown", "C", "$3", "c"),
    ]));

    let expected = context.recommend(1, 2).unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| context.recommend(1, 2).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
    assert_eq!(expected, vec!["B", "C"]);
}
