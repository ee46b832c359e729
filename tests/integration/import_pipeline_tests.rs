// End-to-end pipeline tests against the in-memory catalog

use super::*;
use product_importer::catalog::InMemoryCatalog;
use product_importer::models::{AttributeDescriptor, ProductData, ProductRecord, VariationOption};
use product_importer::utils::error::{FetchError, ImportError};
use product_importer::{handle_import, ProductImporter};
use std::time::Duration;

fn importer(catalog: InMemoryCatalog, policy: RepresentativeImage) -> ProductImporter<InMemoryCatalog> {
    ProductImporter::from_config(&get_test_config(None, policy), catalog).unwrap()
}

#[tokio::test]
async fn test_simple_product_end_to_end() {
    let images = vec![
        "https://cdn.example.com/red-shoes-1.jpg".to_string(),
        "https://cdn.example.com/red-shoes-2.jpg".to_string(),
    ];
    let server = serve_page("/product/red-shoes", simple_page("Red Shoes", "49.99", &images)).await;
    let importer = importer(InMemoryCatalog::new(), RepresentativeImage::First);

    let imported = importer
        .import(&format!("{}/product/red-shoes", server.uri()))
        .await
        .unwrap();

    let ProductRecord::Simple(product) = &imported.record else {
        panic!("expected a simple product, got {:?}", imported.record);
    };
    assert_eq!(
        product,
        &ProductData {
            name: "Red Shoes".to_string(),
            description: "Description\n      Hand-stitched leather with a rubber sole.".to_string(),
            price: "49.99".to_string(),
            images: images.clone(),
        }
    );

    let stored = importer.backend().get(imported.product_id).await.unwrap();
    assert_eq!(stored.record, imported.record);
    let attached: Vec<&str> = stored.attachments.iter().map(|(_, url)| url.as_str()).collect();
    assert_eq!(attached, vec![images[0].as_str(), images[1].as_str()]);
    assert_eq!(stored.image_id, Some(stored.attachments[0].0));
    assert_eq!(imported.representative_image, stored.image_id);
}

#[tokio::test]
async fn test_variable_product_end_to_end() {
    let images = vec!["https://cdn.example.com/boot.jpg".to_string()];
    let server = serve_page("/product/boot", variable_page(&images)).await;
    let importer = importer(InMemoryCatalog::new(), RepresentativeImage::First);

    let imported = importer
        .import(&format!("{}/product/boot", server.uri()))
        .await
        .unwrap();

    let ProductRecord::Variable {
        product,
        attributes,
        variations,
    } = &imported.record
    else {
        panic!("expected a variable product, got {:?}", imported.record);
    };

    assert_eq!(product.name, "کفش کوهنوردی");
    assert_eq!(product.price, "۱۲۳.۴۵");
    assert_eq!(product.description, "کفش مناسب کوه");
    assert_eq!(product.images, images);
    assert_eq!(
        attributes,
        &vec![
            AttributeDescriptor::for_variation("جنس", vec!["چرم".to_string()]),
            AttributeDescriptor::for_variation("سایز", vec!["۴۱".to_string(), "۴۲".to_string()]),
        ]
    );
    assert_eq!(
        variations,
        &vec![
            VariationOption { value: "41".to_string(), label: "سایز ۴۱".to_string() },
            VariationOption { value: "42".to_string(), label: "سایز ۴۲".to_string() },
        ]
    );
}

#[tokio::test]
async fn test_failed_images_are_skipped_and_policy_applies() {
    let images = vec![
        "https://cdn.example.com/1.jpg".to_string(),
        "https://cdn.example.com/2.jpg".to_string(),
        "https://cdn.example.com/3.jpg".to_string(),
    ];
    let server = serve_page("/p", simple_page("Lamp", "15", &images)).await;

    let first = importer(
        InMemoryCatalog::new().with_unreachable_image(images[0].clone()),
        RepresentativeImage::First,
    );
    let imported = first.import(&format!("{}/p", server.uri())).await.unwrap();
    let stored = first.backend().get(imported.product_id).await.unwrap();
    assert_eq!(stored.attachments.len(), 2);
    assert_eq!(stored.attachments[0].1, images[1]);
    assert_eq!(stored.image_id, Some(stored.attachments[0].0));

    let last = importer(
        InMemoryCatalog::new().with_unreachable_image(images[2].clone()),
        RepresentativeImage::Last,
    );
    let imported = last.import(&format!("{}/p", server.uri())).await.unwrap();
    let stored = last.backend().get(imported.product_id).await.unwrap();
    assert_eq!(stored.attachments.len(), 2);
    assert_eq!(stored.attachments[1].1, images[1]);
    assert_eq!(stored.image_id, Some(stored.attachments[1].0));
}

#[tokio::test]
async fn test_missing_title_fails_without_creating() {
    let page = simple_page("Red Shoes", "49.99", &[]).replace("product_title", "page_heading");
    let server = serve_page("/p", page).await;
    let importer = importer(InMemoryCatalog::new(), RepresentativeImage::First);

    let err = importer.import(&format!("{}/p", server.uri())).await.unwrap_err();

    assert!(matches!(err, ImportError::MissingTitle));
    assert!(importer.backend().products().await.is_empty());
}

#[tokio::test]
async fn test_not_found_page_is_a_fetch_error() {
    let server = serve_page("/p", simple_page("Red Shoes", "1", &[])).await;
    let importer = importer(InMemoryCatalog::new(), RepresentativeImage::First);

    let err = importer.import(&format!("{}/missing", server.uri())).await.unwrap_err();

    assert!(matches!(err, ImportError::Fetch(FetchError::HttpStatus(404))));
    assert!(importer.backend().products().await.is_empty());
}

#[tokio::test]
async fn test_slow_page_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(simple_page("Slow", "1", &[]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let mut config = get_test_config(None, RepresentativeImage::First);
    config.fetcher.timeout_secs = 1;
    let importer = ProductImporter::from_config(&config, InMemoryCatalog::new()).unwrap();

    let err = importer.import(&server.uri()).await.unwrap_err();

    assert!(matches!(err, ImportError::Fetch(FetchError::Network(_))));
    assert!(importer.backend().products().await.is_empty());
}

#[tokio::test]
async fn test_malformed_page_yields_missing_title() {
    let server = serve_page(
        "/p",
        "<html><body><div><p>broken <b>markup</div></i><table><td>x".to_string(),
    )
    .await;
    let importer = importer(InMemoryCatalog::new(), RepresentativeImage::First);

    let outcome = importer.run(&format!("{}/p", server.uri())).await;

    assert!(!outcome.success);
    assert_eq!(outcome.reason(), Some("Could not find product title."));
}

#[tokio::test]
async fn test_trigger_payloads() {
    let server = serve_page("/p", simple_page("Desk", "120.00", &[])).await;
    let importer = importer(InMemoryCatalog::new(), RepresentativeImage::First);

    let invalid = handle_import(&importer, "not a url").await;
    assert_eq!(
        serde_json::to_value(&invalid).unwrap(),
        serde_json::json!({"success": false, "data": "Invalid URL"})
    );

    let created = handle_import(&importer, &format!("{}/p", server.uri())).await;
    assert!(created.success);
    let id = created.product_id().unwrap();
    assert_eq!(importer.backend().get(id).await.unwrap().record.product().name, "Desk");
}

#[tokio::test]
async fn test_concurrent_imports_do_not_interfere() {
    let server = MockServer::start().await;
    for (route, title) in [("/a", "Alpha"), ("/b", "Beta"), ("/c", "Gamma")] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(simple_page(title, "1", &[])))
            .mount(&server)
            .await;
    }
    let importer = importer(InMemoryCatalog::new(), RepresentativeImage::First);
    let url_a = format!("{}/a", server.uri());
    let url_b = format!("{}/b", server.uri());
    let url_c = format!("{}/c", server.uri());

    let (a, b, c) = tokio::join!(
        importer.import(&url_a),
        importer.import(&url_b),
        importer.import(&url_c),
    );

    assert_eq!(a.unwrap().record.product().name, "Alpha");
    assert_eq!(b.unwrap().record.product().name, "Beta");
    assert_eq!(c.unwrap().record.product().name, "Gamma");
    assert_eq!(importer.backend().products().await.len(), 3);
}

#[tokio::test]
async fn test_legacy_encoded_page_keeps_persian_text() {
    // The windows-1256 bytes for "کفش" are not valid UTF-8
    let mut page = br#"<html><head><meta http-equiv="Content-Type" content="text/html; charset=windows-1256"></head><body>
<h1 class="product_title entry-title">"#
        .to_vec();
    page.extend_from_slice(&[0x98, 0xdd, 0xd4]);
    page.extend_from_slice(
        br#"</h1><p class="price"><span class="woocommerce-Price-amount amount">120</span></p></body></html>"#,
    );

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/legacy"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(page, "text/html"))
        .mount(&server)
        .await;
    let importer = importer(InMemoryCatalog::new(), RepresentativeImage::First);

    let record = importer
        .preview(&format!("{}/legacy", server.uri()))
        .await
        .unwrap();

    assert_eq!(record.product().name, "کفش");
    assert_eq!(record.product().price, "120");
}
