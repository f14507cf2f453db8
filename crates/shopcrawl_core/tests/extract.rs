use pretty_assertions::assert_eq;
use shopcrawl_core::{ExtractionPolicy, ImageRef, RecordExtractor};

const SOURCE_URL: &str = "https://shop.example/products/astro-tee";

fn filtered() -> RecordExtractor {
    RecordExtractor::new(ExtractionPolicy::Filtered)
}

fn broad() -> RecordExtractor {
    RecordExtractor::new(ExtractionPolicy::Broad)
}

#[test]
fn filtered_mode_keeps_only_keyword_matching_sources() {
    let html = r#"
        <h1 class="title_product">Astro Tee</h1>
        <div class="product_gallery">
            <div class="gallery-cell" data-title="Front">
                <img data-src="https://cdn.example/astro-mockup-front.jpg" alt="front">
            </div>
            <div class="gallery-cell" data-title="Size chart">
                <img data-src="https://cdn.example/size-chart.jpg" alt="sizes">
            </div>
        </div>
    "#;
    let record = filtered().extract(html, SOURCE_URL);

    assert_eq!(record.images.len(), 1);
    assert!(record.images.iter().all(|img| img.src.contains("mockup")));
    assert_eq!(
        record.images[0],
        ImageRef {
            src: "https://cdn.example/astro-mockup-front.jpg".to_string(),
            alt: Some("front".to_string()),
            title: Some("Front".to_string()),
        }
    );
}

#[test]
fn filtered_mode_skips_placeholder_and_missing_lazy_sources() {
    let html = r#"
        <div class="product_gallery">
            <div class="gallery-cell"><img data-src="px" src="real-mockup.jpg"></div>
            <div class="gallery-cell"><img src="eager-mockup.jpg"></div>
            <div class="gallery-cell"><img data-src="lazy-mockup.jpg"></div>
        </div>
    "#;
    let record = filtered().extract(html, SOURCE_URL);

    assert_eq!(record.images.len(), 1);
    assert_eq!(record.images[0].src, "lazy-mockup.jpg");
}

#[test]
fn filtered_mode_ignores_cells_outside_the_gallery() {
    let html = r#"
        <div class="gallery-cell"><img data-src="stray-mockup.jpg"></div>
        <div class="product_gallery">
            <div class="gallery-cell"><img data-src="inside-mockup.jpg"></div>
        </div>
    "#;
    let record = filtered().extract(html, SOURCE_URL);

    assert_eq!(record.images.len(), 1);
    assert_eq!(record.images[0].src, "inside-mockup.jpg");
}

#[test]
fn filtered_mode_honors_a_custom_asset_keyword() {
    let html = r#"
        <div class="product_gallery">
            <div class="gallery-cell"><img data-src="photo-artwork.png"></div>
            <div class="gallery-cell"><img data-src="photo-mockup.png"></div>
        </div>
    "#;
    let extractor = RecordExtractor::with_asset_keyword(ExtractionPolicy::Filtered, "artwork");
    let record = extractor.extract(html, SOURCE_URL);

    assert_eq!(record.images.len(), 1);
    assert_eq!(record.images[0].src, "photo-artwork.png");
}

#[test]
fn broad_mode_prefers_lazy_source_over_eager() {
    let html = r#"
        <div class="image-element__wrap">
            <img data-src="lazy.jpg" src="eager.jpg" alt="hero">
        </div>
        <div class="image-element__wrap">
            <img src="only-eager.jpg">
        </div>
    "#;
    let record = broad().extract(html, SOURCE_URL);

    assert_eq!(
        record.images,
        vec![
            ImageRef {
                src: "lazy.jpg".to_string(),
                alt: Some("hero".to_string()),
                title: None,
            },
            ImageRef {
                src: "only-eager.jpg".to_string(),
                alt: None,
                title: None,
            },
        ]
    );
}

#[test]
fn broad_mode_applies_no_content_filter() {
    let html = r#"
        <div class="image-element__wrap"><img src="banner.gif"></div>
        <div class="image-element__wrap"><img src="unrelated-photo.jpg"></div>
    "#;
    let record = broad().extract(html, SOURCE_URL);

    assert_eq!(record.images.len(), 2);
}

#[test]
fn broad_mode_ignores_images_outside_the_wrapper() {
    let html = r#"
        <img src="logo.png">
        <div class="image-element__wrap"><img src="inside.jpg"></div>
    "#;
    let record = broad().extract(html, SOURCE_URL);

    assert_eq!(record.images.len(), 1);
    assert_eq!(record.images[0].src, "inside.jpg");
}

#[test]
fn name_is_trimmed_text_of_the_title_element() {
    let html = r#"<h1 class="title_product">
        Astro Tee
    </h1>"#;
    let record = filtered().extract(html, SOURCE_URL);

    assert_eq!(record.name, "Astro Tee");
    assert_eq!(record.url, SOURCE_URL);
}

#[test]
fn missing_or_empty_title_falls_back_to_unknown() {
    let record = filtered().extract("<body><p>No title here.</p></body>", SOURCE_URL);
    assert_eq!(record.name, "Unknown");

    let record = filtered().extract(r#"<h1 class="title_product">   </h1>"#, SOURCE_URL);
    assert_eq!(record.name, "Unknown");
}

#[test]
fn zero_images_still_yield_a_record() {
    let html = r#"<h1 class="title_product">Bare Tee</h1>"#;
    let record = filtered().extract(html, SOURCE_URL);

    assert_eq!(record.name, "Bare Tee");
    assert!(record.images.is_empty());
}
